//! Optional free-text commentary layered on top of a report.
//!
//! Enrichment never changes the deterministic report. A failing enricher is
//! reported by the engine and the reading simply carries no commentary.

use std::collections::BTreeMap;
use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::FortuneReportEntry;

#[derive(Debug, Error, Diagnostic)]
pub enum EnrichError {
    #[error("enrichment is disabled")]
    #[diagnostic(code(mg::enrich::disabled))]
    Disabled,

    #[error("enrichment failed: {message}")]
    #[diagnostic(
        code(mg::enrich::failed),
        help("The report is still valid; only the commentary is missing.")
    )]
    Failed { message: String },

    #[error("enrichment returned no text")]
    #[diagnostic(code(mg::enrich::empty))]
    Empty,

    #[error("failed to load commentary fixture: {path}")]
    #[diagnostic(
        code(mg::enrich::fixture),
        help("Fixtures are JSON objects: {{\"default\": \"...{{name}}...\", \"names\": {{\"김민수\": \"...\"}}}}.")
    )]
    Fixture { path: String, message: String },
}

pub type EnrichResult<T> = std::result::Result<T, EnrichError>;

/// Source of commentary for a full name.
pub trait Enricher: Send + Sync {
    fn enrich(&self, full_name: &str) -> EnrichResult<String>;
}

/// Always declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl Enricher for NoEnrichment {
    fn enrich(&self, _full_name: &str) -> EnrichResult<String> {
        Err(EnrichError::Disabled)
    }
}

/// Fixed commentary, per name or from a template.
///
/// `{name}` in the template is replaced by the full name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticEnrichment {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl StaticEnrichment {
    pub fn template(text: impl Into<String>) -> Self {
        Self {
            default: Some(text.into()),
            names: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.names.insert(name.into(), text.into());
        self
    }

    pub fn from_json_str(src: &str) -> EnrichResult<Self> {
        serde_json::from_str(src).map_err(|e| EnrichError::Fixture {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    pub fn from_json_file(path: &Path) -> EnrichResult<Self> {
        let fixture_error = |message: String| EnrichError::Fixture {
            path: path.display().to_string(),
            message,
        };
        let src = std::fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        serde_json::from_str(&src).map_err(|e| fixture_error(e.to_string()))
    }
}

impl Enricher for StaticEnrichment {
    fn enrich(&self, full_name: &str) -> EnrichResult<String> {
        let text = match (self.names.get(full_name), &self.default) {
            (Some(text), _) => text.clone(),
            (None, Some(template)) => template.replace("{name}", full_name),
            (None, None) => {
                return Err(EnrichError::Failed {
                    message: format!("no commentary for \"{full_name}\""),
                });
            }
        };
        if text.trim().is_empty() {
            return Err(EnrichError::Empty);
        }
        Ok(text)
    }
}

/// A report plus whatever commentary enrichment produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub name: String,
    pub report: Vec<FortuneReportEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_enrichment_declines() {
        assert!(matches!(NoEnrichment.enrich("김민수"), Err(EnrichError::Disabled)));
    }

    #[test]
    fn template_substitutes_name() {
        let e = StaticEnrichment::template("{name}님의 이름은 단단합니다.");
        assert_eq!(e.enrich("김민수").unwrap(), "김민수님의 이름은 단단합니다.");
    }

    #[test]
    fn per_name_text_wins_over_template() {
        let e = StaticEnrichment::template("기본").with_name("이서연", "맞춤");
        assert_eq!(e.enrich("이서연").unwrap(), "맞춤");
        assert_eq!(e.enrich("박지훈").unwrap(), "기본");
    }

    #[test]
    fn missing_and_blank_text_fail() {
        let e = StaticEnrichment::default();
        assert!(matches!(e.enrich("김민수"), Err(EnrichError::Failed { .. })));

        let e = StaticEnrichment::template("   ");
        assert!(matches!(e.enrich("김민수"), Err(EnrichError::Empty)));
    }

    #[test]
    fn fixture_from_json() {
        let e = StaticEnrichment::from_json_str(
            r#"{"default": "{name}: 평범", "names": {"김민수": "특별"}}"#,
        )
        .unwrap();
        assert_eq!(e.enrich("김민수").unwrap(), "특별");
        assert_eq!(e.enrich("가나다").unwrap(), "가나다: 평범");

        assert!(matches!(
            StaticEnrichment::from_json_str("[1, 2]"),
            Err(EnrichError::Fixture { .. })
        ));
    }

    #[test]
    fn fixture_from_missing_file() {
        let err = StaticEnrichment::from_json_file(Path::new("/nonexistent/commentary.json"))
            .unwrap_err();
        assert!(matches!(err, EnrichError::Fixture { path, .. } if path.contains("commentary.json")));
    }

    #[test]
    fn reading_omits_absent_commentary() {
        let r = Reading {
            name: "김민수".into(),
            report: vec![],
            commentary: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("commentary").is_none());
        assert_eq!(json["name"], "김민수");
    }
}
