//! Engine facade: top-level API for name analysis.
//!
//! The `FortuneEngine` owns the stroke counter, the hexagram table and the
//! pairing policy, and turns a [`PersonName`] into an ordered report:
//! element, parity, then the four life stages.

use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregate::{Aggregates, compute_aggregates};
use crate::character::PersonName;
use crate::classify::{self, Element};
use crate::enrich::{EnrichError, Enricher, Reading};
use crate::error::MgResult;
use crate::hexagram::PairingPolicy;
use crate::report::{Category, FortuneReportEntry, Status};
use crate::stroke::StrokeCounter;
use crate::tables::{self, HanjaEntry, HanjaTable, HexagramTable, JamoTable};

/// Configuration for the fortune engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Which aggregates are paired, under which bases, per stage.
    pub policy: PairingPolicy,
    /// Replacement hexagram table. `None` uses the bundled one.
    pub hexagram_table: Option<PathBuf>,
    /// Replacement Hanja table. `None` uses the bundled one.
    pub hanja_table: Option<PathBuf>,
    /// Replacement jamo weights. `None` uses the bundled one.
    pub jamo_table: Option<PathBuf>,
}

/// The name-fortune engine.
///
/// Immutable after construction and `Send + Sync`; share it freely.
#[derive(Debug, Clone)]
pub struct FortuneEngine {
    config: EngineConfig,
    counter: StrokeCounter,
    hexagrams: Arc<HexagramTable>,
}

impl FortuneEngine {
    /// Create an engine, loading any replacement tables named in `config`.
    pub fn new(config: EngineConfig) -> MgResult<Self> {
        let hanja = match &config.hanja_table {
            Some(path) => Arc::new(HanjaTable::from_file(path)?),
            None => tables::bundled_hanja()?,
        };
        let hexagrams = match &config.hexagram_table {
            Some(path) => Arc::new(HexagramTable::from_file(path)?),
            None => tables::bundled_hexagrams()?,
        };
        let jamo = match &config.jamo_table {
            Some(path) => Arc::new(JamoTable::from_file(path)?),
            None => tables::bundled_jamo()?,
        };

        tracing::info!(
            hanja = hanja.len(),
            hexagrams = hexagrams.len(),
            custom_hexagrams = config.hexagram_table.is_some(),
            custom_hanja = config.hanja_table.is_some(),
            custom_jamo = config.jamo_table.is_some(),
            "initializing fortune engine"
        );

        let counter = StrokeCounter::new(jamo, hanja);
        Ok(Self {
            config,
            counter,
            hexagrams,
        })
    }

    /// Engine over already-loaded tables.
    pub fn with_tables(
        policy: PairingPolicy,
        jamo: Arc<JamoTable>,
        hanja: Arc<HanjaTable>,
        hexagrams: Arc<HexagramTable>,
    ) -> Self {
        Self {
            config: EngineConfig {
                policy,
                ..EngineConfig::default()
            },
            counter: StrokeCounter::new(jamo, hanja),
            hexagrams,
        }
    }

    /// Stroke counts in surname, first, second order.
    pub fn strokes(&self, name: &PersonName) -> [u32; 3] {
        name.chars().map(|c| self.counter.count(c))
    }

    pub fn aggregates(&self, name: &PersonName) -> Aggregates {
        let [s, n1, n2] = self.strokes(name);
        compute_aggregates(s, n1, n2)
    }

    /// Analyze three free-text slots.
    pub fn analyze_chars(
        &self,
        surname: &str,
        given_first: &str,
        given_second: &str,
    ) -> Vec<FortuneReportEntry> {
        self.analyze(&PersonName::hangul(surname, given_first, given_second))
    }

    /// Build the report: element, parity, origin, growth, benefit, destiny.
    ///
    /// Total over all input; unresolved slots count as 0 strokes.
    pub fn analyze(&self, name: &PersonName) -> Vec<FortuneReportEntry> {
        let strokes = self.strokes(name);
        let aggregates = compute_aggregates(strokes[0], strokes[1], strokes[2]);
        let elements = name.chars().map(|c| self.counter.element(c));

        tracing::debug!(
            name = %name,
            scripts = ?name.chars().map(|c| c.script()),
            ?strokes,
            origin = aggregates.origin,
            growth = aggregates.growth,
            benefit = aggregates.benefit,
            destiny = aggregates.destiny,
            "computed aggregates"
        );

        let mut report = Vec::with_capacity(6);
        report.push(element_entry(name, elements));
        report.push(parity_entry(strokes));

        for pairing in self.config.policy.iter() {
            let (code, entry) = pairing.resolve(&self.hexagrams, &aggregates);
            tracing::debug!(stage = ?pairing.stage, key = %code.key(), "resolved hexagram");
            report.push(FortuneReportEntry {
                category: Category::Composite,
                title: pairing.stage.stage_title().to_string(),
                name: entry.name,
                description: entry.description,
                status: entry.status,
                tags: vec![format!("수치: {code}"), format!("괘: {}", code.key())],
            });
        }
        report
    }

    /// Analyze many names in parallel. Output order follows input order.
    pub fn analyze_batch(&self, names: &[PersonName]) -> Vec<Vec<FortuneReportEntry>> {
        use rayon::prelude::*;

        names.par_iter().map(|name| self.analyze(name)).collect()
    }

    /// The report plus optional commentary.
    ///
    /// A failing enricher never fails the reading; it only drops the
    /// commentary.
    pub fn analyze_with(&self, name: &PersonName, enricher: &dyn Enricher) -> Reading {
        let report = self.analyze(name);
        let spoken = name.spoken();
        let commentary = match enricher.enrich(&spoken) {
            Ok(text) => Some(text),
            Err(EnrichError::Disabled) => {
                tracing::debug!("enrichment disabled");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, name = %spoken, "enrichment failed, continuing without commentary");
                None
            }
        };
        Reading {
            name: name.to_string(),
            report,
            commentary,
        }
    }

    /// Table entry for a Hanja glyph, for resolving picker input.
    pub fn resolve_hanja(&self, glyph: char) -> Option<HanjaEntry> {
        self.counter.hanja_table().get(glyph).cloned()
    }

    pub fn counter(&self) -> &StrokeCounter {
        &self.counter
    }

    pub fn hanja_table(&self) -> &HanjaTable {
        self.counter.hanja_table()
    }

    pub fn hexagram_table(&self) -> &HexagramTable {
        &self.hexagrams
    }

    pub fn policy(&self) -> &PairingPolicy {
        &self.config.policy
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get engine statistics.
    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            jamo_table: format!(
                "{} v{}",
                self.counter.jamo_table().meta().id,
                self.counter.jamo_table().meta().version
            ),
            hanja_entries: self.hanja_table().len(),
            hexagram_entries: self.hexagrams.len(),
            pairings: self
                .config
                .policy
                .iter()
                .map(|p| format!("{} = {} : {}", p.stage.stage_title(), p.upper, p.lower))
                .collect(),
        }
    }
}

fn element_entry(name: &PersonName, elements: [Element; 3]) -> FortuneReportEntry {
    let relations = [
        classify::relation(elements[0], elements[1]),
        classify::relation(elements[1], elements[2]),
    ];

    let mut tags: Vec<String> = name
        .chars()
        .iter()
        .zip(elements)
        .filter_map(|(c, e)| c.glyph().map(|g| format!("{g}: {}", e.label())))
        .collect();
    tags.extend(
        elements
            .windows(2)
            .zip(relations)
            .map(|(pair, rel)| format!("{}→{}: {}", pair[0].short(), pair[1].short(), rel.label())),
    );

    let description = if elements.contains(&Element::Unknown) {
        "확인할 수 없는 글자가 있어 소리의 흐름을 온전히 읽을 수 없습니다.".to_string()
    } else {
        format!(
            "성에서 이름으로 {}, 이름 안에서 {}의 흐름을 이룹니다.",
            relations[0].label(),
            relations[1].label()
        )
    };

    FortuneReportEntry {
        category: Category::Element,
        title: "발음오행 (發音五行)".to_string(),
        name: elements.map(Element::short).join(" · "),
        description,
        status: Status::Neutral,
        tags,
    }
}

fn parity_entry(strokes: [u32; 3]) -> FortuneReportEntry {
    let parities = strokes.map(classify::parity);
    let balanced = classify::parity_balanced(parities);
    let (description, status) = if balanced {
        (
            "음과 양이 고루 섞여 서로를 받쳐 주는 조화로운 배열입니다.",
            Status::Favorable,
        )
    } else {
        (
            "획수의 음양이 한쪽으로 치우쳐 있어 균형을 보완할 필요가 있습니다.",
            Status::Unfavorable,
        )
    };
    FortuneReportEntry {
        category: Category::Parity,
        title: "획수음양 (劃數陰陽)".to_string(),
        name: parities.map(|p| p.short()).join(" · "),
        description: description.to_string(),
        status,
        tags: vec![format!(
            "획수: {}-{}-{}",
            strokes[0], strokes[1], strokes[2]
        )],
    }
}

/// Engine statistics.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub jamo_table: String,
    pub hanja_entries: usize,
    pub hexagram_entries: usize,
    pub pairings: Vec<String>,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "myeonggyeong engine info")?;
        writeln!(f, "  jamo table:   {}", self.jamo_table)?;
        writeln!(f, "  hanja:        {}", self.hanja_entries)?;
        writeln!(f, "  hexagrams:    {}", self.hexagram_entries)?;
        writeln!(f, "  pairings:")?;
        for p in &self.pairings {
            writeln!(f, "    {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::enrich::{NoEnrichment, StaticEnrichment};

    fn engine() -> FortuneEngine {
        FortuneEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FortuneEngine>();
    }

    #[test]
    fn report_has_fixed_shape() {
        let report = engine().analyze_chars("김", "민", "수");
        assert_eq!(report.len(), 6);
        assert_eq!(report[0].category, Category::Element);
        assert_eq!(report[1].category, Category::Parity);
        let titles: Vec<&str> = report[2..].iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            ["초년운 (元格)", "중년운 (亨格)", "장년운 (利格)", "총운 (貞格)"]
        );
    }

    #[test]
    fn strokes_and_aggregates() {
        let e = engine();
        let name = PersonName::hangul("가", "다", "김");
        assert_eq!(e.strokes(&name), [3, 4, 5]);
        let a = e.aggregates(&name);
        assert_eq!((a.origin, a.growth, a.benefit, a.destiny), (9, 7, 8, 12));
    }

    #[test]
    fn element_entry_is_neutral_with_relations() {
        // 김 wood, 이 earth, 나 fire
        let report = engine().analyze_chars("김", "이", "나");
        let entry = &report[0];
        assert_eq!(entry.status, Status::Neutral);
        assert_eq!(entry.name, "목 · 토 · 화");
        assert!(entry.tags.contains(&"목→토: 상극(相剋)".to_string()));
        assert!(entry.tags.contains(&"토→화: 상생(相生)".to_string()));
        assert!(entry.tags.contains(&"김: 목(木)".to_string()));
    }

    #[test]
    fn parity_entry_status() {
        let e = engine();
        // 3, 4, 5 -> odd, even, odd
        let report = e.analyze_chars("가", "다", "김");
        assert_eq!(report[1].status, Status::Favorable);
        assert_eq!(report[1].tag("획수: "), Some("3-4-5"));

        // 김 5, 가 3, 김 5 -> all odd
        let report = e.analyze_chars("김", "가", "김");
        assert_eq!(report[1].status, Status::Unfavorable);
    }

    #[test]
    fn stage_entries_carry_code_tags() {
        let report = engine().analyze_chars("가", "다", "김");
        assert_eq!(report[2].tag("수치: "), Some("7-1"));
        assert_eq!(report[2].tag("괘: "), Some("71"));
        assert!(report[2].name.starts_with("산천대축"));
    }

    #[test]
    fn unresolved_input_never_panics() {
        let e = engine();
        let report = e.analyze(&PersonName::default());
        assert_eq!(report.len(), 6);
        assert_eq!(report[0].name, "? · ? · ?");
        // 0, 0, 0 is uniformly even.
        assert_eq!(report[1].status, Status::Unfavorable);
        // Every aggregate is 0, which reduces to 8 everywhere.
        assert_eq!(report[2].tag("괘: "), Some("88"));
    }

    #[test]
    fn hanja_name_uses_carried_strokes() {
        let e = engine();
        let pick = |g: char| Character::hanja(e.resolve_hanja(g).unwrap());
        let name = PersonName::new(pick('李'), pick('民'), pick('秀'));
        assert_eq!(e.strokes(&name), [7, 5, 7]);
        let report = e.analyze(&name);
        // Elements come from the readings 이, 민, 수.
        assert_eq!(report[0].name, "토 · 수 · 금");
    }

    #[test]
    fn prebuilt_tables_match_bundled_engine() {
        let e = FortuneEngine::with_tables(
            PairingPolicy::standard(),
            tables::bundled_jamo().unwrap(),
            tables::bundled_hanja().unwrap(),
            tables::bundled_hexagrams().unwrap(),
        );
        let name = PersonName::hangul("정", "하", "윤");
        assert_eq!(e.analyze(&name), engine().analyze(&name));
        assert!(e.config().hexagram_table.is_none());
    }

    #[test]
    fn batch_matches_sequential() {
        let e = engine();
        let names: Vec<PersonName> = ["김민수", "이서연", "박지훈", "최유나"]
            .iter()
            .filter_map(|n| PersonName::from_hangul_str(n))
            .collect();
        let batch = e.analyze_batch(&names);
        assert_eq!(batch.len(), 4);
        for (name, report) in names.iter().zip(&batch) {
            assert_eq!(report, &e.analyze(name));
        }
        assert!(e.analyze_batch(&[]).is_empty());
    }

    #[test]
    fn enrichment_is_optional() {
        let e = engine();
        let name = PersonName::hangul("김", "민", "수");

        let plain = e.analyze_with(&name, &NoEnrichment);
        assert!(plain.commentary.is_none());
        assert_eq!(plain.report, e.analyze(&name));

        let rich = e.analyze_with(&name, &StaticEnrichment::template("{name} 풀이"));
        assert_eq!(rich.commentary.as_deref(), Some("김민수 풀이"));
        assert_eq!(rich.report, plain.report);

        let failing = e.analyze_with(&name, &StaticEnrichment::default());
        assert!(failing.commentary.is_none());
    }

    #[test]
    fn missing_table_file_is_an_error() {
        let err = FortuneEngine::new(EngineConfig {
            hexagram_table: Some(PathBuf::from("/nonexistent/hexagram.toml")),
            ..EngineConfig::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::MgError::Table(crate::error::TableError::Io { .. })
        ));
    }

    #[test]
    fn info_lists_policy() {
        let info = engine().info();
        assert_eq!(info.hexagram_entries, 64);
        assert_eq!(info.pairings.len(), 4);
        let text = info.to_string();
        assert!(text.contains("myeonggyeong engine info"));
        assert!(text.contains("jamo v1"));
    }
}
