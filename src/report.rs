//! Report entries and their plain-text rendering.

use serde::{Deserialize, Serialize};

/// Which classifier produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 오행: sound-element sequence.
    Element,
    /// 음양: stroke parity balance.
    Parity,
    /// 종합: a hexagram-resolved life stage.
    Composite,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Element => "오행",
            Category::Parity => "음양",
            Category::Composite => "종합",
        }
    }
}

/// Fortune status of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(alias = "good")]
    Favorable,
    #[serde(alias = "bad")]
    Unfavorable,
    Neutral,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Favorable => "길(吉)",
            Status::Unfavorable => "흉(凶)",
            Status::Neutral => "평(平)",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of a fortune report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneReportEntry {
    pub category: Category,
    pub title: String,
    pub name: String,
    pub description: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl FortuneReportEntry {
    /// The first tag starting with `prefix`, with the prefix stripped.
    pub fn tag(&self, prefix: &str) -> Option<&str> {
        self.tags.iter().find_map(|t| t.strip_prefix(prefix))
    }
}

/// Count entries per status: (favorable, unfavorable, neutral).
pub fn tally(entries: &[FortuneReportEntry]) -> (usize, usize, usize) {
    entries
        .iter()
        .fold((0, 0, 0), |(f, u, n), e| match e.status {
            Status::Favorable => (f + 1, u, n),
            Status::Unfavorable => (f, u + 1, n),
            Status::Neutral => (f, u, n + 1),
        })
}

/// Render a report as indented plain text.
pub fn render_text(entries: &[FortuneReportEntry]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "[{}] {} {} · {}",
            entry.category.label(),
            entry.status.label(),
            entry.title,
            entry.name
        );
        let _ = writeln!(out, "    {}", entry.description);
        if !entry.tags.is_empty() {
            let _ = writeln!(out, "    {}", entry.tags.join(" / "));
        }
    }
    let (f, u, n) = tally(entries);
    let _ = write!(out, "길 {f} · 흉 {u} · 평 {n}");
    out
}
