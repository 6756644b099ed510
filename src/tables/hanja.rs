//! Hanja glyphs with their reading and stroke count.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{TableMeta, parse_error, read_table_file, single_char};
use crate::error::{TableError, TableResult};

/// One Hanja glyph as used in names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HanjaEntry {
    pub glyph: char,
    /// Korean reading (음), usually a single syllable.
    pub reading: String,
    /// Original-form stroke count (원획).
    pub strokes: u32,
}

impl std::fmt::Display for HanjaEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {}획)", self.glyph, self.reading, self.strokes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HanjaTable {
    meta: TableMeta,
    entries: Vec<HanjaEntry>,
    by_glyph: HashMap<char, usize>,
}

#[derive(Debug, Deserialize)]
struct HanjaToml {
    table: TableMeta,
    #[serde(default)]
    hanja: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    glyph: String,
    reading: String,
    strokes: u32,
}

impl HanjaTable {
    pub fn from_toml_str(src: &str) -> TableResult<Self> {
        let raw: HanjaToml = toml::from_str(src).map_err(|e| parse_error("hanja", e))?;

        let mut entries = Vec::with_capacity(raw.hanja.len());
        let mut by_glyph = HashMap::with_capacity(raw.hanja.len());
        for item in raw.hanja {
            let glyph = single_char(&item.glyph)
                .ok_or(TableError::InvalidGlyph { glyph: item.glyph })?;
            if by_glyph.insert(glyph, entries.len()).is_some() {
                return Err(TableError::DuplicateGlyph { glyph });
            }
            entries.push(HanjaEntry {
                glyph,
                reading: item.reading,
                strokes: item.strokes,
            });
        }

        tracing::info!(table = %raw.table.id, entries = entries.len(), "loaded hanja table");
        Ok(Self {
            meta: raw.table,
            entries,
            by_glyph,
        })
    }

    pub fn from_file(path: &Path) -> TableResult<Self> {
        Self::from_toml_str(&read_table_file(path)?)
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn get(&self, glyph: char) -> Option<&HanjaEntry> {
        self.by_glyph.get(&glyph).map(|&i| &self.entries[i])
    }

    /// Stroke count of a glyph, 0 if the glyph is not in the table.
    pub fn strokes(&self, glyph: char) -> u32 {
        self.get(glyph).map(|e| e.strokes).unwrap_or(0)
    }

    /// Entries whose glyph or reading contains `term`, in table order.
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&HanjaEntry> {
        let term = term.trim();
        self.entries
            .iter()
            .filter(|e| e.reading.contains(term) || e.glyph.to_string().contains(term))
            .collect()
    }

    /// All entries sharing one reading, in table order.
    pub fn by_reading(&self, reading: &str) -> Vec<&HanjaEntry> {
        self.entries.iter().filter(|e| e.reading == reading).collect()
    }

    pub fn entries(&self) -> &[HanjaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::bundled_hanja;

    const HEADER: &str = "[table]\nid = \"t\"\nversion = \"0\"\ndescription = \"\"\n";

    fn table(body: &str) -> TableResult<HanjaTable> {
        HanjaTable::from_toml_str(&format!("{body}\n{HEADER}"))
    }

    #[test]
    fn bundled_lookup() {
        let t = bundled_hanja().unwrap();
        let kim = t.get('金').unwrap();
        assert_eq!(kim.reading, "김");
        assert_eq!(kim.strokes, 8);
        assert_eq!(t.strokes('李'), 7);
    }

    #[test]
    fn unknown_glyph_has_zero_strokes() {
        let t = bundled_hanja().unwrap();
        assert!(t.get('鬱').is_none());
        assert_eq!(t.strokes('A'), 0);
    }

    #[test]
    fn search_by_reading_and_glyph() {
        let t = bundled_hanja().unwrap();
        let hits = t.search("김");
        assert!(hits.iter().any(|e| e.glyph == '金'));
        assert!(hits.iter().all(|e| e.reading.contains('김')));

        let hits = t.search("秀");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reading, "수");
    }

    #[test]
    fn empty_search_returns_everything() {
        let t = bundled_hanja().unwrap();
        assert_eq!(t.search("").len(), t.len());
        assert!(t.search("zzz").is_empty());
    }

    #[test]
    fn by_reading_is_exact() {
        let t = bundled_hanja().unwrap();
        assert!(t.by_reading("수").iter().any(|e| e.glyph == '秀'));
        assert!(t.by_reading("").is_empty());
    }

    #[test]
    fn multi_char_glyph_is_rejected() {
        let err = table(r#"hanja = [{ glyph = "金李", reading = "김", strokes = 8 }]"#).unwrap_err();
        assert!(matches!(err, TableError::InvalidGlyph { .. }));
    }

    #[test]
    fn duplicate_glyph_is_rejected() {
        let err = table(
            r#"hanja = [
                { glyph = "金", reading = "김", strokes = 8 },
                { glyph = "金", reading = "금", strokes = 8 },
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateGlyph { glyph: '金' }));
    }

    #[test]
    fn table_without_entries_is_empty() {
        let t = table("").unwrap();
        assert!(t.is_empty());
    }
}
