//! The hexagram table: two-digit keys to name, reading and status.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{TableMeta, parse_error, read_table_file};
use crate::error::{TableError, TableResult};
use crate::report::Status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramEntry {
    pub name: String,
    pub description: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexagramTable {
    meta: TableMeta,
    entries: BTreeMap<String, HexagramEntry>,
}

#[derive(Debug, Deserialize)]
struct HexagramToml {
    table: TableMeta,
    #[serde(default)]
    hexagram: BTreeMap<String, HexagramEntry>,
}

impl HexagramTable {
    pub fn from_toml_str(src: &str) -> TableResult<Self> {
        let raw: HexagramToml = toml::from_str(src).map_err(|e| parse_error("hexagram", e))?;
        if let Some(bad) = raw.hexagram.keys().find(|k| !is_valid_key(k)) {
            return Err(TableError::InvalidKey { key: bad.clone() });
        }
        tracing::info!(
            table = %raw.table.id,
            entries = raw.hexagram.len(),
            "loaded hexagram table"
        );
        Ok(Self {
            meta: raw.table,
            entries: raw.hexagram,
        })
    }

    pub fn from_file(path: &Path) -> TableResult<Self> {
        Self::from_toml_str(&read_table_file(path)?)
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn get(&self, key: &str) -> Option<&HexagramEntry> {
        self.entries.get(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HexagramEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two ASCII digits, each 1..=9.
fn is_valid_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == 2 && bytes.iter().all(|b| (b'1'..=b'9').contains(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::bundled_hexagrams;

    const HEADER: &str = "[table]\nid = \"t\"\nversion = \"0\"\ndescription = \"\"\n";

    #[test]
    fn bundled_table_is_complete() {
        let t = bundled_hexagrams().unwrap();
        assert_eq!(t.len(), 64);
        for upper in 1..=8 {
            for lower in 1..=8 {
                assert!(t.get(&format!("{upper}{lower}")).is_some());
            }
        }
    }

    #[test]
    fn known_entries() {
        let t = bundled_hexagrams().unwrap();
        let e = t.get("71").unwrap();
        assert!(e.name.starts_with("산천대축"));
        assert_eq!(e.status, Status::Favorable);

        let e = t.get("16").unwrap();
        assert!(e.name.starts_with("천수송"));
        assert_eq!(e.status, Status::Unfavorable);

        assert_eq!(t.get("12").unwrap().status, Status::Neutral);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let t = bundled_hexagrams().unwrap();
        let keys: Vec<&str> = t.iter().map(|(k, _)| k).take(3).collect();
        assert_eq!(keys, ["11", "12", "13"]);
    }

    #[test]
    fn key_validation() {
        assert!(is_valid_key("11"));
        assert!(is_valid_key("99"));
        assert!(!is_valid_key("80"));
        assert!(!is_valid_key("1"));
        assert!(!is_valid_key("123"));
        assert!(!is_valid_key("a1"));
    }

    #[test]
    fn zero_digit_key_is_rejected() {
        let src = format!(
            "{HEADER}\n[hexagram.80]\nname = \"x\"\ndescription = \"y\"\nstatus = \"neutral\"\n"
        );
        let err = HexagramTable::from_toml_str(&src).unwrap_err();
        assert!(matches!(err, TableError::InvalidKey { key } if key == "80"));
    }

    #[test]
    fn status_aliases_parse() {
        let src = format!(
            "{HEADER}\n[hexagram.99]\nname = \"x\"\ndescription = \"y\"\nstatus = \"good\"\n"
        );
        let t = HexagramTable::from_toml_str(&src).unwrap();
        assert_eq!(t.get("99").unwrap().status, Status::Favorable);
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        let src = format!(
            "{HEADER}\n[hexagram.11]\nname = \"x\"\ndescription = \"y\"\nstatus = \"great\"\n"
        );
        assert!(matches!(
            HexagramTable::from_toml_str(&src),
            Err(TableError::Parse { .. })
        ));
    }
}
