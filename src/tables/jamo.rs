//! Jamo stroke weights and the lead-consonant element partition.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use super::{TableMeta, parse_error, read_table_file, single_char};
use crate::classify::Element;
use crate::error::{TableError, TableResult};
use crate::hangul::{LEADS, TRAILS, VOWELS};

/// Stroke weight per jamo, plus the element group of each lead consonant.
///
/// Validated at construction: every jamo of the syllable block has exactly one
/// weight and every lead consonant belongs to exactly one element group. The
/// empty final is implicit and always weighs 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JamoTable {
    meta: TableMeta,
    leads: HashMap<char, u32>,
    vowels: HashMap<char, u32>,
    trails: HashMap<char, u32>,
    elements: HashMap<char, Element>,
}

#[derive(Debug, Deserialize)]
struct JamoToml {
    table: TableMeta,
    lead: BTreeMap<String, u32>,
    vowel: BTreeMap<String, u32>,
    trail: BTreeMap<String, u32>,
    elements: ElementGroups,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementGroups {
    wood: Vec<String>,
    fire: Vec<String>,
    earth: Vec<String>,
    metal: Vec<String>,
    water: Vec<String>,
}

impl JamoTable {
    /// Parse and validate a jamo table from TOML source.
    pub fn from_toml_str(src: &str) -> TableResult<Self> {
        let raw: JamoToml = toml::from_str(src).map_err(|e| parse_error("jamo", e))?;
        let id = raw.table.id.clone();

        let leads = weights(&id, "lead", raw.lead, LEADS.iter().copied())?;
        let vowels = weights(&id, "vowel", raw.vowel, VOWELS.iter().copied())?;
        let trails = weights(&id, "trail", raw.trail, TRAILS.iter().flatten().copied())?;
        let elements = partition(&id, raw.elements)?;

        tracing::info!(
            table = %id,
            leads = leads.len(),
            vowels = vowels.len(),
            trails = trails.len(),
            "loaded jamo table"
        );

        Ok(Self {
            meta: raw.table,
            leads,
            vowels,
            trails,
            elements,
        })
    }

    /// Load a replacement jamo table from disk.
    pub fn from_file(path: &Path) -> TableResult<Self> {
        Self::from_toml_str(&read_table_file(path)?)
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn lead_weight(&self, lead: char) -> u32 {
        self.leads.get(&lead).copied().unwrap_or(0)
    }

    pub fn vowel_weight(&self, vowel: char) -> u32 {
        self.vowels.get(&vowel).copied().unwrap_or(0)
    }

    /// Weight of a final consonant. The empty final weighs exactly 0.
    pub fn trail_weight(&self, trail: Option<char>) -> u32 {
        trail
            .and_then(|t| self.trails.get(&t).copied())
            .unwrap_or(0)
    }

    pub fn lead_element(&self, lead: char) -> Element {
        self.elements.get(&lead).copied().unwrap_or(Element::Unknown)
    }

    /// Lead consonants of one element group, in block order.
    pub fn group(&self, element: Element) -> Vec<char> {
        LEADS
            .iter()
            .copied()
            .filter(|l| self.lead_element(*l) == element)
            .collect()
    }
}

fn weights(
    table: &str,
    position: &'static str,
    raw: BTreeMap<String, u32>,
    expected: impl Iterator<Item = char>,
) -> TableResult<HashMap<char, u32>> {
    let expected: Vec<char> = expected.collect();
    let mut out = HashMap::with_capacity(expected.len());
    for (key, weight) in raw {
        match single_char(&key) {
            Some(c) if expected.contains(&c) => {
                out.insert(c, weight);
            }
            _ => {
                return Err(TableError::UnknownSymbol {
                    table: table.to_string(),
                    position,
                    symbol: key,
                });
            }
        }
    }
    if let Some(&missing) = expected.iter().find(|c| !out.contains_key(c)) {
        return Err(TableError::MissingWeight {
            table: table.to_string(),
            position,
            symbol: missing,
        });
    }
    Ok(out)
}

fn partition(table: &str, groups: ElementGroups) -> TableResult<HashMap<char, Element>> {
    let listed = [
        (Element::Wood, groups.wood),
        (Element::Fire, groups.fire),
        (Element::Earth, groups.earth),
        (Element::Metal, groups.metal),
        (Element::Water, groups.water),
    ];

    let mut out: HashMap<char, Element> = HashMap::with_capacity(LEADS.len());
    let mut seen: HashMap<char, usize> = HashMap::with_capacity(LEADS.len());
    for (element, members) in listed {
        for member in members {
            let lead = single_char(&member)
                .filter(|c| LEADS.contains(c))
                .ok_or_else(|| TableError::UnknownSymbol {
                    table: table.to_string(),
                    position: "element",
                    symbol: member.clone(),
                })?;
            *seen.entry(lead).or_default() += 1;
            out.insert(lead, element);
        }
    }

    for lead in LEADS {
        let count = seen.get(&lead).copied().unwrap_or(0);
        if count != 1 {
            return Err(TableError::ElementPartition {
                symbol: lead,
                count,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::bundled_jamo;

    const MINIMAL_HEADER: &str = r#"
[table]
id = "t"
version = "0"
description = "test"
"#;

    fn bundled_with(edit: impl FnOnce(String) -> String) -> TableResult<JamoTable> {
        let src = crate::tables::bundled_source("jamo").unwrap().to_string();
        JamoTable::from_toml_str(&edit(src))
    }

    #[test]
    fn bundled_weights() {
        let t = bundled_jamo().unwrap();
        assert_eq!(t.lead_weight('ㄱ'), 1);
        assert_eq!(t.lead_weight('ㅃ'), 8);
        assert_eq!(t.vowel_weight('ㅘ'), 4);
        assert_eq!(t.trail_weight(Some('ㄻ')), 6);
    }

    #[test]
    fn empty_final_weighs_zero() {
        let t = bundled_jamo().unwrap();
        assert_eq!(t.trail_weight(None), 0);
    }

    #[test]
    fn group_sizes_are_fixed() {
        let t = bundled_jamo().unwrap();
        assert_eq!(t.group(Element::Wood), vec!['ㄱ', 'ㄲ', 'ㅋ']);
        assert_eq!(t.group(Element::Fire).len(), 5);
        assert_eq!(t.group(Element::Earth), vec!['ㅇ', 'ㅎ']);
        assert_eq!(t.group(Element::Metal).len(), 5);
        assert_eq!(t.group(Element::Water).len(), 4);
    }

    #[test]
    fn missing_lead_weight_is_rejected() {
        let err = bundled_with(|s| s.replacen("\"ㅎ\" = 3\n", "", 1)).unwrap_err();
        assert!(matches!(
            err,
            TableError::MissingWeight {
                position: "lead",
                symbol: 'ㅎ',
                ..
            }
        ));
    }

    #[test]
    fn duplicate_key_is_a_parse_error() {
        let err = bundled_with(|s| s.replacen("\"ㄱ\" = 1\n", "\"ㄱ\" = 1\n\"ㄱ\" = 2\n", 1))
            .unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = bundled_with(|s| s.replacen("[vowel]\n", "[vowel]\n\"x\" = 1\n", 1)).unwrap_err();
        assert!(matches!(
            err,
            TableError::UnknownSymbol {
                position: "vowel",
                ..
            }
        ));
    }

    #[test]
    fn lead_in_two_groups_is_rejected() {
        let err = bundled_with(|s| s.replace("earth = [\"ㅇ\", \"ㅎ\"]", "earth = [\"ㅇ\", \"ㅎ\", \"ㄱ\"]"))
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::ElementPartition {
                symbol: 'ㄱ',
                count: 2
            }
        ));
    }

    #[test]
    fn lead_in_no_group_is_rejected() {
        let err = bundled_with(|s| s.replace("earth = [\"ㅇ\", \"ㅎ\"]", "earth = [\"ㅇ\"]"))
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::ElementPartition {
                symbol: 'ㅎ',
                count: 0
            }
        ));
    }

    #[test]
    fn header_only_is_a_parse_error() {
        assert!(matches!(
            JamoTable::from_toml_str(MINIMAL_HEADER),
            Err(TableError::Parse { .. })
        ));
    }
}
