//! Input characters and three-slot person names.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::tables::HanjaEntry;

/// Writing system of a resolved character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hangul,
    Hanja,
}

/// One name slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    /// A character typed as Hangul. Anything outside the syllable block is
    /// kept as typed and counts as 0 strokes.
    Hangul(char),
    /// A Hanja picked from the table, carrying its own reading and strokes.
    Hanja(HanjaEntry),
    /// Nothing entered or selected.
    #[default]
    Unresolved,
}

impl Character {
    /// First character of free-text input after NFC normalization, so
    /// conjoining-jamo sequences read as their precomposed syllable.
    pub fn hangul(input: &str) -> Self {
        match input.trim().nfc().next() {
            Some(c) => Character::Hangul(c),
            None => Character::Unresolved,
        }
    }

    pub fn hanja(entry: HanjaEntry) -> Self {
        Character::Hanja(entry)
    }

    /// The syllable whose sound is classified: the character itself for
    /// Hangul, the first syllable of the reading for Hanja.
    pub fn sound(&self) -> Option<char> {
        match self {
            Character::Hangul(c) => Some(*c),
            Character::Hanja(entry) => entry.reading.chars().next(),
            Character::Unresolved => None,
        }
    }

    /// The character as written.
    pub fn glyph(&self) -> Option<char> {
        match self {
            Character::Hangul(c) => Some(*c),
            Character::Hanja(entry) => Some(entry.glyph),
            Character::Unresolved => None,
        }
    }

    pub fn script(&self) -> Option<Script> {
        match self {
            Character::Hangul(_) => Some(Script::Hangul),
            Character::Hanja(_) => Some(Script::Hanja),
            Character::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Character::Unresolved)
    }
}

impl From<char> for Character {
    fn from(c: char) -> Self {
        Character::Hangul(c)
    }
}

/// A name in three fixed slots: surname, first and second given character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    pub surname: Character,
    pub given_first: Character,
    pub given_second: Character,
}

impl PersonName {
    pub fn new(surname: Character, given_first: Character, given_second: Character) -> Self {
        Self {
            surname,
            given_first,
            given_second,
        }
    }

    /// Build from three free-text slots.
    pub fn hangul(surname: &str, given_first: &str, given_second: &str) -> Self {
        Self::new(
            Character::hangul(surname),
            Character::hangul(given_first),
            Character::hangul(given_second),
        )
    }

    /// Split a full three-character name such as "김민수".
    ///
    /// Returns `None` unless the normalized input has exactly three
    /// non-whitespace characters.
    pub fn from_hangul_str(full: &str) -> Option<Self> {
        let chars: Vec<char> = full.nfc().filter(|c| !c.is_whitespace()).collect();
        match chars.as_slice() {
            [s, f, g] => Some(Self::new((*s).into(), (*f).into(), (*g).into())),
            _ => None,
        }
    }

    /// Slots in surname, first, second order.
    pub fn chars(&self) -> [&Character; 3] {
        [&self.surname, &self.given_first, &self.given_second]
    }

    pub fn is_complete(&self) -> bool {
        self.chars().iter().all(|c| c.is_resolved())
    }

    /// The name as written. Unresolved slots are skipped.
    pub fn written(&self) -> String {
        self.chars().iter().filter_map(|c| c.glyph()).collect()
    }

    /// The name as pronounced: Hanja slots contribute their reading.
    pub fn spoken(&self) -> String {
        self.chars()
            .iter()
            .filter_map(|c| match c {
                Character::Hanja(entry) => Some(entry.reading.clone()),
                other => other.glyph().map(String::from),
            })
            .collect()
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let written = self.written();
        let spoken = self.spoken();
        if written == spoken {
            f.write_str(&written)
        } else {
            write!(f, "{written} ({spoken})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kim() -> HanjaEntry {
        HanjaEntry {
            glyph: '金',
            reading: "김".into(),
            strokes: 8,
        }
    }

    #[test]
    fn hangul_takes_first_char() {
        assert_eq!(Character::hangul("김철수"), Character::Hangul('김'));
        assert_eq!(Character::hangul("  이 "), Character::Hangul('이'));
        assert_eq!(Character::hangul(""), Character::Unresolved);
        assert_eq!(Character::hangul("   "), Character::Unresolved);
    }

    #[test]
    fn conjoining_jamo_are_composed() {
        // ᄀ + ᅵ + ᆷ
        assert_eq!(
            Character::hangul("\u{1100}\u{1175}\u{11B7}"),
            Character::Hangul('김')
        );
    }

    #[test]
    fn hanja_sound_is_its_reading() {
        let c = Character::hanja(kim());
        assert_eq!(c.sound(), Some('김'));
        assert_eq!(c.glyph(), Some('金'));
        assert_eq!(c.script(), Some(Script::Hanja));
        assert_eq!(Character::Unresolved.sound(), None);
    }

    #[test]
    fn full_name_split() {
        let name = PersonName::from_hangul_str("김민수").unwrap();
        assert_eq!(name.surname, Character::Hangul('김'));
        assert_eq!(name.given_second, Character::Hangul('수'));
        assert!(PersonName::from_hangul_str("김민").is_none());
        assert!(PersonName::from_hangul_str("남궁민수").is_none());
        assert!(PersonName::from_hangul_str("김 민 수").is_some());
    }

    #[test]
    fn completeness() {
        assert!(PersonName::hangul("김", "민", "수").is_complete());
        assert!(!PersonName::hangul("김", "", "수").is_complete());
        assert!(!PersonName::default().is_complete());
    }

    #[test]
    fn written_and_spoken_forms() {
        let name = PersonName::new(
            Character::hanja(kim()),
            Character::hangul("민"),
            Character::Unresolved,
        );
        assert_eq!(name.written(), "金민");
        assert_eq!(name.spoken(), "김민");
        assert_eq!(name.to_string(), "金민 (김민)");
        assert_eq!(PersonName::hangul("김", "민", "수").to_string(), "김민수");
    }
}
