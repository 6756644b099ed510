//! Hangul syllable decomposition.
//!
//! Precomposed syllables occupy the contiguous block U+AC00..=U+D7A3 and are
//! laid out as `(lead * 21 + vowel) * 28 + trail`, so the three jamo indices
//! fall out of fixed-width division. Indices are mapped to compatibility jamo
//! (U+3131..) because those are what the stroke tables are keyed by.

/// First codepoint of the syllable block (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Number of lead consonants (초성).
pub const LEAD_COUNT: u32 = 19;
/// Number of vowels (중성).
pub const VOWEL_COUNT: u32 = 21;
/// Number of trailing consonants (종성), including "no trail" at index 0.
pub const TRAIL_COUNT: u32 = 28;
/// Total number of precomposed syllables.
pub const BLOCK_SIZE: u32 = LEAD_COUNT * VOWEL_COUNT * TRAIL_COUNT;

/// Lead consonants in block order.
pub const LEADS: [char; LEAD_COUNT as usize] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in block order.
pub const VOWELS: [char; VOWEL_COUNT as usize] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants in block order. Index 0 is the empty final.
pub const TRAILS: [Option<char>; TRAIL_COUNT as usize] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// A syllable split into its positional components.
///
/// Only constructed by [`decompose`], so the indices are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jamo {
    lead: u8,
    vowel: u8,
    trail: u8,
}

impl Jamo {
    /// Lead consonant index (0..19).
    pub fn lead(self) -> u8 {
        self.lead
    }

    /// Vowel index (0..21).
    pub fn vowel(self) -> u8 {
        self.vowel
    }

    /// Trailing consonant index (0..28, 0 = none).
    pub fn trail(self) -> u8 {
        self.trail
    }

    pub fn lead_symbol(self) -> char {
        LEADS[usize::from(self.lead)]
    }

    pub fn vowel_symbol(self) -> char {
        VOWELS[usize::from(self.vowel)]
    }

    /// `None` for open syllables such as 가.
    pub fn trail_symbol(self) -> Option<char> {
        TRAILS[usize::from(self.trail)]
    }

    /// Recompose into the precomposed syllable.
    pub fn syllable(self) -> char {
        let offset = (u32::from(self.lead) * VOWEL_COUNT + u32::from(self.vowel)) * TRAIL_COUNT
            + u32::from(self.trail);
        // In range by construction.
        char::from_u32(SYLLABLE_BASE + offset).unwrap_or('\u{FFFD}')
    }
}

impl std::fmt::Display for Jamo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.lead_symbol(), self.vowel_symbol())?;
        if let Some(t) = self.trail_symbol() {
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

/// Split a precomposed syllable into lead, vowel and trail indices.
///
/// Returns `None` for anything outside the syllable block: punctuation,
/// digits, Latin letters, standalone jamo, Hanja.
pub fn decompose(c: char) -> Option<Jamo> {
    let offset = (c as u32).checked_sub(SYLLABLE_BASE)?;
    if offset >= BLOCK_SIZE {
        return None;
    }
    let per_lead = VOWEL_COUNT * TRAIL_COUNT;
    Some(Jamo {
        lead: (offset / per_lead) as u8,
        vowel: ((offset % per_lead) / TRAIL_COUNT) as u8,
        trail: (offset % TRAIL_COUNT) as u8,
    })
}

/// Decompose the first character of `s`. Empty strings yield `None`.
pub fn decompose_str(s: &str) -> Option<Jamo> {
    s.chars().next().and_then(decompose)
}

/// Build a syllable from jamo indices, or `None` if any index is out of range.
pub fn compose(lead: u32, vowel: u32, trail: u32) -> Option<char> {
    if lead >= LEAD_COUNT || vowel >= VOWEL_COUNT || trail >= TRAIL_COUNT {
        return None;
    }
    char::from_u32(SYLLABLE_BASE + (lead * VOWEL_COUNT + vowel) * TRAIL_COUNT + trail)
}

/// Whether `c` is a precomposed Hangul syllable.
pub fn is_syllable(c: char) -> bool {
    decompose(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_bounds() {
        assert_eq!(BLOCK_SIZE, 11_172);
        let first = decompose('가').unwrap();
        assert_eq!((first.lead(), first.vowel(), first.trail()), (0, 0, 0));
        let last = decompose('힣').unwrap();
        assert_eq!((last.lead(), last.vowel(), last.trail()), (18, 20, 27));
    }

    #[test]
    fn just_outside_block_is_rejected() {
        assert!(decompose('\u{ABFF}').is_none());
        assert!(decompose('\u{D7A4}').is_none());
    }

    #[test]
    fn common_surnames_decompose() {
        let kim = decompose('김').unwrap();
        assert_eq!(kim.lead_symbol(), 'ㄱ');
        assert_eq!(kim.vowel_symbol(), 'ㅣ');
        assert_eq!(kim.trail_symbol(), Some('ㅁ'));

        let lee = decompose('이').unwrap();
        assert_eq!(lee.lead_symbol(), 'ㅇ');
        assert_eq!(lee.vowel_symbol(), 'ㅣ');
        assert_eq!(lee.trail_symbol(), None);
    }

    #[test]
    fn clustered_final() {
        let jamo = decompose('닭').unwrap();
        assert_eq!(jamo.lead_symbol(), 'ㄷ');
        assert_eq!(jamo.vowel_symbol(), 'ㅏ');
        assert_eq!(jamo.trail_symbol(), Some('ㄺ'));
        assert_eq!(jamo.to_string(), "ㄷㅏㄺ");
    }

    #[test]
    fn syllable_membership() {
        assert!(is_syllable('가'));
        assert!(is_syllable('힣'));
        assert!(!is_syllable('ㄱ'));
        assert!(!is_syllable('金'));
        assert!(!is_syllable('\u{D7A4}'));
    }

    #[test]
    fn non_syllables_are_none() {
        for c in ['A', '1', '!', ' ', 'ㄱ', 'ㅏ', '金', '\u{1100}'] {
            assert!(decompose(c).is_none(), "{c:?} should not decompose");
        }
        assert!(decompose_str("").is_none());
    }

    #[test]
    fn compose_inverts_decompose() {
        for c in ['가', '김', '닭', '힣', '뷁'] {
            let j = decompose(c).unwrap();
            assert_eq!(j.syllable(), c);
            assert_eq!(
                compose(j.lead().into(), j.vowel().into(), j.trail().into()),
                Some(c)
            );
        }
    }

    #[test]
    fn compose_rejects_out_of_range() {
        assert_eq!(compose(19, 0, 0), None);
        assert_eq!(compose(0, 21, 0), None);
        assert_eq!(compose(0, 0, 28), None);
    }
}
