//! Stroke counting for Hangul syllables and Hanja glyphs.
//!
//! Counting is total: anything that cannot be decomposed or looked up counts
//! as 0 strokes rather than failing.

use std::sync::Arc;

use serde::Serialize;

use crate::character::Character;
use crate::classify::{self, Element};
use crate::error::TableResult;
use crate::hangul::{self, Jamo};
use crate::tables::{self, HanjaTable, JamoTable};

/// Per-jamo weights of one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrokeBreakdown {
    #[serde(skip)]
    pub jamo: Jamo,
    pub lead: u32,
    pub vowel: u32,
    pub trail: u32,
}

impl StrokeBreakdown {
    pub fn total(&self) -> u32 {
        self.lead + self.vowel + self.trail
    }
}

impl std::fmt::Display for StrokeBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}) + {}({})",
            self.jamo.lead_symbol(),
            self.lead,
            self.jamo.vowel_symbol(),
            self.vowel
        )?;
        if let Some(t) = self.jamo.trail_symbol() {
            write!(f, " + {t}({})", self.trail)?;
        }
        write!(f, " = {}", self.total())
    }
}

/// Stroke counter over a jamo table and a Hanja table.
#[derive(Debug, Clone)]
pub struct StrokeCounter {
    jamo: Arc<JamoTable>,
    hanja: Arc<HanjaTable>,
}

impl StrokeCounter {
    pub fn new(jamo: Arc<JamoTable>, hanja: Arc<HanjaTable>) -> Self {
        Self { jamo, hanja }
    }

    /// Counter over the bundled tables.
    pub fn bundled() -> TableResult<Self> {
        Ok(Self::new(tables::bundled_jamo()?, tables::bundled_hanja()?))
    }

    pub fn jamo_table(&self) -> &JamoTable {
        &self.jamo
    }

    pub fn hanja_table(&self) -> &HanjaTable {
        &self.hanja
    }

    /// Stroke count of one name slot.
    ///
    /// A picked Hanja carries its own count and is not looked up again.
    pub fn count(&self, c: &Character) -> u32 {
        match c {
            Character::Hangul(ch) => self.hangul(*ch),
            Character::Hanja(entry) => entry.strokes,
            Character::Unresolved => 0,
        }
    }

    /// Sum of lead, vowel and trail weights; 0 outside the syllable block.
    pub fn hangul(&self, c: char) -> u32 {
        self.breakdown(c).map(|b| b.total()).unwrap_or(0)
    }

    /// Table stroke count of a Hanja glyph; 0 if unknown.
    pub fn hanja(&self, glyph: char) -> u32 {
        self.hanja.strokes(glyph)
    }

    pub fn breakdown(&self, c: char) -> Option<StrokeBreakdown> {
        let jamo = hangul::decompose(c)?;
        Some(StrokeBreakdown {
            jamo,
            lead: self.jamo.lead_weight(jamo.lead_symbol()),
            vowel: self.jamo.vowel_weight(jamo.vowel_symbol()),
            trail: self.jamo.trail_weight(jamo.trail_symbol()),
        })
    }

    /// Sound element of one name slot.
    pub fn element(&self, c: &Character) -> Element {
        classify::element_of(&self.jamo, c)
    }
}
