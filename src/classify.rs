//! Sound-element and parity classifiers.
//!
//! The element of a syllable is decided by its lead consonant alone, through
//! the partition stored in the jamo table. Parity is the odd/even split of a
//! stroke count and is always taken per character, never per aggregate.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::hangul;
use crate::tables::JamoTable;

/// One of the five phonetic element groups (발음오행).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
    /// The character could not be decomposed.
    Unknown,
}

impl Element {
    /// The five real groups, in generating-cycle order.
    pub const CYCLE: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Element::Wood => "목(木)",
            Element::Fire => "화(火)",
            Element::Earth => "토(土)",
            Element::Metal => "금(金)",
            Element::Water => "수(水)",
            Element::Unknown => "미상",
        }
    }

    /// Short one-syllable label.
    pub fn short(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
            Element::Unknown => "?",
        }
    }

    fn cycle_index(self) -> Option<usize> {
        Self::CYCLE.iter().position(|e| *e == self)
    }

    /// The element this one generates (wood → fire → earth → metal → water → wood).
    pub fn generates(self) -> Option<Element> {
        self.cycle_index().map(|i| Self::CYCLE[(i + 1) % 5])
    }

    /// The element this one overcomes (wood → earth → water → fire → metal → wood).
    pub fn overcomes(self) -> Option<Element> {
        self.cycle_index().map(|i| Self::CYCLE[(i + 2) % 5])
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How one element flows into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRelation {
    /// 상생: one feeds the other.
    Generating,
    /// 상극: one suppresses the other.
    Overcoming,
    /// 비화: same element.
    Same,
    /// At least one side is unknown.
    Neutral,
}

impl ElementRelation {
    pub fn label(self) -> &'static str {
        match self {
            ElementRelation::Generating => "상생(相生)",
            ElementRelation::Overcoming => "상극(相剋)",
            ElementRelation::Same => "비화(比和)",
            ElementRelation::Neutral => "무관",
        }
    }
}

/// Classify a pair of neighbouring elements.
///
/// Any two distinct known elements are either adjacent on the generating
/// cycle or two steps apart on it, so only unknown input yields `Neutral`.
pub fn relation(from: Element, to: Element) -> ElementRelation {
    if from == Element::Unknown || to == Element::Unknown {
        return ElementRelation::Neutral;
    }
    if from == to {
        ElementRelation::Same
    } else if from.generates() == Some(to) || to.generates() == Some(from) {
        ElementRelation::Generating
    } else if from.overcomes() == Some(to) || to.overcomes() == Some(from) {
        ElementRelation::Overcoming
    } else {
        ElementRelation::Neutral
    }
}

/// Element group of a Hangul syllable, from its lead consonant.
pub fn element_group(table: &JamoTable, c: char) -> Element {
    match hangul::decompose(c) {
        Some(jamo) => table.lead_element(jamo.lead_symbol()),
        None => Element::Unknown,
    }
}

/// Element group of any input character.
///
/// Hanja are classified by the first syllable of their reading, since the
/// element is a property of the sound.
pub fn element_of(table: &JamoTable, c: &Character) -> Element {
    c.sound()
        .map(|s| element_group(table, s))
        .unwrap_or(Element::Unknown)
}

/// Odd/even classification of a stroke count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Even counts are yin (음), odd counts are yang (양).
    pub fn label(self) -> &'static str {
        match self {
            Parity::Even => "음(陰)",
            Parity::Odd => "양(陽)",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Parity::Even => "음",
            Parity::Odd => "양",
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn parity(n: u32) -> Parity {
    if n % 2 == 0 { Parity::Even } else { Parity::Odd }
}

/// A parity triple is balanced unless all three share the same parity.
pub fn parity_balanced(parities: [Parity; 3]) -> bool {
    !(parities[0] == parities[1] && parities[1] == parities[2])
}
