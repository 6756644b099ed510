//! The four stroke aggregates (원격, 형격, 이격, 정격).

use serde::{Deserialize, Serialize};

/// Names one of the four aggregates. Also names the life stage whose
/// report entry is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Origin,
    Growth,
    Benefit,
    Destiny,
}

impl Aggregate {
    /// All four, in report order.
    pub const ALL: [Aggregate; 4] = [
        Aggregate::Origin,
        Aggregate::Growth,
        Aggregate::Benefit,
        Aggregate::Destiny,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Aggregate::Origin => "원격(元格)",
            Aggregate::Growth => "형격(亨格)",
            Aggregate::Benefit => "이격(利格)",
            Aggregate::Destiny => "정격(貞格)",
        }
    }

    /// Report title of the life stage.
    pub fn stage_title(self) -> &'static str {
        match self {
            Aggregate::Origin => "초년운 (元格)",
            Aggregate::Growth => "중년운 (亨格)",
            Aggregate::Benefit => "장년운 (利格)",
            Aggregate::Destiny => "총운 (貞格)",
        }
    }
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Stroke sums over pairs and the triple of a name.
///
/// Widened to `u64` so that no `u32` input can overflow the triple sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Aggregates {
    /// given_first + given_second
    pub origin: u64,
    /// surname + given_first
    pub growth: u64,
    /// surname + given_second
    pub benefit: u64,
    /// all three
    pub destiny: u64,
}

impl Aggregates {
    pub fn get(&self, which: Aggregate) -> u64 {
        match which {
            Aggregate::Origin => self.origin,
            Aggregate::Growth => self.growth,
            Aggregate::Benefit => self.benefit,
            Aggregate::Destiny => self.destiny,
        }
    }
}

pub fn compute_aggregates(surname: u32, given_first: u32, given_second: u32) -> Aggregates {
    let (s, n1, n2) = (
        u64::from(surname),
        u64::from(given_first),
        u64::from(given_second),
    );
    Aggregates {
        origin: n1 + n2,
        growth: s + n1,
        benefit: s + n2,
        destiny: s + n1 + n2,
    }
}
