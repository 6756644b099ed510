//! Hexagram resolution: wrap two aggregates into digits, look up the key.
//!
//! Every aggregate is reduced with [`reduce`] before it becomes a key digit,
//! so a digit is always in `1..=base` and never 0. Which aggregates are
//! paired for each life stage, and under which base, is a [`PairingPolicy`].

use std::num::NonZeroU32;

use crate::aggregate::{Aggregate, Aggregates};
use crate::report::Status;
use crate::tables::{HexagramEntry, HexagramTable};

/// A non-zero modulus for [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Base(NonZeroU32);

impl Base {
    /// Eight trigrams.
    pub const EIGHT: Base = Base::new_const(8);
    pub const SIX: Base = Base::new_const(6);

    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Base)
    }

    /// Build from a literal. Panics on 0.
    pub const fn new_const(n: u32) -> Self {
        match NonZeroU32::new(n) {
            Some(b) => Base(b),
            None => panic!("hexagram base must be non-zero"),
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrap `n` into `1..=base`: multiples of the base map to the base itself.
pub fn reduce(n: u64, base: Base) -> u32 {
    let b = u64::from(base.get());
    match n % b {
        // r < b <= u32::MAX
        0 => base.get(),
        r => r as u32,
    }
}

/// A pair of reduced digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexagramCode {
    pub upper: u32,
    pub lower: u32,
}

impl HexagramCode {
    pub fn reduce_pair(upper: u64, lower: u64, upper_base: Base, lower_base: Base) -> Self {
        Self {
            upper: reduce(upper, upper_base),
            lower: reduce(lower, lower_base),
        }
    }

    /// Table key: the two digits concatenated.
    pub fn key(&self) -> String {
        format!("{}{}", self.upper, self.lower)
    }
}

impl std::fmt::Display for HexagramCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.upper, self.lower)
    }
}

/// Neutral entry for a code the table does not hold.
pub fn fallback_entry(code: HexagramCode) -> HexagramEntry {
    HexagramEntry {
        name: format!("운명의 괘 ({code})"),
        description: "꾸준한 노력이 결실을 맺는 시기입니다. 겸손함으로 덕을 쌓으십시오. \
                      현재 이 괘의 상세 데이터가 준비 중입니다."
            .to_string(),
        status: Status::Neutral,
    }
}

/// Entry for `code`, or the neutral fallback.
pub fn lookup(table: &HexagramTable, code: HexagramCode) -> HexagramEntry {
    let key = code.key();
    match table.get(&key) {
        Some(entry) => entry.clone(),
        None => {
            tracing::debug!(%key, "hexagram not in table, using fallback");
            fallback_entry(code)
        }
    }
}

/// Reduce two aggregates and resolve the resulting key. Never fails.
pub fn resolve_hexagram(
    table: &HexagramTable,
    upper: u64,
    lower: u64,
    upper_base: Base,
    lower_base: Base,
) -> HexagramEntry {
    lookup(table, HexagramCode::reduce_pair(upper, lower, upper_base, lower_base))
}

// ── Pairing policy ──────────────────────────────────────────────────────

/// One side of a pairing: which aggregate, reduced under which base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    pub aggregate: Aggregate,
    pub base: Base,
}

impl Operand {
    pub const fn new(aggregate: Aggregate, base: Base) -> Self {
        Self { aggregate, base }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.aggregate.label(), self.base)
    }
}

/// The two operands resolved for one life stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pairing {
    pub stage: Aggregate,
    pub upper: Operand,
    pub lower: Operand,
}

impl Pairing {
    pub fn code(&self, aggregates: &Aggregates) -> HexagramCode {
        HexagramCode::reduce_pair(
            aggregates.get(self.upper.aggregate),
            aggregates.get(self.lower.aggregate),
            self.upper.base,
            self.lower.base,
        )
    }

    pub fn resolve(
        &self,
        table: &HexagramTable,
        aggregates: &Aggregates,
    ) -> (HexagramCode, HexagramEntry) {
        let code = self.code(aggregates);
        (code, lookup(table, code))
    }
}

/// Four pairings, one per stage, in origin, growth, benefit, destiny order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairingPolicy {
    pairings: [Pairing; 4],
}

impl PairingPolicy {
    /// The shipped pairing set:
    ///
    /// | stage   | upper        | lower         |
    /// |---------|--------------|---------------|
    /// | origin  | growth / 8   | origin / 8    |
    /// | growth  | growth / 8   | benefit / 8   |
    /// | benefit | growth / 8   | destiny / 6   |
    /// | destiny | destiny / 8  | origin / 8    |
    pub const fn standard() -> Self {
        use Aggregate::*;
        const fn p(
            stage: Aggregate,
            upper: Aggregate,
            ub: Base,
            lower: Aggregate,
            lb: Base,
        ) -> Pairing {
            Pairing {
                stage,
                upper: Operand::new(upper, ub),
                lower: Operand::new(lower, lb),
            }
        }
        Self {
            pairings: [
                p(Origin, Growth, Base::EIGHT, Origin, Base::EIGHT),
                p(Growth, Growth, Base::EIGHT, Benefit, Base::EIGHT),
                p(Benefit, Growth, Base::EIGHT, Destiny, Base::SIX),
                p(Destiny, Destiny, Base::EIGHT, Origin, Base::EIGHT),
            ],
        }
    }

    /// A custom policy. `None` unless the stages are in report order.
    pub fn new(pairings: [Pairing; 4]) -> Option<Self> {
        let ordered = pairings
            .iter()
            .zip(Aggregate::ALL)
            .all(|(p, stage)| p.stage == stage);
        ordered.then_some(Self { pairings })
    }

    pub fn pairings(&self) -> &[Pairing; 4] {
        &self.pairings
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing> {
        self.pairings.iter()
    }
}

impl Default for PairingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
