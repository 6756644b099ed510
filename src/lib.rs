// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # myeonggyeong
//!
//! A deterministic name-fortune engine for Korean names (성명학).
//!
//! ## Architecture
//!
//! - **Decomposition** (`hangul`): syllable → lead, vowel and trail jamo by block arithmetic
//! - **Stroke counting** (`stroke`): jamo weights for Hangul, table lookup for Hanja
//! - **Aggregates** (`aggregate`): the four stroke sums 원격, 형격, 이격, 정격
//! - **Hexagrams** (`hexagram`): wrap-to-base reduction and table resolution
//! - **Classifiers** (`classify`): sound element and stroke parity
//! - **Engine** (`engine`): assembles the ordered six-entry report
//!
//! Static data (`tables`) is bundled TOML, validated once on first access.
//!
//! ## Library usage
//!
//! ```no_run
//! use myeonggyeong::character::PersonName;
//! use myeonggyeong::engine::{EngineConfig, FortuneEngine};
//!
//! let engine = FortuneEngine::new(EngineConfig::default())?;
//! let name = PersonName::hangul("김", "민", "수");
//! for entry in engine.analyze(&name) {
//!     println!("{}: {} ({})", entry.title, entry.name, entry.status);
//! }
//! # Ok::<(), myeonggyeong::error::MgError>(())
//! ```

pub mod aggregate;
pub mod character;
pub mod classify;
pub mod config;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod gate;
pub mod hangul;
pub mod hexagram;
pub mod report;
pub mod stroke;
pub mod tables;
