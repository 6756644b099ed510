//! Static lookup tables: jamo stroke weights, Hanja strokes, hexagrams.
//!
//! Three tables are bundled into the binary via `include_str!`. Each one is
//! parsed and validated on first access and then shared read-only for the life
//! of the process. Replacement tables can be loaded from disk with the
//! `from_file` constructors; they go through the same validation.

pub mod hanja;
pub mod hexagram;
pub mod jamo;

use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};

pub use hanja::{HanjaEntry, HanjaTable};
pub use hexagram::{HexagramEntry, HexagramTable};
pub use jamo::JamoTable;

// ── Bundled tables ──────────────────────────────────────────────────────

const JAMO_TOML: &str = include_str!("../../data/tables/jamo.toml");
const HANJA_TOML: &str = include_str!("../../data/tables/hanja.toml");
const HEXAGRAM_TOML: &str = include_str!("../../data/tables/hexagram.toml");

static JAMO: OnceLock<Arc<JamoTable>> = OnceLock::new();
static HANJA: OnceLock<Arc<HanjaTable>> = OnceLock::new();
static HEXAGRAM: OnceLock<Arc<HexagramTable>> = OnceLock::new();

/// The bundled jamo stroke table.
pub fn bundled_jamo() -> TableResult<Arc<JamoTable>> {
    bundled(&JAMO, || JamoTable::from_toml_str(JAMO_TOML))
}

/// The bundled Hanja table.
pub fn bundled_hanja() -> TableResult<Arc<HanjaTable>> {
    bundled(&HANJA, || HanjaTable::from_toml_str(HANJA_TOML))
}

/// The bundled hexagram table.
pub fn bundled_hexagrams() -> TableResult<Arc<HexagramTable>> {
    bundled(&HEXAGRAM, || HexagramTable::from_toml_str(HEXAGRAM_TOML))
}

/// Raw TOML source of a bundled table, by id, for starting a replacement
/// table from the shipped one.
pub fn bundled_source(id: &str) -> Option<&'static str> {
    match id {
        "jamo" => Some(JAMO_TOML),
        "hanja" => Some(HANJA_TOML),
        "hexagram" => Some(HEXAGRAM_TOML),
        _ => None,
    }
}

fn bundled<T>(
    cell: &'static OnceLock<Arc<T>>,
    load: impl FnOnce() -> TableResult<T>,
) -> TableResult<Arc<T>> {
    if let Some(table) = cell.get() {
        return Ok(Arc::clone(table));
    }
    // A racing thread may parse too; the first one stored wins.
    let table = Arc::new(load()?);
    Ok(Arc::clone(cell.get_or_init(|| table)))
}

// ── Shared helpers ──────────────────────────────────────────────────────

/// Header carried by every table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub id: String,
    pub version: String,
    pub description: String,
}

pub(crate) fn read_table_file(path: &Path) -> TableResult<String> {
    std::fs::read_to_string(path).map_err(|e| TableError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

pub(crate) fn parse_error(table: &str, e: impl std::fmt::Display) -> TableError {
    TableError::Parse {
        table: table.to_string(),
        message: e.to_string(),
    }
}

/// The only `char` of `s`, if it has exactly one.
pub(crate) fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}
