//! Rich diagnostic error types for the myeonggyeong engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains. Note that bad *user*
//! input never surfaces here: unknown characters count as zero strokes and
//! missing hexagrams resolve to a neutral default. These errors are reserved
//! for broken tables and broken configuration.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::enrich::EnrichError;

/// Top-level error type for the myeonggyeong engine.
#[derive(Debug, Error, Diagnostic)]
pub enum MgError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Enrich(#[from] EnrichError),
}

// ---------------------------------------------------------------------------
// Table errors
// ---------------------------------------------------------------------------

/// A static lookup table failed to load or validate.
///
/// Raised once, at load time, before any analysis is served.
#[derive(Debug, Error, Diagnostic)]
pub enum TableError {
    #[error("failed to read table file: {path}")]
    #[diagnostic(
        code(mg::table::io),
        help("Check that the table file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table \"{table}\": {message}")]
    #[diagnostic(
        code(mg::table::parse),
        help("Check the TOML syntax. Duplicate keys are rejected by the parser.")
    )]
    Parse { table: String, message: String },

    #[error("table \"{table}\" has no {position} weight for '{symbol}'")]
    #[diagnostic(
        code(mg::table::missing_weight),
        help(
            "Every lead consonant, vowel and final consonant of the Hangul \
             syllable block needs exactly one stroke weight."
        )
    )]
    MissingWeight {
        table: String,
        position: &'static str,
        symbol: char,
    },

    #[error("table \"{table}\" lists unknown {position} symbol \"{symbol}\"")]
    #[diagnostic(
        code(mg::table::unknown_symbol),
        help(
            "Keys must be single compatibility jamo (e.g. \"ㄱ\", \"ㅏ\", \"ㄳ\") \
             that occur in that position of a Hangul syllable."
        )
    )]
    UnknownSymbol {
        table: String,
        position: &'static str,
        symbol: String,
    },

    #[error("lead consonant '{symbol}' appears in {count} element groups")]
    #[diagnostic(
        code(mg::table::element_partition),
        help("Each of the 19 lead consonants must belong to exactly one element group.")
    )]
    ElementPartition { symbol: char, count: usize },

    #[error("hanja \"{glyph}\" is not a single character")]
    #[diagnostic(
        code(mg::table::invalid_glyph),
        help("Each hanja entry holds exactly one glyph; list variants as separate entries.")
    )]
    InvalidGlyph { glyph: String },

    #[error("hanja '{glyph}' is listed more than once")]
    #[diagnostic(
        code(mg::table::duplicate_glyph),
        help("Keep one entry per glyph. Pick the reading used in names.")
    )]
    DuplicateGlyph { glyph: char },

    #[error("hexagram key \"{key}\" is not two digits in 1..=9")]
    #[diagnostic(
        code(mg::table::invalid_key),
        help(
            "Keys are formed from two reduced aggregates, each in 1..=base. \
             A reduced value is never 0, so keys like \"80\" can never match."
        )
    )]
    InvalidKey { key: String },
}

/// Convenience alias for table loading results.
pub type TableResult<T> = std::result::Result<T, TableError>;

/// Convenience alias for functions returning myeonggyeong results.
pub type MgResult<T> = std::result::Result<T, MgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_error_converts_to_mg_error() {
        let err = TableError::DuplicateGlyph { glyph: '金' };
        let mg: MgError = err.into();
        assert!(matches!(mg, MgError::Table(TableError::DuplicateGlyph { .. })));
    }

    #[test]
    fn config_error_converts_to_mg_error() {
        let err = ConfigError::ZeroCadence;
        let mg: MgError = err.into();
        assert!(matches!(mg, MgError::Config(ConfigError::ZeroCadence)));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = TableError::MissingWeight {
            table: "jamo".into(),
            position: "lead",
            symbol: 'ㅎ',
        };
        let msg = format!("{err}");
        assert!(msg.contains("jamo"));
        assert!(msg.contains("lead"));
        assert!(msg.contains('ㅎ'));
    }
}
