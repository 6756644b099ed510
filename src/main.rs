//! myeonggyeong CLI: name-fortune analysis from the terminal.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use unicode_normalization::UnicodeNormalization;

use myeonggyeong::character::{Character, PersonName};
use myeonggyeong::config::Config;
use myeonggyeong::engine::FortuneEngine;
use myeonggyeong::enrich::{Enricher, NoEnrichment, StaticEnrichment};
use myeonggyeong::gate::{GateDecision, UsageCount};
use myeonggyeong::hangul;
use myeonggyeong::hexagram::{self, HexagramCode};
use myeonggyeong::report;
use myeonggyeong::tables;

const DEFAULT_CONFIG_PATH: &str = "myeonggyeong.toml";
const INTERSTITIAL_NOTICE: &str = "무료 서비스 운영을 위해 후원 광고가 송출 중입니다.";

#[derive(Parser)]
#[command(name = "myeonggyeong", version, about = "Korean name-fortune stroke engine")]
struct Cli {
    /// TOML config file (pairing policy, gate cadence, table overrides).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a name: either one full name ("김민수") or three slots.
    Analyze {
        /// Surname and given-name characters.
        #[arg(required = true, num_args = 1..=3)]
        names: Vec<String>,

        /// Treat the three slots as Hanja glyphs.
        #[arg(long)]
        hanja: bool,

        /// Print the reading as JSON.
        #[arg(long)]
        json: bool,

        /// Number of analyses run before this one, for interstitial cadence.
        #[arg(long)]
        uses: Option<u64>,

        /// JSON commentary fixture for enrichment.
        #[arg(long)]
        commentary: Option<PathBuf>,
    },

    /// Analyze one full name per line of a file, printing JSON lines.
    Batch { file: PathBuf },

    /// Show per-syllable stroke counts.
    Strokes {
        text: String,

        /// Show the jamo weights behind each count.
        #[arg(long)]
        explain: bool,
    },

    /// Hanja table lookup.
    Hanja {
        #[command(subcommand)]
        action: HanjaAction,
    },

    /// Show a hexagram entry by key (e.g. "71"), or list them all.
    Hexagram {
        key: Option<String>,

        #[arg(long)]
        list: bool,
    },

    /// Print a bundled table as TOML, as a starting point for a replacement.
    Table {
        /// Table id: jamo, hanja or hexagram.
        id: String,
    },

    /// Config file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show engine info.
    Info,
}

#[derive(Subcommand)]
enum HanjaAction {
    /// Find Hanja by reading or glyph.
    Search { term: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Write the default config.
    Init {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    // stdout is reserved for reports; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            names,
            hanja,
            json,
            uses,
            commentary,
        } => {
            let gate = config.gate()?;
            let engine = config.into_engine()?;
            let name = if hanja {
                hanja_name(&engine, &names)?
            } else {
                hangul_name(&names)?
            };

            if let Some(uses) = uses {
                let (count, decision) = gate.record(UsageCount(uses));
                if decision == GateDecision::Interstitial {
                    eprintln!("{INTERSTITIAL_NOTICE}");
                }
                tracing::info!(%count, "usage recorded");
            }

            let enricher: Box<dyn Enricher> = match commentary {
                Some(path) => Box::new(StaticEnrichment::from_json_file(&path)?),
                None => Box::new(NoEnrichment),
            };
            let reading = engine.analyze_with(&name, enricher.as_ref());

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&reading).into_diagnostic()?
                );
            } else {
                let strokes = engine.strokes(&name);
                let slots: Vec<String> = name
                    .chars()
                    .iter()
                    .zip(strokes)
                    .map(|(c, n)| match c.glyph() {
                        Some(g) => format!("{g}({n})"),
                        None => format!("_({n})"),
                    })
                    .collect();
                println!("{}  {}", reading.name, slots.join(" "));
                println!();
                println!("{}", report::render_text(&reading.report));
                if let Some(text) = &reading.commentary {
                    println!();
                    println!("{text}");
                }
            }
        }

        Commands::Batch { file } => {
            let engine = config.into_engine()?;
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let mut names = Vec::new();
            for (lineno, line) in content.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match PersonName::from_hangul_str(line) {
                    Some(name) => names.push(name),
                    None => tracing::warn!(line = lineno + 1, text = line, "skipping malformed name"),
                }
            }
            for (name, report) in names.iter().zip(engine.analyze_batch(&names)) {
                let row = serde_json::json!({ "name": name.to_string(), "report": report });
                println!("{row}");
            }
        }

        Commands::Strokes { text, explain } => {
            let engine = config.into_engine()?;
            let counter = engine.counter();
            let mut total = 0u64;
            for c in text.nfc().filter(|c| !c.is_whitespace()) {
                if !hangul::is_syllable(c) {
                    println!("{c}  0  (not a Hangul syllable)");
                    continue;
                }
                let n = counter.hangul(c);
                total += u64::from(n);
                match counter.breakdown(c) {
                    Some(b) if explain => println!("{c}  {} = {b}", b.jamo),
                    _ => println!("{c}  {n}"),
                }
            }
            println!("합계  {total}");
        }

        Commands::Hanja {
            action: HanjaAction::Search { term },
        } => {
            let engine = config.into_engine()?;
            let hits = engine.hanja_table().search(&term);
            if hits.is_empty() {
                println!("No hanja found for \"{term}\".");
            }
            for entry in hits {
                println!("{entry}");
            }
        }

        Commands::Hexagram { key, list } => {
            let engine = config.into_engine()?;
            let table = engine.hexagram_table();
            if list {
                for (key, entry) in table.iter() {
                    println!("{key}  {}  {}", entry.status, entry.name);
                }
                return Ok(());
            }
            let Some(key) = key else {
                miette::bail!("Give a hexagram key such as 71, or pass --list.");
            };
            let code = parse_key(&key)?;
            let entry = hexagram::lookup(table, code);
            println!("{}  [{}]", entry.name, entry.status);
            println!("{}", entry.description);
        }

        Commands::Table { id } => match tables::bundled_source(&id) {
            Some(src) => print!("{src}"),
            None => miette::bail!("Unknown table \"{id}\". Expected jamo, hanja or hexagram."),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let label = cli.config.as_deref().unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
                print!("{}", config.to_toml(label)?);
            }
            ConfigAction::Init { path, force } => {
                if path.exists() && !force {
                    miette::bail!(
                        "{} already exists. Pass --force to overwrite it.",
                        path.display()
                    );
                }
                Config::default().save(&path)?;
                println!("Wrote default config to {}", path.display());
            }
        },

        Commands::Info => {
            let engine = config.into_engine()?;
            print!("{}", engine.info());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn hangul_name(names: &[String]) -> Result<PersonName> {
    match names {
        [full] => match PersonName::from_hangul_str(full) {
            Some(name) => Ok(name),
            None => miette::bail!(
                "\"{full}\" is not a three-character name. Pass surname and given name as three arguments instead."
            ),
        },
        [s, n1, n2] => {
            let name = PersonName::hangul(s, n1, n2);
            if !name.is_complete() {
                return Err(miette::miette!(
                    help = "Fill in the surname and both given-name characters.",
                    "성함을 입력하세요."
                ));
            }
            Ok(name)
        }
        _ => miette::bail!("Expected one full name or three characters."),
    }
}

/// Every Hanja slot must resolve before the engine sees it.
fn hanja_name(engine: &FortuneEngine, names: &[String]) -> Result<PersonName> {
    let glyphs: Vec<char> = match names {
        [full] => full.nfc().filter(|c| !c.is_whitespace()).collect(),
        _ => names.iter().filter_map(|s| s.trim().chars().next()).collect(),
    };
    let [s, n1, n2] = glyphs.as_slice() else {
        miette::bail!("Expected exactly three Hanja.");
    };
    let pick = |g: char| match engine.resolve_hanja(g) {
        Some(entry) => Ok(Character::hanja(entry)),
        None => Err(miette::miette!(
            help = "Find the glyph with `myeonggyeong hanja search <reading>`.",
            "Unknown hanja '{g}'."
        )),
    };
    Ok(PersonName::new(pick(*s)?, pick(*n1)?, pick(*n2)?))
}

fn parse_key(key: &str) -> Result<HexagramCode> {
    let digits: Vec<u32> = key.chars().filter_map(|c| c.to_digit(10)).collect();
    match digits.as_slice() {
        [upper, lower] if key.chars().count() == 2 && *upper > 0 && *lower > 0 => Ok(HexagramCode {
            upper: *upper,
            lower: *lower,
        }),
        _ => miette::bail!("\"{key}\" is not a hexagram key. Keys are two digits 1-9, e.g. 71."),
    }
}
