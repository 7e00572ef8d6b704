mod table;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tongyin_core::{
    encode_alternatives, Classification, Config, Corpus, Engine, Segment, TableOracle,
    TransformOptions,
};

/// Ranks below this count as "common" in heteronym notes.
const COMMON_RANK: usize = 300;

/// Rewrite hanzi outside a ranked vocabulary with same-reading stand-ins.
#[derive(Parser)]
#[command(name = "tongyin")]
#[command(about = "Rewrites hanzi outside a ranked vocabulary with same-reading stand-ins")]
struct Args {
    /// Frequency-ranked corpus: a JSON array of single-character strings
    /// (nulls allowed)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Reading table: `char reading [reading ...]` per line, or a .bin file
    /// produced by --compile-readings
    #[arg(long)]
    readings: Option<PathBuf>,

    /// Convert --readings to a bincode table at this path, then exit
    #[arg(long)]
    compile_readings: Option<PathBuf>,

    /// TOML config file; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vocabulary rank cutoff (clamped to the corpus size)
    #[arg(long)]
    threshold: Option<usize>,

    /// Accept substitutes that match once the tone is dropped
    #[arg(long)]
    fold_tones: bool,

    /// Flag in-vocabulary heteronyms in annotated output
    #[arg(long)]
    highlight: bool,

    /// Print rewritten text only, without annotations
    #[arg(long)]
    plain: bool,

    /// Input file; reads lines interactively when omitted
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_toml(path)
            .map_err(|e| anyhow::anyhow!("loading config {}: {}", path.display(), e))?,
        None => Config::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    config.fold_tones |= args.fold_tones;
    config.highlight_ambiguous |= args.highlight;

    if let Some(out) = &args.compile_readings {
        let input = match &args.readings {
            Some(path) => path,
            None => bail!("--compile-readings needs --readings"),
        };
        let oracle = table::load_text(input)?;
        oracle
            .save_bincode(out)
            .map_err(|e| anyhow::anyhow!("writing {}: {}", out.display(), e))?;
        println!(
            "Wrote reading table to {} ({} characters)",
            out.display(),
            oracle.len()
        );
        return Ok(());
    }

    let engine = build_engine(&args, &config)?;
    let options = config.options();

    match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading input {}", path.display()))?;
            if args.plain {
                print!("{}", engine.transform_plain(&text, options.fold_tones));
            } else {
                let segments = engine.transform(&text, options);
                print!("{}", render_inline(&segments));
                let notes = collect_notes(&segments);
                if !notes.is_empty() {
                    println!();
                    for note in notes {
                        println!("  {}", note);
                    }
                }
            }
        }
        None => run_interactive(&engine, options, args.plain)?,
    }

    Ok(())
}

fn build_engine(args: &Args, config: &Config) -> Result<Engine<TableOracle>> {
    match (&args.corpus, &args.readings) {
        (Some(corpus_path), Some(readings_path)) => {
            let corpus = Corpus::load_json(corpus_path)?;
            let oracle = table::load(readings_path)?;
            println!(
                "✓ Loaded corpus ({} characters) and readings ({} characters)",
                corpus.len(),
                oracle.len()
            );
            Ok(Engine::new(corpus, oracle, config.threshold))
        }
        (None, None) => {
            let engine = Engine::load_demo(config.threshold);
            println!(
                "ℹ Using built-in demo data ({} characters)",
                engine.corpus().len()
            );
            Ok(engine)
        }
        _ => bail!("--corpus and --readings go together"),
    }
}

fn run_interactive(
    engine: &Engine<TableOracle>,
    options: TransformOptions,
    plain: bool,
) -> Result<()> {
    println!("═══════════════════════════════════════════════════");
    println!("  tongyin - vocabulary-bounded homophone rewrite");
    println!("═══════════════════════════════════════════════════");
    println!();
    println!(
        "Threshold {} | fold tones: {} | highlight: {}",
        engine.threshold(),
        on_off(options.fold_tones),
        on_off(options.highlight_ambiguous),
    );
    println!("Type text and press Enter. Press Ctrl+C to exit.");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let raw = line.context("reading stdin")?;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        if plain {
            println!("  → {}", engine.transform_plain(text, options.fold_tones));
        } else {
            let segments = engine.transform(text, options);
            println!("  → {}", render_inline(&segments));
            for note in collect_notes(&segments) {
                println!("    {}", note);
            }
        }
        println!();
    }
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Inline view: replacements in brackets, flagged heteronyms in braces.
fn render_inline(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(s) => out.push_str(s),
            Segment::LineBreak => out.push('\n'),
            Segment::Replaced {
                original,
                value,
                classification,
            } => {
                if *classification == Classification::Unresolved {
                    out.push_str(&format!("[{}?]", original));
                } else {
                    out.push_str(&format!("[{}→{}]", original, value));
                }
            }
            Segment::Ambiguous { value, .. } => {
                out.push_str(&format!("{{{}}}", value));
            }
        }
    }
    out
}

/// One note per distinct annotated character, in first-appearance order.
fn collect_notes(segments: &[Segment]) -> Vec<String> {
    let mut seen: HashSet<char> = HashSet::new();
    let mut notes = Vec::new();
    for segment in segments {
        match segment {
            Segment::Replaced {
                original,
                value,
                classification,
            } => {
                if !seen.insert(*original) {
                    continue;
                }
                if *classification == Classification::Unresolved {
                    notes.push(format!("{} has no usable stand-in", original));
                } else {
                    notes.push(format!("{} → {} [{}]", original, value, classification));
                }
            }
            Segment::Ambiguous {
                value,
                rank,
                alternatives,
            } => {
                if !seen.insert(*value) {
                    continue;
                }
                let rank_note = match rank {
                    Some(rank) if *rank < COMMON_RANK => format!("rank {}, common", rank),
                    Some(rank) => format!("rank {}", rank),
                    None => "unranked".to_string(),
                };
                notes.push(format!(
                    "{} is a heteronym ({}): {}",
                    value,
                    rank_note,
                    encode_alternatives(alternatives)
                ));
            }
            _ => {}
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_view_marks_replacements() {
        let engine = Engine::load_demo(30);
        let options = TransformOptions {
            fold_tones: false,
            highlight_ambiguous: true,
        };
        let segments = engine.transform("妳好", options);
        assert_eq!(render_inline(&segments), "[妳→你]{好}");
    }

    #[test]
    fn notes_dedup_repeated_characters() {
        let engine = Engine::load_demo(30);
        let segments = engine.transform("妳妳", TransformOptions::default());
        let notes = collect_notes(&segments);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], "妳 → 你 [ExactTone]");
    }
}
