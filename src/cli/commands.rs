//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::phonetic::{compute, explain, glyph_tables, KeyLevel, PhoneticKeys, Segment};

use super::args::{Commands, OutputFormat};
use super::paths::{config_file_path_with_override, Config};

/// One `keys` output line with all three keys
#[derive(Serialize)]
struct KeyRecord<'a> {
    word: &'a str,
    #[serde(flatten)]
    keys: &'a PhoneticKeys,
}

/// One `keys` output line restricted to a single level
#[derive(Serialize)]
struct LevelRecord<'a> {
    word: &'a str,
    level: KeyLevel,
    key: &'a str,
}

/// Execute a CLI command
pub fn execute(command: Commands, config_path: Option<PathBuf>) -> Result<()> {
    // `config` must keep working even when the current file fails to parse
    if let Commands::Config {
        show,
        set_level,
        set_format,
        set_color,
        reset,
    } = command
    {
        return cmd_config(config_path, show, set_level, set_format, set_color, reset);
    }

    let config = Config::load(config_path)?;
    if !config.color_enabled() {
        colored::control::set_override(false);
    }

    match command {
        Commands::Keys {
            words,
            format,
            level,
        } => cmd_keys(words, &config.merge_with_cli(level, format)),
        Commands::Compare {
            first,
            second,
            level,
        } => cmd_compare(&first, &second, level.or(config.level)),
        Commands::Explain { word } => cmd_explain(&word),
        Commands::Tables => cmd_tables(),
        Commands::Config { .. } => unreachable!("config command is handled above"),
    }
}

/// Render the keys of one word as a single output line.
pub fn format_keys(word: &str, keys: &PhoneticKeys, config: &Config) -> Result<String> {
    let line = match (config.output_format(), config.level) {
        (OutputFormat::Text, Some(level)) => format!("{}\t{}", word, keys.key(level)),
        (OutputFormat::Text, None) => {
            format!("{}\t{}\t{}\t{}", word, keys.key0, keys.key1, keys.key2)
        }
        (OutputFormat::Json, Some(level)) => serde_json::to_string(&LevelRecord {
            word,
            level,
            key: keys.key(level),
        })?,
        (OutputFormat::Json, None) => serde_json::to_string(&KeyRecord { word, keys })?,
    };
    Ok(line)
}

/// Compute keys for every word read from `input`, one per line.
///
/// Blank lines are skipped; surrounding whitespace is trimmed.
pub fn write_keys_from_reader<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
) -> Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        let line = line.context("Failed to read word from input")?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        writeln!(output, "{}", format_keys(word, &compute(word), config)?)?;
        count += 1;
    }
    Ok(count)
}

/// Keys command
fn cmd_keys(words: Vec<String>, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if words.is_empty() {
        let stdin = io::stdin();
        write_keys_from_reader(stdin.lock(), &mut out, config)?;
        return Ok(());
    }

    for word in &words {
        writeln!(out, "{}", format_keys(word, &compute(word), config)?)?;
    }
    Ok(())
}

/// Compare command
fn cmd_compare(first: &str, second: &str, level: Option<KeyLevel>) -> Result<()> {
    let a = compute(first);
    let b = compute(second);

    let levels: Vec<KeyLevel> = match level {
        Some(level) => vec![level],
        None => KeyLevel::ALL.to_vec(),
    };

    println!("{} / {}", first.bold(), second.bold());
    println!();
    for level in levels {
        let (ka, kb) = (a.key(level), b.key(level));
        let verdict = if !ka.is_empty() && ka == kb {
            "match".green().bold()
        } else {
            "differ".red()
        };
        println!("  {:<6} {:<12} {:<12} {}", level.to_string(), ka.cyan(), kb.cyan(), verdict);
    }
    Ok(())
}

/// Explain command
fn cmd_explain(word: &str) -> Result<()> {
    println!("{}", word.bold().underline());
    println!();

    for trace in explain(word) {
        let rendered: Vec<String> = trace
            .segments
            .iter()
            .map(|seg| match seg {
                Segment::Pending(text) => text.yellow().to_string(),
                Segment::Resolved(token) => format!("{{{}}}", token).green().to_string(),
            })
            .collect();
        println!("  {:<36} {}", trace.stage, rendered.join(""));
    }

    let keys = compute(word);
    println!();
    println!("  key0: {}", keys.key0.cyan());
    println!("  key1: {}", keys.key1.cyan());
    println!("  key2: {}", keys.key2.cyan());
    Ok(())
}

/// Tables command
fn cmd_tables() -> Result<()> {
    for table in glyph_tables() {
        println!(
            "{} ({} entries)",
            table.name.bold().underline(),
            table.len()
        );
        for (glyph, token) in table.iter() {
            let token = if token.is_empty() { "-" } else { token };
            println!("  {:<6} {}", glyph, token.green());
        }
        println!();
    }
    Ok(())
}

/// Config command
fn cmd_config(
    config_path: Option<PathBuf>,
    show: bool,
    set_level: Option<KeyLevel>,
    set_format: Option<OutputFormat>,
    set_color: Option<bool>,
    reset: bool,
) -> Result<()> {
    let path = config_file_path_with_override(config_path)?;

    if reset {
        let config = Config::default();
        config.save_to(&path)?;
        println!("{}", "Configuration reset to defaults".green().bold());
        println!();
        print_config(&config, &path);
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;
    let mut changed = false;

    if let Some(level) = set_level {
        config.level = Some(level);
        println!("  Set default level: {}", level.to_string().green());
        changed = true;
    }

    if let Some(format) = set_format {
        config.format = Some(format);
        println!("  Set default format: {}", format.to_string().green());
        changed = true;
    }

    if let Some(color) = set_color {
        config.color = Some(color);
        println!("  Set colored output: {}", color.to_string().green());
        changed = true;
    }

    if changed {
        config.save_to(&path)?;
        println!();
        println!("{}", "Configuration saved".green().bold());
    }

    if show || !changed {
        if changed {
            println!();
        }
        print_config(&config, &path);
    }

    Ok(())
}

fn print_config(config: &Config, path: &std::path::Path) {
    println!("{}", "Current Configuration:".bold().underline());
    println!();
    println!("  Config File: {}", path.display().to_string().cyan());

    let level = config
        .level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "(all)".to_string());
    println!("  Level:       {}", level.yellow());
    println!("  Format:      {}", config.output_format().to_string().yellow());
    println!("  Color:       {}", config.color_enabled().to_string().yellow());
}
