use crate::output::{json, text};
use crate::{ColorChoice, OutputFormat};
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;
use textdiff::{DiffConfig, DiffSession, TokenizeConfig, Tokenizer};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

pub struct DiffArgs {
    pub old_path: String,
    pub new_path: String,
    pub format: OutputFormat,
    pub rearrange: bool,
    pub max_dist: u32,
    pub min_sim: f64,
    pub junk: Vec<String>,
    pub protect: Vec<String>,
    pub keep_case: bool,
    pub stats: bool,
    pub color: ColorChoice,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn run(args: DiffArgs) -> Result<ExitCode> {
    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };

    let mut config = DiffConfig::builder()
        .max_dist(args.max_dist)
        .min_sim(args.min_sim)
        .rearrange(args.rearrange);
    for pattern in &args.junk {
        config = config.junk_pattern(pattern.clone());
    }
    let config = config.build().context("Invalid diff configuration")?;

    let tokenizer = Tokenizer::new(&TokenizeConfig {
        lowercase: !args.keep_case,
        protect: args.protect.clone(),
    })
    .context("Invalid tokenizer configuration")?;

    let old_text = fs::read_to_string(&args.old_path)
        .with_context(|| format!("Failed to read old file: {}", args.old_path))?;
    let new_text = fs::read_to_string(&args.new_path)
        .with_context(|| format!("Failed to read new file: {}", args.new_path))?;

    let old_tokens = tokenizer.tokenize(&old_text);
    let new_tokens = tokenizer.tokenize(&new_text);

    let mut session = DiffSession::new();
    let report = session
        .diff(&old_tokens, &new_tokens, &config)
        .context("Diff failed")?;

    let stdout = io::stdout();
    let color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout.is_terminal(),
    };

    let mut writer = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Text => {
            text::write_text_report(&mut writer, &report, color, verbosity, args.stats)?
        }
        OutputFormat::Json => json::write_json_report(&mut writer, &report, args.stats)?,
    }
    writer.flush()?;

    if report.is_identical() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
