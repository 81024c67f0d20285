use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use textdiff::{TokenizeConfig, Tokenizer};

pub fn run(path: &str, protect: &[String], keep_case: bool) -> Result<ExitCode> {
    let tokenizer = Tokenizer::new(&TokenizeConfig {
        lowercase: !keep_case,
        protect: protect.to_vec(),
    })
    .context("Invalid tokenizer configuration")?;

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;

    let mut writer = BufWriter::new(io::stdout().lock());
    for token in tokenizer.tokenize(&content) {
        writeln!(writer, "{}", token)?;
    }
    writer.flush()?;
    Ok(ExitCode::SUCCESS)
}
