mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "textdiff")]
#[command(about = "Compare token streams of two text files and show differences")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two text files token by token")]
    Diff {
        #[arg(help = "Path to the old/ground-truth file")]
        old: String,
        #[arg(help = "Path to the new/extracted file")]
        new: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, help = "Rearrange the new file's tokens to mirror the old order")]
        rearrange: bool,
        #[arg(
            long,
            value_name = "N",
            default_value_t = 0,
            help = "Treat tokens within this edit distance as equal"
        )]
        max_dist: u32,
        #[arg(
            long,
            value_name = "F",
            default_value_t = 1.0,
            help = "Treat tokens at or above this similarity as equal"
        )]
        min_sim: f64,
        #[arg(
            long,
            value_name = "REGEX",
            help = "Drop mismatch regions whose old side matches only these patterns (repeatable)"
        )]
        junk: Vec<String>,
        #[arg(
            long,
            value_name = "REGEX",
            help = "Shield matching phrases from normalization (repeatable)"
        )]
        protect: Vec<String>,
        #[arg(long, help = "Keep the original letter case")]
        keep_case: bool,
        #[arg(long, help = "Print precision/recall and distance/similarity")]
        stats: bool,
        #[arg(long, value_enum, default_value = "auto", help = "Colorize the token stream")]
        color: ColorChoice,
        #[arg(long, short, help = "Quiet mode: only show the summary")]
        quiet: bool,
        #[arg(long, short, help = "Verbose mode: list every mismatch region")]
        verbose: bool,
    },
    #[command(about = "Show the normalized token stream of a file")]
    Tokens {
        #[arg(help = "Path to the file")]
        path: String,
        #[arg(
            long,
            value_name = "REGEX",
            help = "Shield matching phrases from normalization (repeatable)"
        )]
        protect: Vec<String>,
        #[arg(long, help = "Keep the original letter case")]
        keep_case: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff {
            old,
            new,
            format,
            rearrange,
            max_dist,
            min_sim,
            junk,
            protect,
            keep_case,
            stats,
            color,
            quiet,
            verbose,
        } => commands::diff::run(commands::diff::DiffArgs {
            old_path: old,
            new_path: new,
            format,
            rearrange,
            max_dist,
            min_sim,
            junk,
            protect,
            keep_case,
            stats,
            color,
            quiet,
            verbose,
        }),
        Commands::Tokens {
            path,
            protect,
            keep_case,
        } => commands::tokens::run(&path, &protect, keep_case),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            // Exit code 1 means "differences found"; any failure is 2.
            ExitCode::from(2)
        }
    }
}
