use anyhow::{Context, Result};
use clap::Parser;
use hapfreq::analysis::AnalysisBuilder;
use hapfreq::prelude::*;
use log::error;
use std::path::PathBuf;
use std::process;

/// Extracts haplotype frequencies from a FASTA alignment
///
/// Every distinct sequence is a haplotype. Frequencies are computed for
/// all samples together (TOTAL) and, given a population map, for each
/// population.
#[derive(Parser, Debug)]
#[command(name = "hapfreq", author, version, about, long_about = None)]
struct Cli {
    /// Path to the FASTA file. For diplotypes, separate alleles as <sample>_A and <sample>_B
    #[arg(short, long, value_name = "FASTA")]
    fasta: Option<PathBuf>,

    /// Prefix for the output file, written as <PREFIX>_freq.tsv
    #[arg(short, long, value_name = "PREFIX", default_value = "out")]
    out: String,

    /// Path to a tab-delimited population map (sample, population)
    #[arg(short, long, value_name = "POPMAP")]
    popmap: Option<PathBuf>,

    /// Treat duplicate sample names as an error instead of keeping the last one
    #[arg(long)]
    strict: bool,

    /// Report population map entries without sequence data
    #[arg(long)]
    validate: bool,

    /// Decimal places of the frequencies in the table
    #[arg(long, default_value = "4")]
    precision: usize,

    /// Do not print the per-population frequencies
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: Cli) -> Result<()> {
    let fasta = cli
        .fasta
        .ok_or(Error::MissingRequiredInput("FASTA file (-f, --fasta)"))?;
    let out = PathBuf::from(format!("{}_freq.tsv", cli.out));

    let duplicates = if cli.strict {
        DuplicatePolicy::Error
    } else {
        DuplicatePolicy::Overwrite
    };
    let analysis = AnalysisBuilder::new()
        .duplicates(duplicates)
        .precision(cli.precision)
        .validate(cli.validate)
        .run(&fasta, cli.popmap.as_ref(), &mut LogReporter)
        .with_context(|| format!("Could not compute frequencies for {}", fasta.display()))?;

    if !cli.quiet {
        for population in analysis.frequencies() {
            println!("{}", population);
        }
    }

    analysis
        .write(&out)
        .with_context(|| format!("Could not write frequency table {}", out.display()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        error!("{:#}", e);
        process::exit(1);
    }
}
