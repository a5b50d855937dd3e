//! A CLI tool for splitting a signed seal
//! into its encoded-profile and signature files.
//!
//! Usage:
//!
//! ```none
//! sealparse --input seal.bin --length 64 \
//!     --profile profile.bin --signature signature.bin
//! ```
use clap::Parser;
use snafu::{Report, ResultExt, Whatever};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

/// Exit code for when the seal could not be split.
const ERROR_PARSE: i32 = -2;

/// Split a signed seal into encoded profile and signature
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// The signed seal to read
    #[arg(short = 'i', long = "input")]
    input: PathBuf,
    /// The signature length in bytes
    #[arg(short = 'l', long = "length")]
    length: usize,
    /// Where to write the encoded profile
    #[arg(long = "profile")]
    profile: PathBuf,
    /// Where to write the signature
    #[arg(long = "signature")]
    signature: PathBuf,
    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    run().unwrap_or_else(|e| {
        eprintln!("{}", Report::from_error(e));
        std::process::exit(ERROR_PARSE);
    });
}

fn run() -> Result<(), Whatever> {
    let app = App::parse();
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(if app.verbose {
                Level::DEBUG
            } else {
                Level::INFO
            })
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")?;

    let seal_bytes = fs::read(&app.input).whatever_context("Could not read the input file")?;
    let (profile, signature) = seal::parse_seal(&seal_bytes, app.length)
        .whatever_context("Could not split the seal")?;
    fs::write(&app.profile, profile).whatever_context("Could not write the profile file")?;
    fs::write(&app.signature, signature)
        .whatever_context("Could not write the signature file")?;
    tracing::info!(
        "split {} seal byte(s) into {} profile byte(s) and {} signature byte(s)",
        seal_bytes.len(),
        profile.len(),
        signature.len()
    );
    Ok(())
}
