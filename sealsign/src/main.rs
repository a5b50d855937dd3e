//! A CLI tool for appending a detached signature
//! to an encoded digital seal profile, producing a complete seal.
//!
//! The signature bytes are produced elsewhere
//! (see the profile's crypto declarations for the expected algorithms);
//! this tool only assembles the final byte sequence.
//!
//! Usage:
//!
//! ```none
//! sealsign --profile profile.bin --signature signature.bin --output seal.bin
//! ```
use clap::Parser;
use snafu::{Report, ResultExt, Whatever};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

/// Exit code for when the seal could not be assembled.
const ERROR_SIGN: i32 = -2;

/// Append a signature to an encoded profile
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// The encoded profile to read
    #[arg(short = 'p', long = "profile")]
    profile: PathBuf,
    /// The detached signature to append
    #[arg(short = 's', long = "signature")]
    signature: PathBuf,
    /// Where to write the signed seal
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    run().unwrap_or_else(|e| {
        eprintln!("{}", Report::from_error(e));
        std::process::exit(ERROR_SIGN);
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

    let profile = fs::read(&app.profile).whatever_context("Could not read the profile file")?;
    let signature =
        fs::read(&app.signature).whatever_context("Could not read the signature file")?;
    // reject inputs that do not even carry a seal header
    seal::decode_header(&profile).whatever_context("The input is not an encoded profile")?;
    let sealed = seal::append_signature(&profile, &signature)
        .whatever_context("Could not append the signature")?;
    fs::write(&app.output, &sealed).whatever_context("Could not write the seal")?;
    tracing::info!(
        "sealed {} profile byte(s) with a {} byte signature into {}",
        profile.len(),
        signature.len(),
        app.output.display()
    );
    Ok(())
}
