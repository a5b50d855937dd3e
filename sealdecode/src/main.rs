//! A CLI tool for decoding an encoded digital seal profile
//! and printing its header and features in a human readable form.
//!
//! The input may be an encoded profile or a complete seal;
//! in the latter case the signature suffix is ignored.
//!
//! Usage:
//!
//! ```none
//! sealdecode --input profile.bin
//! sealdecode --input seal.bin --output decoded.txt
//! ```
use clap::Parser;
use seal::{FeatureType, ProfileInfo};
use snafu::{Report, ResultExt, Whatever};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::Level;

/// Exit code for when the input could not be decoded.
const ERROR_DECODE: i32 = -2;

/// Decode a digital seal profile
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// The encoded profile (or complete seal) to read
    #[arg(short = 'i', long = "input")]
    input: PathBuf,
    /// Write the decoded profile to this file instead of standard output
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn render(profile: &ProfileInfo) -> String {
    let mut out = String::new();
    let header = &profile.header;
    let _ = writeln!(out, "Profile: {}", profile.profile_type);
    let _ = writeln!(out, "----Header----");
    let _ = writeln!(
        out,
        "Signer id: {} | Signer country: {}",
        header.signer_id, header.signer_country
    );
    let _ = writeln!(
        out,
        "Cert ref: {} | Issuing country: {}",
        header.certificate_ref, header.issuing_country
    );
    if let Some(date) = header.issue_date {
        let _ = writeln!(out, "Issue date: {}", date);
    }
    if let Some(date) = header.signature_date {
        let _ = writeln!(out, "Signature date: {}", date);
    }
    let _ = writeln!(out, "----Features----");
    for feature in &profile.features {
        match feature.value_type {
            FeatureType::Integer => {
                let _ = writeln!(out, "{}: {}", feature.name, feature.value_int());
            }
            FeatureType::Date => match feature.value_date() {
                Some(date) => {
                    let _ = writeln!(out, "{}: {}", feature.name, date);
                }
                None => {
                    let _ = writeln!(out, "{}:", feature.name);
                }
            },
            _ => {
                let _ = writeln!(out, "{}: {}", feature.name, feature.value_str());
            }
        }
    }
    out
}

fn main() {
    run().unwrap_or_else(|e| {
        eprintln!("{}", Report::from_error(e));
        std::process::exit(ERROR_DECODE);
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

    let data = fs::read(&app.input).whatever_context("Could not read the input file")?;
    let profile = seal::decode_profile(&data).whatever_context("Could not decode the profile")?;
    let rendered = render(&profile);
    match &app.output {
        Some(path) => {
            fs::write(path, rendered).whatever_context("Could not write the output file")?
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
