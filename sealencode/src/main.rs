//! A CLI tool for encoding a digital seal profile
//! from header fields and feature values given on the command line.
//!
//! Usage:
//!
//! ```none
//! sealencode --profile-type RP \
//!     --issuing-country D --signer-country DE --signer-id TS \
//!     --cert-ref A1B2C --issue-date 2022-02-09 --signature-date 2022-03-01 \
//!     --feature "Machine readable zone=..." \
//!     --feature "Passport number=C01X00T47" \
//!     --output profile.bin
//! ```
use clap::Parser;
use seal::{Date, FeatureType, FeatureValue, ProfileType};
use snafu::{OptionExt, Report, ResultExt, Whatever};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

/// Exit code for when the profile data was rejected.
const ERROR_ENCODE: i32 = -2;

/// Encode a digital seal profile
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// The profile type
    /// (VISA, AAD, SIC, RP, RP_SUPP, ADDR_STICKER or POR_STICKER)
    #[arg(long = "profile-type", value_parser = parse_profile_type)]
    profile_type: ProfileType,
    /// Issuing country code (1-3 uppercase letters)
    #[arg(long = "issuing-country")]
    issuing_country: String,
    /// Signer country code (2 uppercase letters)
    #[arg(long = "signer-country")]
    signer_country: String,
    /// Signer identifier (2 alphanumeric characters)
    #[arg(long = "signer-id")]
    signer_id: String,
    /// Certificate reference
    #[arg(long = "cert-ref")]
    certificate_ref: String,
    /// Document issue date (YYYY-MM-DD)
    #[arg(long = "issue-date")]
    issue_date: String,
    /// Signature creation date (YYYY-MM-DD)
    #[arg(long = "signature-date")]
    signature_date: String,
    /// A feature value in the form "Name=Value"; repeat per feature
    #[arg(long = "feature")]
    features: Vec<String>,
    /// Where to write the encoded profile
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn parse_profile_type(code: &str) -> Result<ProfileType, String> {
    match code {
        "VISA" => Ok(ProfileType::Visa),
        "AAD" => Ok(ProfileType::ArrivalAttestation),
        "SIC" => Ok(ProfileType::SocialInsuranceCard),
        "RP" => Ok(ProfileType::ResidencePermit),
        "RP_SUPP" => Ok(ProfileType::SupplementarySheet),
        "ADDR_STICKER" => Ok(ProfileType::AddressStickerIdCard),
        "POR_STICKER" => Ok(ProfileType::PlaceOfResidenceStickerPassport),
        _ => Err(format!("unknown profile type `{}`", code)),
    }
}

fn main() {
    run().unwrap_or_else(|e| {
        eprintln!("{}", Report::from_error(e));
        std::process::exit(ERROR_ENCODE);
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

    let mut profile = seal::profile_template(app.profile_type)
        .whatever_context("Could not create the profile template")?;
    profile.header.issuing_country = app.issuing_country;
    profile.header.signer_country = app.signer_country;
    profile.header.signer_id = app.signer_id;
    profile.header.certificate_ref = app.certificate_ref;
    let issue_date: Date = app
        .issue_date
        .parse()
        .whatever_context("Invalid issue date")?;
    let signature_date: Date = app
        .signature_date
        .parse()
        .whatever_context("Invalid signature date")?;
    profile.header.issue_date = Some(issue_date);
    profile.header.signature_date = Some(signature_date);

    for entry in &app.features {
        let (name, text) = entry
            .split_once('=')
            .whatever_context(format!("Feature `{}` is not of the form Name=Value", entry))?;
        let feature = profile
            .feature(name)
            .whatever_context(format!(
                "Profile {} has no feature named `{}`",
                profile.profile_type, name
            ))?;
        let value = match feature.value_type {
            FeatureType::Integer => FeatureValue::Integer(
                text.parse()
                    .whatever_context(format!("Feature `{}` is not an integer", name))?,
            ),
            FeatureType::Date => FeatureValue::Date(
                text.parse()
                    .whatever_context(format!("Feature `{}` is not a date", name))?,
            ),
            _ => FeatureValue::Text(text.to_string()),
        };
        profile.set_value(name, value);
    }

    let encoded =
        seal::encode_profile(&profile).whatever_context("Could not encode the profile")?;
    fs::write(&app.output, &encoded).whatever_context("Could not write the encoded profile")?;
    tracing::info!(
        "encoded {} profile: {} byte(s) written to {}",
        profile.profile_type,
        encoded.len(),
        app.output.display()
    );
    Ok(())
}
