//! End-to-end seal assembly: encode, sign, split, decode.

use seal_core::{Date, HeaderInfo, ProfileType};
use seal_encoding::header::decode_header;
use seal_encoding::seal::{append_signature, parse_seal};
use seal_profiles::{decode_profile, encode_profile, profile_template};

fn signed_profile() -> (Vec<u8>, Vec<u8>) {
    let mut profile = profile_template(ProfileType::ArrivalAttestation).unwrap();
    profile.header = HeaderInfo {
        issuing_country: "D".into(),
        signer_country: "DE".into(),
        signer_id: "AT".into(),
        certificate_ref: "00001".into(),
        issue_date: Some(Date::new(2021, 11, 2).unwrap()),
        signature_date: Some(Date::new(2021, 11, 2).unwrap()),
    };
    profile.set_text(
        "Machine readable zone",
        "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".repeat(2),
    );
    profile.set_text("ARZ-number", "ABC123456DEF");
    let encoded = encode_profile(&profile).unwrap();
    // the signature size matches the declared algorithm: 512 bits
    let signature: Vec<u8> = (0..64).map(|i| (i * 7 + 3) as u8).collect();
    (encoded, signature)
}

#[test]
fn seal_splits_back_into_its_parts() {
    let (encoded, signature) = signed_profile();
    let seal = append_signature(&encoded, &signature).unwrap();
    assert_eq!(seal.len(), encoded.len() + 1 + 1 + signature.len());

    let (profile_part, signature_part) = parse_seal(&seal, signature.len()).unwrap();
    assert_eq!(profile_part, &encoded[..]);
    assert_eq!(signature_part, &signature[..]);
}

#[test]
fn header_and_profile_decode_from_a_complete_seal() {
    let (encoded, signature) = signed_profile();
    let seal = append_signature(&encoded, &signature).unwrap();

    // the header decoder ignores everything past the header
    let header = decode_header(&seal).unwrap();
    assert_eq!(header.profile_type, ProfileType::ArrivalAttestation);
    assert_eq!(header.info.issuing_country, "D<<");

    // the profile decoder stops at the signature tag
    let from_seal = decode_profile(&seal).unwrap();
    let from_profile = decode_profile(&encoded).unwrap();
    assert_eq!(from_seal, from_profile);
}

#[test]
fn signature_sizes_from_the_crypto_declarations() {
    let profile = profile_template(ProfileType::Visa).unwrap();
    let bits = profile.crypto.signature_algos[0].size;
    assert_eq!(bits, 448);
    let profile = profile_template(ProfileType::SocialInsuranceCard).unwrap();
    assert_eq!(profile.crypto.signature_algos[0].size, 512);
    assert_eq!(profile.crypto.hash_algos[0].algo, "SHA-256");
}
