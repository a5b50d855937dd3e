//! Round-trip coverage for every registered profile.

use seal_core::{Date, HeaderInfo, ProfileInfo, ProfileType};
use seal_profiles::{decode_profile, encode_profile, profile_template, supported_profiles, Error};

/// A header whose issuing country is already 3 characters,
/// so that decoding returns it unchanged.
fn sample_header(certificate_ref: &str) -> HeaderInfo {
    HeaderInfo {
        issuing_country: "UTO".into(),
        signer_country: "UT".into(),
        signer_id: "01".into(),
        certificate_ref: certificate_ref.into(),
        issue_date: Some(Date::new(2022, 2, 9).unwrap()),
        signature_date: Some(Date::new(2022, 3, 1).unwrap()),
    }
}

fn mrz_72() -> String {
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".repeat(2)
}

fn cert_ref_for(profile_type: ProfileType) -> &'static str {
    // legacy headers fix the certificate reference at five characters
    match profile_type.header_version() {
        0x02 => "ABCDE",
        _ => "A1",
    }
}

fn populated(profile_type: ProfileType) -> ProfileInfo {
    let mut profile = profile_template(profile_type).unwrap();
    profile.header = sample_header(cert_ref_for(profile_type));
    match profile_type {
        ProfileType::Visa => {
            let mut mrz = mrz_72();
            mrz.replace_range(64.., "<<<<<<<<");
            profile.set_text("Machine readable zone", mrz);
            profile.set_int("Duration of stay (Day)", 14);
            profile.set_int("Duration of stay (Month)", 2);
            profile.set_int("Duration of stay (Year)", 0);
            profile.set_text("Passport number", "C01X00T47");
        }
        ProfileType::ArrivalAttestation => {
            profile.set_text("Machine readable zone", mrz_72());
            profile.set_text("ARZ-number", "ABC123456DEF");
        }
        ProfileType::SocialInsuranceCard => {
            profile.set_text("Social insurance number", "65180539W088");
            profile.set_text("Surname", "Mustermann");
            profile.set_text("First name", "Erika");
            profile.set_text("Name at birth", "Gabler");
        }
        ProfileType::ResidencePermit | ProfileType::SupplementarySheet => {
            profile.set_text("Machine readable zone", mrz_72());
            profile.set_text("Passport number", "C01X00T47");
        }
        ProfileType::AddressStickerIdCard | ProfileType::PlaceOfResidenceStickerPassport => {
            profile.set_text("Document number", "T22000129");
            profile.set_text("Official municipality code number", "05315000");
            profile.set_text("Postal code", "53175");
        }
    }
    profile
}

#[test]
fn registry_lists_all_seven_profiles() {
    let entries = supported_profiles();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0].name, "Visa");
    assert_eq!(entries[1].name, "Arrival attestation document");
    assert!(entries
        .iter()
        .any(|e| e.profile_type == ProfileType::PlaceOfResidenceStickerPassport));
}

#[test]
fn every_profile_round_trips() {
    for profile_type in ProfileType::ALL {
        let profile = populated(profile_type);
        let encoded = encode_profile(&profile).unwrap();
        let decoded = decode_profile(&encoded).unwrap();
        assert_eq!(decoded, profile, "round trip of {}", profile_type);
    }
}

#[test]
fn header_discriminator_is_encoded_at_the_end_of_the_header() {
    let encoded = encode_profile(&populated(ProfileType::ArrivalAttestation)).unwrap();
    // legacy header: 12 fixed bytes plus the 6-byte signer block
    assert_eq!(encoded[16], 0xFD);
    assert_eq!(encoded[17], 0x02);
    let decoded = decode_profile(&encoded).unwrap();
    assert_eq!(decoded.profile_type, ProfileType::ArrivalAttestation);
}

#[test]
fn visa_mrz_keeps_64_characters_and_pads_the_rest() {
    let mut profile = populated(ProfileType::Visa);
    // data in the trailing eight positions is not carried over the wire
    let mut mrz = mrz_72();
    mrz.replace_range(64.., "KLMNOPQR");
    profile.set_text("Machine readable zone", mrz.clone());
    let encoded = encode_profile(&profile).unwrap();
    let decoded = decode_profile(&encoded).unwrap();
    let decoded_mrz = decoded.feature("Machine readable zone").unwrap().value_str();
    assert_eq!(decoded_mrz.len(), 72);
    assert_eq!(&decoded_mrz[..64], &mrz[..64]);
    assert_eq!(&decoded_mrz[64..], "<<<<<<<<");
}

#[test]
fn visa_duration_sentinels() {
    let mut profile = populated(ProfileType::Visa);
    profile.set_int("Duration of stay (Day)", 0xFF);
    profile.set_int("Duration of stay (Month)", 0xFF);
    profile.set_int("Duration of stay (Year)", 0xFF);
    let encoded = encode_profile(&profile).unwrap();
    // header (18 bytes with a 2-char cert ref), MRZ block (2 + 44), tag + length
    let duration_offset = 18 + 2 + 44 + 2;
    assert_eq!(
        &encoded[duration_offset..duration_offset + 3],
        &[0xFF, 0xFF, 0xFF]
    );
    let decoded = decode_profile(&encoded).unwrap();
    assert_eq!(
        decoded.feature("Duration of stay (Day)").unwrap().value_int(),
        0xFF
    );

    // air transit
    profile.set_int("Duration of stay (Day)", 0xFE);
    profile.set_int("Duration of stay (Month)", 0xFE);
    profile.set_int("Duration of stay (Year)", 0xFE);
    let encoded = encode_profile(&profile).unwrap();
    assert_eq!(
        &encoded[duration_offset..duration_offset + 3],
        &[0xFE, 0xFE, 0xFE]
    );

    // a mixed sentinel is rejected
    profile.set_int("Duration of stay (Day)", 0xFF);
    profile.set_int("Duration of stay (Month)", 5);
    profile.set_int("Duration of stay (Year)", 0xFF);
    assert!(matches!(
        encode_profile(&profile),
        Err(Error::WrongInput { .. })
    ));
}

#[test]
fn social_insurance_card_omits_equal_name_at_birth() {
    let mut profile = populated(ProfileType::SocialInsuranceCard);
    let with_different_name = encode_profile(&profile).unwrap();

    profile.set_text("Name at birth", "Mustermann");
    let with_equal_name = encode_profile(&profile).unwrap();
    // the tag, the length byte and the six bytes of "Gabler" disappear
    assert_eq!(with_equal_name.len() + 2 + 6, with_different_name.len());

    // the decoder reports the implied value
    let decoded = decode_profile(&with_equal_name).unwrap();
    assert_eq!(
        decoded.feature("Name at birth").unwrap().value_str(),
        "Mustermann"
    );
    assert_eq!(decoded, profile);
}

#[test]
fn social_insurance_card_keeps_utf8_names() {
    let mut profile = populated(ProfileType::SocialInsuranceCard);
    profile.set_text("Surname", "Müller-Lüdenscheidt");
    profile.set_text("First name", "Jürgen");
    profile.set_text("Name at birth", "Großkreutz");
    let decoded = decode_profile(&encode_profile(&profile).unwrap()).unwrap();
    assert_eq!(decoded, profile);
}

#[test]
fn unknown_feature_tags_are_skipped() {
    let profile = populated(ProfileType::ResidencePermit);
    let encoded = encode_profile(&profile).unwrap();
    let header_len = {
        let decoded = seal_encoding::header::decode_header(&encoded).unwrap();
        decoded.byte_len
    };
    // splice an unknown feature block right after the header
    let mut spliced = encoded[..header_len].to_vec();
    spliced.extend_from_slice(&[0x7E, 0x02, 0xAB, 0xCD]);
    spliced.extend_from_slice(&encoded[header_len..]);
    let decoded = decode_profile(&spliced).unwrap();
    assert_eq!(decoded, profile);
}

#[test]
fn missing_required_feature_is_detected() {
    let profile = populated(ProfileType::ResidencePermit);
    let encoded = encode_profile(&profile).unwrap();
    // the passport number block is the last 8 bytes (tag, length, 6 C40 bytes)
    let truncated = &encoded[..encoded.len() - 8];
    assert!(matches!(
        decode_profile(truncated),
        Err(Error::RequiredFeatureNotFound { .. })
    ));
}

#[test]
fn schema_tampering_is_rejected() {
    let mut profile = populated(ProfileType::ResidencePermit);
    profile.feature_mut("Passport number").unwrap().max_length = 10;
    assert!(matches!(
        encode_profile(&profile),
        Err(Error::FeatureDataDoesNotMatchProfile { .. })
    ));

    let mut profile = populated(ProfileType::ResidencePermit);
    profile.features.remove(1);
    assert!(matches!(
        encode_profile(&profile),
        Err(Error::InvalidFeatureCount { .. })
    ));
}

#[test]
fn invalid_values_are_rejected_before_encoding() {
    let mut profile = populated(ProfileType::ResidencePermit);
    profile.set_text("Passport number", "c01x00t47");
    assert!(matches!(
        encode_profile(&profile),
        Err(Error::Validation { .. })
    ));

    let mut profile = populated(ProfileType::ResidencePermit);
    profile.set_text("Passport number", "C01X00T4");
    assert!(matches!(
        encode_profile(&profile),
        Err(Error::Validation { .. })
    ));

    let mut profile = populated(ProfileType::PlaceOfResidenceStickerPassport);
    profile.set_text("Postal code", "5317A");
    assert!(matches!(
        encode_profile(&profile),
        Err(Error::Validation { .. })
    ));

    // a blank template has no values at all
    let mut template = profile_template(ProfileType::ResidencePermit).unwrap();
    template.header = sample_header("A1");
    assert!(encode_profile(&template).is_err());
}

#[test]
fn stickers_differ_only_in_their_header() {
    let address = populated(ProfileType::AddressStickerIdCard);
    let residence = populated(ProfileType::PlaceOfResidenceStickerPassport);
    let encoded_address = encode_profile(&address).unwrap();
    let encoded_residence = encode_profile(&residence).unwrap();
    assert_eq!(encoded_address.len(), encoded_residence.len());
    // identical feature bytes behind diverging discriminators
    let header_len = seal_encoding::header::decode_header(&encoded_address)
        .unwrap()
        .byte_len;
    assert_eq!(
        &encoded_address[header_len..],
        &encoded_residence[header_len..]
    );
    assert_ne!(
        &encoded_address[header_len - 2..header_len],
        &encoded_residence[header_len - 2..header_len]
    );
}
