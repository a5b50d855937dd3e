//! Compiled crypto declarations per profile family.
//!
//! Values follow BSI TR-03116-2: the visa and sticker profiles are signed
//! with brainpoolP224r1 over SHA-224 or SHA-256, all remaining profiles
//! with brainpoolP256r1 over SHA-256. Validity windows are years, the
//! upper bound exclusive.

use seal_core::{CryptoAlgo, CryptoInfo};

const VALID_FROM: u16 = 2016;
const VALID_FROM_VISA: u16 = 2021;
const VALID_FROM_STICKER: u16 = 2021;
const VALID_TILL: u16 = 2025;

const HASH_SHA256: [CryptoAlgo; 1] = [CryptoAlgo {
    algo: "SHA-256",
    size: 256,
    valid_from: VALID_FROM,
    valid_till: VALID_TILL,
}];

const HASH_SHA224_VISA: [CryptoAlgo; 1] = [CryptoAlgo {
    algo: "SHA-224",
    size: 224,
    valid_from: VALID_FROM_VISA,
    valid_till: VALID_TILL,
}];

const SIGN_BRAINPOOL_P256: [CryptoAlgo; 1] = [CryptoAlgo {
    algo: "brainpoolP256r1",
    size: 512,
    valid_from: VALID_FROM,
    valid_till: VALID_TILL,
}];

const SIGN_BRAINPOOL_P224_VISA: [CryptoAlgo; 1] = [CryptoAlgo {
    algo: "brainpoolP224r1",
    size: 448,
    valid_from: VALID_FROM_VISA,
    valid_till: VALID_TILL,
}];

const SIGN_BRAINPOOL_P224_STICKER: [CryptoAlgo; 1] = [CryptoAlgo {
    algo: "brainpoolP224r1",
    size: 448,
    valid_from: VALID_FROM_STICKER,
    valid_till: VALID_TILL,
}];

/// Crypto declarations for the visa profile.
pub const VISA: CryptoInfo = CryptoInfo {
    hash_algos: &HASH_SHA224_VISA,
    signature_algos: &SIGN_BRAINPOOL_P224_VISA,
};

/// Crypto declarations for the address and place-of-residence stickers.
pub const STICKER: CryptoInfo = CryptoInfo {
    hash_algos: &HASH_SHA256,
    signature_algos: &SIGN_BRAINPOOL_P224_STICKER,
};

/// Crypto declarations for all remaining profiles.
pub const DEFAULT: CryptoInfo = CryptoInfo {
    hash_algos: &HASH_SHA256,
    signature_algos: &SIGN_BRAINPOOL_P256,
};
