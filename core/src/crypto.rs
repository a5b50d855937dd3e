//! Declarations of the hash and signature algorithms
//! prescribed for each profile (as defined in BSI TR-03116-2).
//!
//! The seal codec never computes or verifies signatures;
//! these records only tell callers which algorithms a profile expects.

/// A single hash or signature algorithm declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoAlgo {
    /// Algorithm name, e.g. `"SHA-256"` or `"brainpoolP256r1"`.
    pub algo: &'static str,
    /// Output or key size in bits.
    pub size: u32,
    /// First year (inclusive) in which the algorithm is valid.
    pub valid_from: u16,
    /// First year (exclusive) in which the algorithm is no longer valid.
    pub valid_till: u16,
}

/// The set of algorithms a profile is signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoInfo {
    /// Acceptable hash algorithms.
    pub hash_algos: &'static [CryptoAlgo],
    /// Acceptable signature algorithms.
    pub signature_algos: &'static [CryptoAlgo],
}
