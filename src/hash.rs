use crate::error::TableError;

/// Turns a record identifier into a hash value. The table
/// reduces the value modulo its bucket count
pub trait KeyHash {
    /// Hashes the identifier
    ///
    /// # Arguments
    ///
    /// `key`: The identifier to hash
    fn hash(key: &str) -> Result<u64, TableError>;
}

/// Interprets the identifier as a decimal non-negative integer
/// and uses it as its own hash
pub struct NumericHash;

impl KeyHash for NumericHash {
    fn hash(key: &str) -> Result<u64, TableError> {
        key.parse::<u64>().map_err(|_| TableError::InvalidKey(key.to_owned()))
    }
}

/// Hashes arbitrary identifiers with FNV-1, for records whose
/// ids are not numeric
pub struct Fnv1Hash;

const FNV1_OFFSET_BASIS: u32 = 2166136261;
const FNV1_PRIME: u32 = 16777619;

/// 32-bit FNV-1 over the id's bytes. Used for ids such as names or
/// catalogue codes which `NumericHash` rejects
///
/// # Arguments
///
/// `key`: The identifier to hash
fn fnv1(key: &str) -> u32 {
    key.bytes().fold(FNV1_OFFSET_BASIS, |hash, byte| {
        hash.wrapping_mul(FNV1_PRIME) ^ u32::from(byte)
    })
}

impl KeyHash for Fnv1Hash {
    fn hash(key: &str) -> Result<u64, TableError> {
        Ok(fnv1(key) as u64)
    }
}
