use crate::common::money::Money;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derives an account identifier from the account's name, creation stamp and
/// opening balance.
///
/// The digest is 64-bit FNV-1a with its standard constants, so the same
/// inputs give the same identifier in every process. Uniqueness is not
/// enforced here.
pub fn generate_id(full_name: &str, initial_balance: Money, created: &str) -> String {
    let seed = format!("{full_name}{created}{}", initial_balance.to_string_2dp());
    format!("{:x}", fnv1a_64(seed.as_bytes()))
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}
