// src/seed.rs

/// Separator placed between the guide sequence and the chromatin label
/// when building the hashing key.
pub const KEY_SEPARATOR: char = '|';

/// Multiplicative string hash used to seed the generator.
///
/// The accumulator is updated as `acc = acc * 31 + code` for every character,
/// with 32-bit wraparound, and the final bit pattern is read as unsigned.
///
/// # Arguments
///
/// * `key` - The string to hash, usually built with [`prediction_key`]
///
/// # Returns
///
/// * A `u32` seed that is identical for identical keys on every platform
pub fn derive_seed(key: &str) -> u32 {
    // UTF-16 code units, so non-ASCII keys hash the same way a char-code
    // based caller would hash them.
    let acc = key.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    acc as u32
}

/// Builds the key `sequence|chromatin_state` hashed by the engine.
pub fn prediction_key(sequence: &str, chromatin_state: &str) -> String {
    format!("{}{}{}", sequence, KEY_SEPARATOR, chromatin_state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
