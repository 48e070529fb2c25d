//! Server-side timestamps and record ids.

use chrono::{SecondsFormat, Utc};
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Current UTC time as ISO-8601 with millisecond precision, e.g.
/// `2026-10-17T09:14:03.512Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a record id: unix millis, `_`, nine random base36 characters.
///
/// Two ids minted in the same millisecond collide with probability 36^-9.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}_{}", Utc::now().timestamp_millis(), suffix)
}
