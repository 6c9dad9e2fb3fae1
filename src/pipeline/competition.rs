use chrono::NaiveDate;
use sha1::{Digest, Sha1};

/// Deterministic meet identifier: SHA-1 hex digest over the ISO-8601 race
/// date and the city, joined with an underscore. A pure function of its two
/// inputs, so the same meet hashes identically from every event and gender
/// result set it appears in.
pub fn competition_id(date: NaiveDate, city: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{date}_{city}").as_bytes());
    hex::encode(hasher.finalize())
}
