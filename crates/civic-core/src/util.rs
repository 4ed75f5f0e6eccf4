//! Issue ids and monotonic timestamps.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

/// Default prefix for generated issue IDs.
pub const DEFAULT_PREFIX: &str = "civ";

const MIN_HASH_LEN: usize = 3;
const MAX_HASH_LEN: usize = 8;
const FALLBACK_HASH_LEN: usize = 12;
const NONCES_PER_LENGTH: u32 = 10;

/// The report fields an id is derived from.
#[derive(Debug, Clone, Copy)]
pub struct IdSeed<'a> {
    pub title: &'a str,
    pub reporter: &'a str,
    pub created_at: DateTime<Utc>,
}

impl IdSeed<'_> {
    /// First 64 bits of SHA-256 over the seed fields and `nonce`.
    fn digest(&self, nonce: u32) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.reporter.as_bytes());
        hasher.update([0x1f]);
        hasher.update(
            self.created_at
                .timestamp_nanos_opt()
                .unwrap_or_default()
                .to_be_bytes(),
        );
        hasher.update(nonce.to_be_bytes());
        let digest = hasher.finalize();

        let mut head = [0_u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }
}

/// Produces `<prefix>-<base36>` ids whose hash part lengthens as the
/// collection grows.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

impl IdGenerator {
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Shortest hash length that keeps the birthday-collision odds for
    /// `issue_count` ids under one in four.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn hash_length(issue_count: usize) -> usize {
        // 1 - e^(-x) < 0.25  <=>  x < ln(4/3)
        let limit = (4.0_f64 / 3.0).ln();
        let n = issue_count as f64;
        (MIN_HASH_LEN..=MAX_HASH_LEN)
            .find(|&len| n * n / (2.0 * 36_f64.powi(len as i32)) < limit)
            .unwrap_or(MAX_HASH_LEN)
    }

    /// Generate an id not rejected by `exists`.
    ///
    /// Each length gets a few nonces before the hash grows; past the
    /// longest length a wide fallback hash is used.
    pub fn generate<F>(&self, seed: &IdSeed<'_>, issue_count: usize, exists: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut nonce = 0_u32;
        for len in Self::hash_length(issue_count)..=MAX_HASH_LEN {
            for _ in 0..NONCES_PER_LENGTH {
                let id = self.format_id(seed.digest(nonce), len);
                nonce += 1;
                if !exists(&id) {
                    return id;
                }
            }
        }

        loop {
            let id = self.format_id(seed.digest(nonce), FALLBACK_HASH_LEN);
            if !exists(&id) {
                return id;
            }
            nonce = nonce.wrapping_add(1);
        }
    }

    fn format_id(&self, hash: u64, len: usize) -> String {
        let mut encoded = base36(hash);
        if encoded.len() < len {
            encoded = format!("{encoded:0>len$}");
        }
        encoded.truncate(len);
        format!("{}-{encoded}", self.prefix)
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::with_capacity(13);
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.iter().rev().map(|&b| char::from(b)).collect()
}

/// A timestamp strictly after `previous`: `now` if the clock has moved
/// past it, otherwise `previous` plus one nanosecond.
#[must_use]
pub fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}
