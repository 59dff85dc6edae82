// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque 12-byte identifiers, rendered as 24 lowercase hex characters.
//!
//! Layout: 4-byte big-endian creation time (seconds), 5 bytes chosen once
//! per process, 3-byte big-endian counter. Ids generated by one process
//! therefore sort in creation order.

use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

const ID_BYTES: usize = 12;
const ID_HEX_LEN: usize = ID_BYTES * 2;
const COUNTER_MASK: u32 = 0x00ff_ffff;

/// Identifier for users and exercise entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_BYTES]);

/// Error returned when a string is not a well-formed [`ObjectId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid object id")]
pub struct InvalidObjectId(pub String);

struct ProcessSeed {
    unique: [u8; 5],
    counter: AtomicU32,
}

fn process_seed() -> &'static ProcessSeed {
    static SEED: OnceLock<ProcessSeed> = OnceLock::new();

    SEED.get_or_init(|| {
        let mut bytes = [0u8; 8];
        if SystemRandom::new().fill(&mut bytes).is_err() {
            // No system RNG; fall back to the clock so generation stays infallible.
            let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
            bytes = nanos.to_be_bytes();
            tracing::warn!("System RNG unavailable, seeding object ids from the clock");
        }

        let mut unique = [0u8; 5];
        unique.copy_from_slice(&bytes[..5]);
        // Start in the lower half so the counter cannot wrap for ~8M ids.
        let counter = u32::from_be_bytes([0, bytes[5] & 0x7f, bytes[6], bytes[7]]);

        ProcessSeed {
            unique,
            counter: AtomicU32::new(counter),
        }
    })
}

impl ObjectId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        let seed = process_seed();
        let seconds = chrono::Utc::now().timestamp() as u32;
        let counter = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; ID_BYTES];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&seed.unique);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Whether `input` has the shape of an id (24 hex digits).
    pub fn is_valid(input: &str) -> bool {
        input.len() == ID_HEX_LEN && input.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Creation time encoded in the id, in seconds since the Unix epoch.
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(InvalidObjectId(s.to_string()));
        }

        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidObjectId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_well_formed() {
        let id = ObjectId::generate();
        let rendered = id.to_string();

        assert_eq!(rendered.len(), 24);
        assert!(ObjectId::is_valid(&rendered));
        assert_eq!(rendered.parse::<ObjectId>().unwrap(), id);
    }

    #[test]
    fn test_ids_sort_in_creation_order() {
        let ids: Vec<ObjectId> = (0..100).map(|_| ObjectId::generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!("".parse::<ObjectId>().is_err());
        assert!("123".parse::<ObjectId>().is_err());
        assert!("zzzzzzzzzzzzzzzzzzzzzzzz".parse::<ObjectId>().is_err());
        assert!("65a1b2c3d4e5f6a7b8c9d0e1ff".parse::<ObjectId>().is_err());
        // Multi-byte characters must not sneak past the length check.
        assert!("65a1b2c3d4e5f6a7b8c9d0é".parse::<ObjectId>().is_err());
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id: ObjectId = "65A1B2C3D4E5F6A7B8C9D0E1".parse().unwrap();
        assert_eq!(id.to_string(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn test_timestamp_is_recent() {
        let now = chrono::Utc::now().timestamp() as u32;
        let id = ObjectId::generate();
        assert!(id.timestamp_secs() <= now + 1);
        assert!(id.timestamp_secs() + 60 >= now);
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let id: ObjectId = "65a1b2c3d4e5f6a7b8c9d0e1".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1b2c3d4e5f6a7b8c9d0e1\"");

        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ObjectId>("\"nope\"").is_err());
    }
}
