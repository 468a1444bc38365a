//! Partitioners turn raw token strings announced by nodes into [`Token`] values
//! and hash partition keys onto the same token space.

mod murmur3;

use crate::core::{Result, Token, TopologyError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use murmur3::murmur3_h1;

const CLASS_PREFIX: &str = "org.apache.cassandra.dht.";

/// Upper bound of the RandomPartitioner token space (2^127).
pub const RANDOM_TOKEN_MAX: u128 = 1u128 << 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partitioner {
    Murmur3,
    Random,
    ByteOrdered,
}

impl Partitioner {
    /// Resolves a partitioner from its class name.
    ///
    /// Both the fully-qualified Java class name and the bare class name are accepted.
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        let short = trimmed.strip_prefix(CLASS_PREFIX).unwrap_or(trimmed);
        match short {
            "Murmur3Partitioner" => Ok(Partitioner::Murmur3),
            "RandomPartitioner" => Ok(Partitioner::Random),
            "ByteOrderedPartitioner" => Ok(Partitioner::ByteOrdered),
            _ => Err(TopologyError::UnknownPartitioner(name.to_string())),
        }
    }

    /// Returns the fully-qualified class name.
    pub fn name(&self) -> &'static str {
        match self {
            Partitioner::Murmur3 => "org.apache.cassandra.dht.Murmur3Partitioner",
            Partitioner::Random => "org.apache.cassandra.dht.RandomPartitioner",
            Partitioner::ByteOrdered => "org.apache.cassandra.dht.ByteOrderedPartitioner",
        }
    }

    /// Parses a token string as announced in the peers tables.
    pub fn parse_token(&self, raw: &str) -> Result<Token> {
        let raw = raw.trim();
        let invalid = || TopologyError::InvalidToken {
            partitioner: self.name().to_string(),
            token: raw.to_string(),
        };

        match self {
            Partitioner::Murmur3 => raw.parse::<i64>().map(Token::Murmur3).map_err(|_| invalid()),
            Partitioner::Random => {
                let value = raw.parse::<u128>().map_err(|_| invalid())?;
                if value > RANDOM_TOKEN_MAX {
                    return Err(invalid());
                }
                Ok(Token::Random(value))
            }
            Partitioner::ByteOrdered => decode_hex(raw).map(Token::ByteOrdered).ok_or_else(invalid),
        }
    }

    /// Hashes a serialized partition key onto the token space.
    pub fn hash(&self, partition_key: &[u8]) -> Result<Token> {
        match self {
            Partitioner::Murmur3 => {
                let h1 = murmur3_h1(partition_key);
                // i64::MIN is reserved as the ring's minimum token.
                let token = if h1 == i64::MIN { i64::MAX } else { h1 };
                Ok(Token::Murmur3(token))
            }
            Partitioner::ByteOrdered => Ok(Token::ByteOrdered(partition_key.to_vec())),
            Partitioner::Random => Err(TopologyError::UnsupportedOperation(
                "hashing partition keys with RandomPartitioner".to_string(),
            )),
        }
    }
}

impl fmt::Display for Partitioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_hex(raw: &str) -> Option<Vec<u8>> {
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    if raw.len() % 2 != 0 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    (0..raw.len())
        .step_by(2)
        .map(|idx| u8::from_str_radix(raw.get(idx..idx + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_short_and_qualified_names() {
        assert_eq!(
            Partitioner::from_name("Murmur3Partitioner").unwrap(),
            Partitioner::Murmur3
        );
        assert_eq!(
            Partitioner::from_name("org.apache.cassandra.dht.RandomPartitioner").unwrap(),
            Partitioner::Random
        );
        assert_eq!(
            Partitioner::from_name(Partitioner::ByteOrdered.name()).unwrap(),
            Partitioner::ByteOrdered
        );
    }

    #[test]
    fn rejects_unknown_partitioner() {
        let err = Partitioner::from_name("OrderPreservingPartitioner").unwrap_err();
        assert!(matches!(err, TopologyError::UnknownPartitioner(name) if name == "OrderPreservingPartitioner"));
    }

    #[test]
    fn parses_tokens_per_partitioner() {
        assert_eq!(
            Partitioner::Murmur3.parse_token("-9223372036854775808").unwrap(),
            Token::Murmur3(i64::MIN)
        );
        assert_eq!(
            Partitioner::Random.parse_token("170141183460469231731687303715884105728").unwrap(),
            Token::Random(RANDOM_TOKEN_MAX)
        );
        assert_eq!(
            Partitioner::ByteOrdered.parse_token("00ff10").unwrap(),
            Token::ByteOrdered(vec![0x00, 0xff, 0x10])
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(Partitioner::Murmur3.parse_token("abc").is_err());
        assert!(Partitioner::Random.parse_token("-1").is_err());
        assert!(Partitioner::Random
            .parse_token("170141183460469231731687303715884105729")
            .is_err());
        assert!(Partitioner::ByteOrdered.parse_token("abc").is_err());
        assert!(Partitioner::ByteOrdered.parse_token("zz").is_err());
    }

    #[test]
    fn murmur3_hash_of_empty_key_is_zero() {
        assert_eq!(Partitioner::Murmur3.hash(b"").unwrap(), Token::Murmur3(0));
    }

    #[test]
    fn murmur3_hash_is_deterministic_and_key_sensitive() {
        let a = Partitioner::Murmur3.hash(b"user:42").unwrap();
        let b = Partitioner::Murmur3.hash(b"user:42").unwrap();
        let c = Partitioner::Murmur3.hash(b"user:43").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn random_partitioner_does_not_hash_keys() {
        assert!(matches!(
            Partitioner::Random.hash(b"key"),
            Err(TopologyError::UnsupportedOperation(_))
        ));
    }
}
