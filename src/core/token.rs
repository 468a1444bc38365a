use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the token ring.
///
/// A single ring only ever holds tokens of one partitioner. Comparing tokens of
/// different kinds falls back to variant order so sorting stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Token {
    Murmur3(i64),
    Random(u128),
    ByteOrdered(Vec<u8>),
}

impl Token {
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Murmur3(_) => "murmur3",
            Token::Random(_) => "random",
            Token::ByteOrdered(_) => "byte-ordered",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Murmur3(value) => write!(f, "{}", value),
            Token::Random(value) => write!(f, "{}", value),
            Token::ByteOrdered(bytes) => {
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}
