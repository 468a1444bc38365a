pub mod error;
pub mod token;

pub use error::{Result, TopologyError};
pub use token::Token;
