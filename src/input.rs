//! Turns the textual key lists typed into a front end into keys. The trees never see text: a
//! front end parses first and only hands well-formed keys to `insert`/`delete`.
//!
//! # Examples
//!
//! ```
//! use treemaker::input::{self, InputError};
//!
//! assert_eq!(input::parse_keys::<i64>("10, 20,30"), Ok(vec![10, 20, 30]));
//! assert_eq!(
//!     input::parse_keys::<i64>("10, x"),
//!     Err(InputError::InvalidKey { position: 2, token: "x".to_string() })
//! );
//! ```

use std::fmt;
use std::str::FromStr;

/// Why a key list couldn't be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing but whitespace was given.
    Empty,
    /// A token isn't a key. `position` counts tokens from 1.
    InvalidKey {
        /// Where in the list the token is.
        position: usize,
        /// The offending token, trimmed.
        token: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "no keys given"),
            InputError::InvalidKey { position, token } => {
                write!(f, "invalid key {token:?} at position {position}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Result alias for the parsers in this module.
pub type InputResult<T> = Result<T, InputError>;

/// Parses a comma-separated list of keys. Whitespace around each key is ignored; an empty token
/// (as in `"1,,2"`) is an error.
pub fn parse_keys<T: FromStr>(input: &str) -> InputResult<Vec<T>> {
    if input.trim().is_empty() {
        return Err(InputError::Empty);
    }
    input
        .split(',')
        .enumerate()
        .map(|(i, token)| parse_token(token, i + 1))
        .collect()
}

/// Parses a single key.
pub fn parse_key<T: FromStr>(input: &str) -> InputResult<T> {
    if input.trim().is_empty() {
        return Err(InputError::Empty);
    }
    parse_token(input, 1)
}

fn parse_token<T: FromStr>(token: &str, position: usize) -> InputResult<T> {
    let token = token.trim();
    token.parse().map_err(|_| InputError::InvalidKey {
        position,
        token: token.to_string(),
    })
}
