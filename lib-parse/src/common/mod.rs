//! Tokens and delimiters shared by SQL-like grammars.

pub mod delimiter;
pub mod token;
