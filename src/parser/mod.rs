pub mod ast_utils;
pub mod go_parser;

pub use go_parser::{GoParser, ParseError};

#[cfg(test)]
mod tests;
