//! Lexer module for ESENS notation

pub mod scanner;
pub mod token;

pub use scanner::*;
pub use token::*;
