//! Fuzz test for the ESENS lexer
//!
//! Feeds arbitrary UTF-8 to the tokenizer looking for panics, runaway loops
//! and tokens whose offsets do not line up with the input.
//!
//! Run with: cargo +nightly fuzz run lexer_fuzz -- -max_total_time=60

#![no_main]

use esens_core::{Lexer, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        match Lexer::new(input).tokenize() {
            Ok(tokens) => {
                let mut last_end = 0;
                for token in &tokens {
                    // Tokens are non-empty, ordered and slice the input exactly.
                    assert!(!token.text.is_empty(), "Empty token at {}", token.offset);
                    assert!(token.offset >= last_end, "Tokens out of order");
                    assert_eq!(&input[token.offset..token.end()], token.text);
                    assert_ne!(token.kind, TokenKind::Whitespace);
                    assert_ne!(token.kind, TokenKind::Error);
                    last_end = token.end();
                }
            }
            Err(err) => {
                assert!(err.is_tokenization(), "Lexer produced {:?}", err.kind);
                let offset = err.offset.expect("tokenization errors carry an offset");
                assert!(input.is_char_boundary(offset));
                assert!(offset < input.len());
            }
        }
    }
});
