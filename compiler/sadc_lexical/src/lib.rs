//! This crate provides the lexical analysis phase of the compiler. This phase
//! is responsible for tokenizing the text of one program into a stream of
//! tokens.
//!
//! The final output of this phase is a [`token::TokenStream`]. Malformed
//! lexemes don't stop the tokenizer: they become tokens of the
//! [`token::Category::Error`] category and an [`error::Error`] is reported to
//! the handler.

pub mod error;
pub mod token;
