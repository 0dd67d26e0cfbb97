//! This crate provides the semantic analysis phase of the compiler.
//!
//! The [`analyzer`] walks the tokens of a grammatically valid program and
//! produces an abstract syntax tree labelled with [`ast::Label`] together with
//! a populated [`symbol::Table`]. Scope and type rules are enforced along the
//! way; violations are reported as [`error::Error`] through the handler and
//! the walk continues until the end of the program.

pub mod analyzer;
pub mod ast;
pub mod error;
pub mod symbol;
pub mod ty;
