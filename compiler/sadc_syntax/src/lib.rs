//! This crate provides the syntax tree shared by the later stages of the
//! compiler and the grammar acceptance phase.
//!
//! The [`parser`] confirms that a [`sadc_lexical::token::TokenStream`] is
//! derivable from the grammar of the language and builds a concrete syntax
//! tree labelled with [`cst::Label`]. The same [`tree::SyntaxTree`] is reused
//! by the semantic analyzer for the abstract syntax tree.

pub mod cst;
pub mod error;
pub mod parser;
pub mod tree;
