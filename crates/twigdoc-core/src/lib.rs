//! Core types, template AST definitions, and errors for twigdoc.
//!
//! This crate provides the foundational types used across all other twigdoc crates:
//! - Template AST nodes and source spans
//! - Token kinds understood by the template tokenizer
//! - Fragment and slot records (the wire contract to the documentation UI)
//! - Docgen descriptor containers and merged component metadata
//! - Error types

pub mod ast;
pub mod docgen;
pub mod errors;
pub mod fragment;
pub mod tokens;

pub use ast::*;
pub use docgen::*;
pub use errors::*;
pub use fragment::*;
pub use tokens::*;
