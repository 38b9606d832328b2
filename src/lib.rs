//! # stache
//!
//! A scanner for mustache-style templates.
//!
//! This crate turns raw template source into an ordered stream of structured
//! tokens for a downstream parser/renderer. It covers the full lexical
//! surface of the format: escaped tag starts, runtime-redefinable
//! delimiters, standalone-line whitespace trimming, indentation capture for
//! partials, and an optional pluralized-translation (`ngettext`) tag
//! extension.
//!
//! Parsing the token stream into a tree and rendering it against a data
//! context are separate subsystems and are not part of this crate.
//!
//! ## Testing
//!
//! Tests assert exact token sequences. Use the factories in
//! [testing](crate::scanner::testing) to build expected streams succinctly.

pub mod scanner;

pub use scanner::interface::{ScanError, Source, TemplateSource};
pub use scanner::scan;
pub use scanner::scanner_impl::{Scanner, ScannerOptions};
pub use scanner::tokens::{Token, TokenKind};
