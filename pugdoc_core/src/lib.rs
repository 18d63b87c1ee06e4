//! `pugdoc_core` is the core library of the `pugdoc` documentation
//! generator. It finds `//- @pugdoc` comments in pug templates, attaches them
//! to the mixin or block they precede, parses their JSDoc-like bodies into a
//! typed tree and renders that tree as JSON, markdown and html.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Pug source file
//!   -> Scanner (finds marker lines, reads the comment and the following block)
//!   -> Classifier (mixin or block, declared name)
//!   -> Annotation parser (description, tags, brace balanced type expressions)
//!   -> Assembler (one DocumentNode per marker, merged into a DocumentTree)
//!   -> Writers (ast / markdown / html, one artifact each)
//! ```
//!
//! ## Annotation Syntax
//!
//! ```pug
//! //- @pugdoc
//! //- Renders a button.
//! //- @param {{
//! //-   label: string,
//! //-   size: number
//! //- }} opts Button options.
//! mixin button(opts)
//!   button= opts.label
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `pugdoc.toml` loading and option resolution.
//! - [`scanner`]: marker detection and indentation based block reading.
//! - [`annotation`]: comment body parsing, including the multi-line type
//!   scanner.
//! - [`writer`]: the [`DocWriter`] contract and its implementations.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pugdoc_core::Options;
//! use pugdoc_core::PartialOptions;
//! use pugdoc_core::generate;
//! use std::path::Path;
//!
//! let partial = PartialOptions::load(Path::new("."))?.unwrap_or_default();
//! let options = Options::resolve(Options::default(), partial)?;
//! let report = generate(&options)?;
//! println!("documented {} node(s)", report.nodes);
//! # Ok::<(), pugdoc_core::PugdocError>(())
//! ```

pub use classifier::*;
pub use config::*;
pub use error::*;
pub use generate::*;
pub use model::*;
pub use parser::*;
pub use writer::DocWriter;
pub use writer::OutputType;

pub mod annotation;
mod classifier;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod generate;
mod model;
mod parser;
pub mod scanner;
mod type_expression;
pub mod writer;

pub use type_expression::parse_type_expression;

#[cfg(test)]
mod __fixtures;
