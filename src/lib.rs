//! knit: documentation generator for DataWeave modules.
//!
//! Source files are scanned for `/** ... */` blocks that sit directly in
//! front of the `%dw` header, a `fun` declaration or a `var` declaration.
//! Each block becomes description text plus `@tag value` annotations, and
//! `@tbl`/`@row` annotations are assembled into inline tables.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let unit = knit::parse_unit(Path::new("dw"), Path::new("dw/strings.dwl"), "dwl").unwrap();
//! for func in unit.functions() {
//!     println!("{}: {}", func.name, func.comment.text);
//! }
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;

pub use error::{Error, Result};
pub use model::{
    Annotation, AnnotationTable, Argument, Comment, Declaration, Function, Row, TagKind, Unit,
    Variable,
};
pub use parser::{parse_source, parse_unit, DEFAULT_EXTENSION};
