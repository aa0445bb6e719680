//! Resource file and expression parsers.
//!
//! Two grammars live here: the block-structured resource format, which yields
//! a [`ConfigTree`] flattened into dotted keys, and the `${}` interpolation
//! grammar, which compiles each leaf string into an [`Expression`].

pub mod ast;
pub mod error;
mod config;
mod template;

pub use ast::*;
pub use config::{LOCALE_BLOCK, ROOT_KEY, parse_config, parse_config_str};
pub use error::ParseError;
pub use template::parse_template;
