//! The scripting runtime seam.
//!
//! A locale directory may carry script files next to its resource files.
//! The store hands those to a [`ScriptFallback`] at load time and consults it
//! for keys no resource file defines.

use std::error::Error as StdError;
use std::path::Path;

/// A raw value exposed by the scripting runtime.
///
/// Fallback text is returned as-is; it is not compiled as an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawText {
    Text(String),
    /// Picked from at random, like a variant group.
    List(Vec<String>),
}

/// Host scripting runtime consulted for keys the store does not define.
pub trait ScriptFallback {
    /// Execute a script file found in the locale directory.
    fn load(&mut self, path: &Path) -> Result<(), Box<dyn StdError + Send + Sync>>;

    /// Raw value of a dotted key, if the runtime defines one.
    fn lookup_raw(&self, key: &str) -> Option<RawText>;
}
