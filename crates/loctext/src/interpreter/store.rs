//! The localization store.
//!
//! A [`Store`] owns the compiled entries of one locale directory and renders
//! them on demand. Loading is all-or-nothing; rendering never fails.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::slice;

use bon::Builder;
use tracing::{debug, warn};

use crate::interpreter::error::LoadError;
use crate::interpreter::fallback::{RawText, ScriptFallback};
use crate::interpreter::registry::BuiltinRegistry;
use crate::interpreter::{EvalContext, eval_expression};
use crate::parser::ast::{Expression, Leaf};
use crate::parser::{ParseError, parse_config, parse_template};
use crate::types::{Language, LanguageFlag, SharedRng, Subject, Value};

/// Extension of resource files inside a locale directory.
pub const RESOURCE_EXTENSION: &str = "hcl";

/// Extension of script files forwarded to the [`ScriptFallback`].
pub const SCRIPT_EXTENSION: &str = "lua";

/// Directory holding one subdirectory per locale.
pub const DEFAULT_RESOURCE_ROOT: &str = "lang";

/// Maximum nesting of keys passed as positional values.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// A compiled resource value.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Single(Expression),
    /// A variant group; one member is picked at random per lookup.
    Variants(Vec<Expression>),
}

impl Entry {
    /// Every expression of the entry.
    pub fn expressions(&self) -> &[Expression] {
        match self {
            Entry::Single(expr) => slice::from_ref(expr),
            Entry::Variants(exprs) => exprs,
        }
    }
}

/// What to do when two resources define the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the last definition and log a warning.
    #[default]
    Overwrite,
    /// Fail the load with [`LoadError::DuplicateKey`].
    Reject,
}

/// Compiled entries of one locale, keyed by dotted path.
///
/// The language flag and random source are shared handles: clones held by
/// the host observe and drive the same state.
///
/// # Example
///
/// ```
/// use loctext::{Store, Subject};
///
/// let mut store = Store::new();
/// store
///     .load_str("greeting.hcl", r#"locale { hello = "Hello, ${you()}!" }"#)
///     .unwrap();
///
/// assert_eq!(store.lookup("core.locale.hello", Subject::None), "Hello, you!");
/// assert_eq!(store.lookup("core.locale.missing", Subject::None), "");
/// ```
#[derive(Builder)]
#[builder(on(PathBuf, into))]
pub struct Store {
    /// Parent of the per-locale directories used by [`Store::load`].
    #[builder(default = PathBuf::from(DEFAULT_RESOURCE_ROOT))]
    resource_root: PathBuf,

    #[builder(default)]
    language: LanguageFlag,

    #[builder(default)]
    rng: SharedRng,

    #[builder(default)]
    builtins: BuiltinRegistry,

    #[builder(default)]
    duplicates: DuplicatePolicy,

    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Consulted for keys no resource file defines.
    fallback: Option<Box<dyn ScriptFallback>>,

    #[builder(skip)]
    entries: BTreeMap<String, Entry>,
}

impl Default for Store {
    fn default() -> Self {
        Store::builder().build()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The language active right now.
    pub fn language(&self) -> Language {
        self.language.get()
    }

    pub fn language_flag(&self) -> &LanguageFlag {
        &self.language
    }

    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    /// Mutable builtins, for registering custom functions.
    pub fn builtins_mut(&mut self) -> &mut BuiltinRegistry {
        &mut self.builtins
    }

    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Every key, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the entries with the resource files of `dir`.
    ///
    /// Reads every `.hcl` file directly inside `dir` in file name order. The
    /// store is cleared first and only repopulated once every file compiled,
    /// so on error it is left empty. Returns the number of keys.
    pub fn init(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        self.entries.clear();
        let dir = dir.as_ref();

        let mut entries = BTreeMap::new();
        let mut origins = BTreeMap::new();
        for path in Self::resource_files(dir)? {
            let bytes = fs::read(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            let compiled = compile_resource(&path, &bytes)?;
            debug!(path = %path.display(), keys = compiled.len(), "loaded resource file");
            self.merge(&mut entries, &mut origins, &path, compiled)?;
        }

        self.entries = entries;
        Ok(self.entries.len())
    }

    /// The `.hcl` files directly inside `dir`, in the order `init` reads them.
    pub fn resource_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoadError> {
        files_with_extension(dir.as_ref(), RESOURCE_EXTENSION)
    }

    /// Replace the entries with a single in-memory resource.
    ///
    /// `label` stands in for the file path in errors.
    pub fn load_str(&mut self, label: &str, content: &str) -> Result<usize, LoadError> {
        self.entries.clear();
        let path = PathBuf::from(label);

        let compiled = compile_resource(&path, content.as_bytes())?;
        let mut entries = BTreeMap::new();
        let mut origins = BTreeMap::new();
        self.merge(&mut entries, &mut origins, &path, compiled)?;

        self.entries = entries;
        Ok(self.entries.len())
    }

    /// Load `<resource_root>/<language>/`.
    ///
    /// Switches the shared language flag, initializes from the directory, then
    /// hands its script files to the fallback, if one is configured.
    pub fn load(&mut self, language: &str) -> Result<usize, LoadError> {
        let dir = self.resource_root.join(language);
        self.language.set(Language::from_code(language));

        let count = self.init(&dir)?;
        if let Err(err) = self.load_scripts(&dir) {
            self.entries.clear();
            return Err(err);
        }
        debug!(%language, keys = count, "loaded locale");
        Ok(count)
    }

    fn load_scripts(&mut self, dir: &Path) -> Result<(), LoadError> {
        let Some(fallback) = self.fallback.as_mut() else {
            return Ok(());
        };
        for path in files_with_extension(dir, SCRIPT_EXTENSION)? {
            debug!(path = %path.display(), "loading script");
            fallback
                .load(&path)
                .map_err(|source| LoadError::Script { path, source })?;
        }
        Ok(())
    }

    fn merge(
        &self,
        entries: &mut BTreeMap<String, Entry>,
        origins: &mut BTreeMap<String, PathBuf>,
        path: &Path,
        compiled: Vec<(String, Entry)>,
    ) -> Result<(), LoadError> {
        for (key, entry) in compiled {
            if let Some(first) = origins.insert(key.clone(), path.to_path_buf()) {
                match self.duplicates {
                    DuplicatePolicy::Overwrite => {
                        warn!(
                            %key,
                            first = %first.display(),
                            second = %path.display(),
                            "duplicate key overwritten"
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(LoadError::DuplicateKey {
                            key,
                            first,
                            second: path.to_path_buf(),
                        });
                    }
                }
            }
            entries.insert(key, entry);
        }
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the entry at `path` for `subject`.
    ///
    /// Unknown paths render as the fallback's raw value, or as an empty
    /// string.
    pub fn lookup(&self, path: &str, subject: Subject<'_>) -> String {
        self.lookup_with(path, subject, &[])
    }

    /// Like [`Store::lookup`], binding `args` to `_2`, `_3`, ...
    pub fn lookup_with(&self, path: &str, subject: Subject<'_>, args: &[Value]) -> String {
        let mut ctx = EvalContext::new(args, self.max_depth);
        self.render_nested(path, subject, &mut ctx)
    }

    /// Render a key inside an ongoing evaluation.
    pub(crate) fn render_nested(
        &self,
        path: &str,
        subject: Subject<'_>,
        ctx: &mut EvalContext<'_>,
    ) -> String {
        if let Err(err) = ctx.push_key(path) {
            warn!(key = path, %err, "key reference not rendered");
            return String::new();
        }
        let text = match self.entries.get(path) {
            Some(entry) => match self.choose(entry) {
                Some(expr) => eval_expression(expr, subject, ctx, self),
                None => String::new(),
            },
            None => self.render_fallback(path),
        };
        ctx.pop_key();
        text
    }

    /// Pick the expression to render. Variant groups draw from the shared
    /// random source on every call.
    fn choose<'e>(&self, entry: &'e Entry) -> Option<&'e Expression> {
        match entry {
            Entry::Single(expr) => Some(expr),
            Entry::Variants(exprs) if exprs.is_empty() => None,
            Entry::Variants(exprs) => exprs.get(self.rng.index(exprs.len())),
        }
    }

    fn render_fallback(&self, path: &str) -> String {
        let raw = self
            .fallback
            .as_ref()
            .and_then(|fallback| fallback.lookup_raw(path));
        match raw {
            Some(RawText::Text(text)) => text,
            Some(RawText::List(items)) if items.is_empty() => String::new(),
            Some(RawText::List(mut items)) => {
                let index = self.rng.index(items.len());
                items.swap_remove(index)
            }
            None => {
                debug!(key = path, "missing key");
                String::new()
            }
        }
    }
}

/// Regular files directly inside `dir` with the given extension, sorted.
fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one resource and compile every leaf.
fn compile_resource(path: &Path, bytes: &[u8]) -> Result<Vec<(String, Entry)>, LoadError> {
    let config_error = |err: ParseError| LoadError::ConfigParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };
    let leaves = parse_config(bytes)
        .and_then(|tree| tree.flatten())
        .map_err(config_error)?;

    let compile = |key: &str, text: &str| {
        parse_template(text).map_err(|err| LoadError::TemplateParse {
            path: path.to_path_buf(),
            key: key.to_string(),
            reason: err.to_string(),
        })
    };

    let mut compiled = Vec::with_capacity(leaves.len());
    for (key, leaf) in leaves {
        let entry = match leaf {
            Leaf::Text(text) => Entry::Single(compile(&key, &text)?),
            Leaf::List(items) if items.is_empty() => {
                return Err(LoadError::ConfigParse {
                    path: path.to_path_buf(),
                    reason: format!("empty list at '{key}'"),
                });
            }
            Leaf::List(items) => Entry::Variants(
                items
                    .iter()
                    .map(|text| compile(&key, text))
                    .collect::<Result<_, _>>()?,
            ),
        };
        compiled.push((key, entry));
    }
    Ok(compiled)
}
