//! Public AST types for resource files and interpolation expressions.
//!
//! These types are public to enable external tooling (linters, coverage
//! reports, etc.).

/// A compiled interpolation expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub nodes: Vec<Node>,
}

impl Expression {
    /// Returns true if the expression has no interpolation spans.
    pub fn is_literal(&self) -> bool {
        self.nodes.iter().all(|node| matches!(node, Node::Text(_)))
    }

    /// Visits every call in the expression, nested calls included.
    pub fn walk_calls<'a>(&'a self, f: &mut impl FnMut(&'a Call)) {
        for node in &self.nodes {
            if let Node::Call(call) = node {
                call.walk(f);
            }
        }
    }
}

/// A node within an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, copied verbatim.
    Text(String),
    /// A `${name(args)}` span.
    Call(Call),
    /// A `${_N}` span.
    Positional(usize),
}

/// A function call: `name(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Call {
    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Call)) {
        f(self);
        for arg in &self.args {
            if let Arg::Call(inner) = arg {
                inner.walk(f);
            }
        }
    }
}

/// An argument to a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A nested call, evaluated before the outer one.
    Call(Call),
    /// A quoted string literal.
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// `_N`, bound at evaluation time. Always `>= 1`.
    Positional(usize),
}

/// A parsed resource file: the top-level entries in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    pub entries: Vec<ConfigEntry>,
}

/// A named value inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: ConfigValue,
}

/// The value side of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    List(Vec<String>),
    Block(Vec<ConfigEntry>),
    Number(f64),
    Bool(bool),
}

/// A flattened leaf, keyed by its full dotted path.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Text(String),
    List(Vec<String>),
}
