//! Evaluation context for tracking state during recursive evaluation.

use crate::interpreter::EvalError;
use crate::types::Value;

/// Evaluation context carrying state through recursive evaluation.
///
/// The context tracks:
/// - Caller-supplied positional values (`_2`, `_3`, ...)
/// - Key stack for cycle detection when positionals name other keys
/// - Nesting depth, bounded by the store's maximum
pub struct EvalContext<'a> {
    /// Positional values; index 0 binds `_2`.
    args: &'a [Value],
    /// Keys currently being rendered, outermost first.
    key_stack: Vec<String>,
    max_depth: usize,
}

impl<'a> EvalContext<'a> {
    pub fn new(args: &'a [Value], max_depth: usize) -> Self {
        Self {
            args,
            key_stack: Vec::new(),
            max_depth,
        }
    }

    /// The value bound to positional `_n`, for `n >= 2`.
    pub fn positional(&self, n: usize) -> Option<&'a Value> {
        n.checked_sub(2).and_then(|index| self.args.get(index))
    }

    /// Push a key about to be rendered.
    ///
    /// Returns error if:
    /// - Maximum depth exceeded
    /// - Cycle detected (key already on the stack)
    pub fn push_key(&mut self, key: &str) -> Result<(), EvalError> {
        if self.key_stack.len() >= self.max_depth {
            return Err(EvalError::MaxDepthExceeded);
        }
        if self.key_stack.iter().any(|k| k == key) {
            let mut chain = self.key_stack.clone();
            chain.push(key.to_string());
            return Err(EvalError::CyclicReference { chain });
        }
        self.key_stack.push(key.to_string());
        Ok(())
    }

    pub fn pop_key(&mut self) {
        self.key_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_two_is_first_argument() {
        let args = [Value::Int(7), Value::Bool(true)];
        let ctx = EvalContext::new(&args, 4);
        assert_eq!(ctx.positional(1), None);
        assert_eq!(ctx.positional(2), Some(&Value::Int(7)));
        assert_eq!(ctx.positional(3), Some(&Value::Bool(true)));
        assert_eq!(ctx.positional(4), None);
    }

    #[test]
    fn cycle_reports_chain() {
        let mut ctx = EvalContext::new(&[], 8);
        ctx.push_key("a").unwrap();
        ctx.push_key("b").unwrap();
        assert_eq!(
            ctx.push_key("a"),
            Err(EvalError::CyclicReference {
                chain: vec!["a".into(), "b".into(), "a".into()],
            })
        );
    }

    #[test]
    fn depth_is_bounded() {
        let mut ctx = EvalContext::new(&[], 1);
        ctx.push_key("a").unwrap();
        assert_eq!(ctx.push_key("b"), Err(EvalError::MaxDepthExceeded));
        ctx.pop_key();
        assert_eq!(ctx.push_key("b"), Ok(()));
    }
}
