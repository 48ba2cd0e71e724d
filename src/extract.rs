//! # Extractors
//!
//! Two small stateless passes shared by the pipe and curry analyses:
//! which name receives a statement's result, and which call a statement
//! performs. Both are pure functions over the tree walker and can be
//! called from any pass without setup.

use crate::tree::{Node, NodeKind, Span, walk};

/// A single function call as seen at its call site.
///
/// Argument identity is raw source text: two arguments match only when
/// their texts are byte-for-byte equal, so `a+b` and `a + b` are
/// different arguments. There is no semantic normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Callee text (the full expression left of the argument list)
    pub name: String,
    /// Argument texts in left-to-right order
    pub argument_texts: Vec<String>,
    pub arg_count: usize,
    /// Span of the call expression node
    pub span: Span,
    /// Full call text, used for reporting
    pub text: String,
    /// True when the callee is a plain identifier
    pub callee_is_simple: bool,
}

impl Invocation {
    /// The zero value returned when no call is found.
    pub fn none() -> Self {
        Self {
            name: String::new(),
            argument_texts: Vec::new(),
            arg_count: 0,
            span: Span::default(),
            text: String::new(),
            callee_is_simple: false,
        }
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty()
    }

    /// True when this call and `other` pass at least one identical
    /// argument text.
    pub fn shares_argument_with(&self, other: &Invocation) -> bool {
        self.argument_texts
            .iter()
            .any(|arg| other.argument_texts.contains(arg))
    }
}

/// The name receiving the result of `node`: the left-hand target of an
/// assignment, or the declared name of a declarator. Empty string when
/// neither applies.
pub fn extract_identifier(node: &Node) -> String {
    let mut value = String::new();
    walk(node, |n| {
        if !value.is_empty() {
            return false;
        }
        match n.kind {
            NodeKind::AssignmentExpression => {
                if let Some(target) = n.named_children().next() {
                    value = target.text.clone();
                }
                false
            }
            NodeKind::VariableDeclarator => {
                if let Some(name) = n.child_of_kind(&NodeKind::Identifier) {
                    value = name.text.clone();
                }
                false
            }
            _ => true,
        }
    });
    value
}

/// The first call expression reachable from `node`, without descending
/// into nested calls: argument texts are collected from the outermost
/// call only, each taken verbatim even when it contains further calls.
/// Returns the zero value when no call is present.
pub fn extract_invocation(node: &Node) -> Invocation {
    let mut found: Option<Invocation> = None;
    walk(node, |n| {
        if found.is_some() {
            return false;
        }
        if n.kind == NodeKind::CallExpression {
            found = Some(invocation_of(n));
            return false;
        }
        true
    });
    found.unwrap_or_else(Invocation::none)
}

fn invocation_of(call: &Node) -> Invocation {
    let callee = call.children.first();
    let argument_texts: Vec<String> = call
        .child_of_kind(&NodeKind::Arguments)
        .map(|args| args.named_children().map(|arg| arg.text.clone()).collect())
        .unwrap_or_default();
    Invocation {
        name: callee.map(|c| c.text.clone()).unwrap_or_default(),
        arg_count: argument_texts.len(),
        argument_texts,
        span: call.span,
        text: call.text.clone(),
        callee_is_simple: callee.is_some_and(|c| c.kind == NodeKind::Identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_source;
    use ast_grep_language::SupportLang as Language;

    fn first_statement(code: &str) -> Node {
        parse_source(code, Language::JavaScript).children[0].clone()
    }

    #[test]
    fn test_identifier_from_declarator() {
        let stmt = first_statement("const result = f(a);");
        assert_eq!(extract_identifier(&stmt), "result");
    }

    #[test]
    fn test_identifier_from_assignment() {
        let stmt = first_statement("data = f(a);");
        assert_eq!(extract_identifier(&stmt), "data");
    }

    #[test]
    fn test_identifier_absent() {
        let stmt = first_statement("f(a);");
        assert_eq!(extract_identifier(&stmt), "");
    }

    #[test]
    fn test_invocation_from_declaration() {
        let stmt = first_statement("const x = process(a, b);");
        let inv = extract_invocation(&stmt);
        assert_eq!(inv.name, "process");
        assert_eq!(inv.argument_texts, ["a", "b"]);
        assert_eq!(inv.arg_count, 2);
        assert!(inv.callee_is_simple);
    }

    #[test]
    fn test_invocation_stops_at_outer_call() {
        let stmt = first_statement("const x = outer(inner(a), b);");
        let inv = extract_invocation(&stmt);
        assert_eq!(inv.name, "outer");
        assert_eq!(inv.argument_texts, ["inner(a)", "b"]);
    }

    #[test]
    fn test_invocation_zero_value_when_no_call() {
        let stmt = first_statement("const x = 15;");
        let inv = extract_invocation(&stmt);
        assert!(inv.is_none());
        assert_eq!(inv.arg_count, 0);
    }

    #[test]
    fn test_member_callee_is_not_simple() {
        let stmt = first_statement("console.log(x);");
        let inv = extract_invocation(&stmt);
        assert_eq!(inv.name, "console.log");
        assert!(!inv.callee_is_simple);
    }

    #[test]
    fn test_shared_argument_is_raw_text() {
        let a = extract_invocation(&first_statement("f(a + b);"));
        let b = extract_invocation(&first_statement("f(a+b);"));
        assert!(!a.shares_argument_with(&b));
    }
}
