//! # Syntax Tree Model
//!
//! Language-neutral tree representation shared by every analysis and
//! rewrite pass. Nodes carry a tagged kind, a byte span into the source,
//! the covered source text and their ordered children. Nodes are never
//! mutated in place; rewrites construct new nodes and go through the
//! structural edit primitives in [`edit`].

pub mod build;
pub mod edit;
pub mod parse;
pub mod walk;

pub use parse::{language_from_str, parse_source};
pub use walk::{find_by_span, walk};

use serde::{Deserialize, Serialize};

/// Byte range into the source text of one parse.
///
/// Within a single parse, spans double as node identity for structural
/// edits. Synthesized nodes carry an empty span and are never edit
/// targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True for spans of synthesized nodes, which carry no source range.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely within this span.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Tagged node kind.
///
/// The variants cover the kinds the analyses dispatch on; everything
/// else (including anonymous tokens, whose kind string equals their
/// text) maps to [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    FunctionDeclaration,
    Identifier,
    CallExpression,
    Arguments,
    VariableDeclaration,
    VariableDeclarator,
    AssignmentExpression,
    ExpressionStatement,
    ReturnStatement,
    StatementBlock,
    FormalParameters,
    Parameter,
    ArrowFunction,
    TypeAnnotation,
    Other(String),
}

impl NodeKind {
    /// Map a tree-sitter kind string to the tagged kind.
    pub fn from_kind_str(kind: &str) -> Self {
        match kind {
            "program" => NodeKind::Program,
            "function_declaration" => NodeKind::FunctionDeclaration,
            "identifier" => NodeKind::Identifier,
            "call_expression" => NodeKind::CallExpression,
            "arguments" => NodeKind::Arguments,
            "lexical_declaration" | "variable_declaration" => NodeKind::VariableDeclaration,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "expression_statement" => NodeKind::ExpressionStatement,
            "return_statement" => NodeKind::ReturnStatement,
            "statement_block" => NodeKind::StatementBlock,
            "formal_parameters" => NodeKind::FormalParameters,
            "required_parameter" => NodeKind::Parameter,
            "arrow_function" => NodeKind::ArrowFunction,
            "type_annotation" => NodeKind::TypeAnnotation,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Program => "program",
            NodeKind::FunctionDeclaration => "function_declaration",
            NodeKind::Identifier => "identifier",
            NodeKind::CallExpression => "call_expression",
            NodeKind::Arguments => "arguments",
            NodeKind::VariableDeclaration => "variable_declaration",
            NodeKind::VariableDeclarator => "variable_declarator",
            NodeKind::AssignmentExpression => "assignment_expression",
            NodeKind::ExpressionStatement => "expression_statement",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::StatementBlock => "statement_block",
            NodeKind::FormalParameters => "formal_parameters",
            NodeKind::Parameter => "parameter",
            NodeKind::ArrowFunction => "arrow_function",
            NodeKind::TypeAnnotation => "type_annotation",
            NodeKind::Other(kind) => kind,
        }
    }
}

/// One tree element. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span, text: String, children: Vec<Node>) -> Self {
        Self {
            kind,
            span,
            text,
            children,
        }
    }

    /// Construct a node with no source range, used by the fragment
    /// builders for synthesized replacements.
    pub fn synthesized(kind: NodeKind, text: String, children: Vec<Node>) -> Self {
        Self {
            kind,
            span: Span::default(),
            text,
            children,
        }
    }

    /// Anonymous tokens ("(", ";", keywords) have a kind string equal to
    /// their own text. Mapped kinds are named syntax by construction, so
    /// an identifier that happens to be called "identifier" is not a
    /// token.
    pub fn is_token(&self) -> bool {
        matches!(self.kind, NodeKind::Other(_)) && self.kind.as_str() == self.text
    }

    /// Children that are real syntax, skipping anonymous tokens.
    pub fn named_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|child| !child.is_token())
    }

    /// First child of the given kind, if any.
    pub fn child_of_kind(&self, kind: &NodeKind) -> Option<&Node> {
        self.children.iter().find(|child| &child.kind == kind)
    }

    /// Render the subtree as an indented kind/span listing, for the
    /// `generate_ast` debugging tool.
    pub fn to_tree_string(&self) -> String {
        fn build(node: &Node, depth: usize, out: &mut String) {
            let indent = "  ".repeat(depth);
            out.push_str(&format!(
                "{}{}[{}:{}]",
                indent,
                node.kind.as_str(),
                node.span.start,
                node.span.end
            ));
            if node.children.is_empty() || node.text.len() <= 50 {
                let escaped = node.text.replace('\n', "\\n").replace('\r', "\\r");
                if !escaped.trim().is_empty() {
                    out.push_str(&format!(" \"{escaped}\""));
                }
            }
            out.push('\n');
            for child in &node.children {
                build(child, depth + 1, out);
            }
        }
        let mut out = String::new();
        build(self, 0, &mut out);
        out
    }
}
