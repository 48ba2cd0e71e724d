//! Statement-by-statement chain construction over one function body.

use std::collections::HashSet;

use super::PIPE_HELPER_NAME;
use crate::extract::{Invocation, extract_identifier, extract_invocation};
use crate::tree::{Node, NodeKind, Span, build, walk};

/// One link of a detected chain.
#[derive(Debug, Clone)]
pub struct PipePart {
    /// Name bound to this call's result; `None` for the terminal part
    pub bound_identifier: Option<String>,
    /// The call itself; zero value for the terminal part
    pub invocation: Invocation,
    /// Statement removed when the fix is applied
    pub node_to_remove: Span,
    /// Statement the composed expression stands in for
    pub node_to_replace: Span,
    /// Marks the `return` that consumes the final piped value
    pub is_terminal: bool,
}

/// A collapsible run of single-argument calls inside one function body.
#[derive(Debug, Clone)]
pub struct PipeCandidate {
    /// Enclosing function name, for reporting
    pub function_name: String,
    /// Ordered, deduplicated chain links
    pub parts: Vec<PipePart>,
    /// Argument text feeding the first call
    pub seed: String,
    /// False when intermediate results are referenced outside the chain;
    /// the candidate is then informational only
    pub can_rewrite: bool,
    /// Where the composed statement goes (the first chained statement)
    pub replacement_span: Span,
    /// Statements of dropped duplicate links; they still belong to the
    /// chain and are removed with it
    pub redundant_statements: Vec<Span>,
    /// The composed replacement statement
    pub synthesized: Node,
}

impl PipeCandidate {
    /// Names of the chained calls, in application order.
    pub fn call_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|part| !part.is_terminal)
            .map(|part| part.invocation.name.as_str())
            .collect()
    }
}

/// Scan a function declaration's body for a collapsible chain.
///
/// The scan starts at the first declaration or assignment whose
/// right-hand side is a single-argument call to a plain named function;
/// that call's argument becomes the seed. Later statements extend the
/// chain while their sole argument is the seed or an identifier the
/// chain has already bound; the first statement that does not fit ends
/// the scan. A trailing `return` of the current bound identifier folds
/// into the chain as its terminal part. Bodies already using the pipe
/// helper are skipped.
pub fn build_pipe_candidate(function: &Node) -> Option<PipeCandidate> {
    let name = function.child_of_kind(&NodeKind::Identifier)?.text.clone();
    let body = function.child_of_kind(&NodeKind::StatementBlock)?;

    if uses_pipe_helper(body) {
        return None;
    }

    let mut parts: Vec<PipePart> = Vec::new();
    let mut seed: Option<String> = None;
    let mut bound: Vec<String> = Vec::new();
    let mut terminal = false;

    for stmt in body.named_children() {
        match stmt.kind {
            NodeKind::ReturnStatement => {
                if let (Some(value), Some(current)) = (return_value(stmt), bound.last()) {
                    if &value == current {
                        parts.push(PipePart {
                            bound_identifier: None,
                            invocation: Invocation::none(),
                            node_to_remove: stmt.span,
                            node_to_replace: stmt.span,
                            is_terminal: true,
                        });
                        terminal = true;
                    }
                }
                break;
            }
            NodeKind::VariableDeclaration | NodeKind::ExpressionStatement => {
                let identifier = extract_identifier(stmt);
                let invocation = extract_invocation(stmt);
                let eligible = !invocation.is_none()
                    && invocation.callee_is_simple
                    && invocation.arg_count == 1
                    && invocation.name != PIPE_HELPER_NAME
                    && !identifier.is_empty();

                if eligible {
                    let argument = &invocation.argument_texts[0];
                    let links = parts.is_empty()
                        || seed.as_deref() == Some(argument.as_str())
                        || bound.iter().any(|id| id == argument);
                    if links {
                        if parts.is_empty() {
                            seed = Some(argument.clone());
                        }
                        bound.push(identifier.clone());
                        parts.push(PipePart {
                            bound_identifier: Some(identifier),
                            invocation,
                            node_to_remove: stmt.span,
                            node_to_replace: stmt.span,
                            is_terminal: false,
                        });
                        continue;
                    }
                }
                if !parts.is_empty() {
                    break;
                }
            }
            NodeKind::Other(ref kind) if kind == "comment" => {}
            _ => {
                if !parts.is_empty() {
                    break;
                }
            }
        }
    }

    let redundant_statements = dedup_parts(&mut parts);
    if parts.iter().filter(|p| !p.is_terminal).count() < 2 {
        return None;
    }

    let seed = seed.expect("chain has at least one part");
    let can_rewrite = references_are_contained(body, &parts, &redundant_statements, terminal);
    let synthesized = synthesize_statement(&parts, &seed, terminal);

    Some(PipeCandidate {
        function_name: name,
        replacement_span: parts[0].node_to_replace,
        parts,
        seed,
        can_rewrite,
        redundant_statements,
        synthesized,
    })
}

fn uses_pipe_helper(body: &Node) -> bool {
    let mut found = false;
    walk(body, |n| {
        if found {
            return false;
        }
        if n.kind == NodeKind::CallExpression {
            let mut callee = n.children.first();
            // Peel chained applications down to the base callee.
            while let Some(inner) = callee.filter(|c| c.kind == NodeKind::CallExpression) {
                callee = inner.children.first();
            }
            if callee.is_some_and(|c| c.kind == NodeKind::Identifier && c.text == PIPE_HELPER_NAME)
            {
                found = true;
                return false;
            }
        }
        true
    });
    found
}

fn return_value(stmt: &Node) -> Option<String> {
    stmt.named_children().next().map(|value| value.text.clone())
}

/// Drop repeated links, keeping the first occurrence in encounter order.
/// The dropped statements are returned: they stay part of the chain and
/// are removed with it, they just do not compose twice.
fn dedup_parts(parts: &mut Vec<PipePart>) -> Vec<Span> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut dropped = Vec::new();
    parts.retain(|part| {
        let key = (
            part.bound_identifier.clone().unwrap_or_default(),
            part.invocation.name.clone(),
            part.invocation.argument_texts.first().cloned().unwrap_or_default(),
        );
        let fresh = seen.insert(key);
        if !fresh {
            dropped.push(part.node_to_remove);
        }
        fresh
    });
    dropped
}

/// Check that no statement outside the chain reads an identifier the
/// rewrite removes. Without a terminal part the last binding survives in
/// the replacement declaration, so only the intermediates count.
fn references_are_contained(
    body: &Node,
    parts: &[PipePart],
    redundant: &[Span],
    terminal: bool,
) -> bool {
    let mut removed: HashSet<Span> = parts.iter().map(|p| p.node_to_remove).collect();
    removed.extend(redundant.iter().copied());
    let mut checked: HashSet<&str> = parts
        .iter()
        .filter_map(|p| p.bound_identifier.as_deref())
        .collect();
    if !terminal {
        if let Some(last) = parts
            .iter()
            .rev()
            .find_map(|p| p.bound_identifier.as_deref())
        {
            checked.remove(last);
        }
    }

    let mut contained = true;
    walk(body, |n| {
        if !contained || removed.contains(&n.span) {
            return false;
        }
        if n.kind == NodeKind::Identifier && checked.contains(n.text.as_str()) {
            contained = false;
            return false;
        }
        true
    });
    contained
}

/// Compose `pipe(f)(g)(...)(seed)` and wrap it in the statement that
/// stands in for the chain.
fn synthesize_statement(parts: &[PipePart], seed: &str, terminal: bool) -> Node {
    let mut names = parts
        .iter()
        .filter(|p| !p.is_terminal)
        .map(|p| build::identifier(&p.invocation.name));
    let head = build::call(
        build::identifier(PIPE_HELPER_NAME),
        vec![names.next().expect("chain has at least one call")],
    );
    let composed = build::call_chain(head, names.chain([build::verbatim(seed)]));

    if terminal {
        build::return_statement(composed)
    } else {
        let last_bound = parts
            .iter()
            .rev()
            .find_map(|p| p.bound_identifier.as_deref())
            .expect("non-terminal chain ends in a binding");
        build::const_declaration(last_bound, composed)
    }
}
