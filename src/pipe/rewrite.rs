//! Applies an accepted pipe candidate to the tree.

use super::{PIPE_HELPER_NAME, PipeCandidate};
use crate::errors::{ServiceError, SkipReason};
use crate::tree::edit::TreeEditor;
use crate::tree::{Node, NodeKind, build, find_by_span, walk};

/// Single composition helper emitted when the source does not define
/// one. Each application either composes a further function or, once a
/// non-function value arrives, runs the accumulated composition on it.
const PIPE_HELPER_SOURCE: &str = "function pipe(f) {
    return (next) => typeof next === \"function\" ? pipe((value) => next(f(value))) : f(next);
}";

/// Replace the chain's statements with the composed statement and inject
/// the `pipe` helper when absent. Refuses unsafe candidates; on success
/// returns the fully rewritten source.
pub fn apply_pipe_fix(
    source: &str,
    root: &Node,
    candidate: &PipeCandidate,
) -> Result<Result<String, SkipReason>, ServiceError> {
    if !candidate.can_rewrite {
        return Ok(Err(SkipReason::UnsafeRewrite));
    }

    let Some(first) = find_by_span(root, candidate.replacement_span) else {
        return Ok(Err(SkipReason::NotApplicable));
    };

    let mut editor = TreeEditor::new(source);
    editor.replace_node(first, &candidate.synthesized);
    let removals = candidate
        .parts
        .iter()
        .map(|part| part.node_to_remove)
        .chain(candidate.redundant_statements.iter().copied());
    for span in removals {
        if span == candidate.replacement_span {
            continue;
        }
        let Some(stmt) = find_by_span(root, span) else {
            return Ok(Err(SkipReason::NotApplicable));
        };
        editor.remove_node(stmt);
    }

    if !declares_pipe_helper(root) {
        if let Some(last_top_level) = root.children.last() {
            editor.insert_after(last_top_level, &build::verbatim(PIPE_HELPER_SOURCE));
        }
    }

    editor.commit().map(Ok)
}

fn declares_pipe_helper(root: &Node) -> bool {
    let mut found = false;
    walk(root, |n| {
        if found {
            return false;
        }
        if n.kind == NodeKind::FunctionDeclaration
            && n.child_of_kind(&NodeKind::Identifier)
                .is_some_and(|name| name.text == PIPE_HELPER_NAME)
        {
            found = true;
            return false;
        }
        true
    });
    found
}
