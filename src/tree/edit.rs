//! Structural edit primitives.
//!
//! Rewrites never splice text ad hoc: they queue replace/remove/insert
//! operations against nodes of one parsed tree and commit them in a
//! single pass. A commit either produces the fully edited source or
//! fails without any change; overlapping edits are rejected.

use super::{Node, Span};
use crate::errors::ServiceError;

enum EditOp {
    Replace(String),
    Remove,
    InsertAfter(String),
}

struct Edit {
    target: Span,
    op: EditOp,
}

/// Collects structural edits against one source text.
pub struct TreeEditor<'a> {
    source: &'a str,
    edits: Vec<Edit>,
}

impl<'a> TreeEditor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Replace `target` with the rendered form of `replacement`.
    pub fn replace_node(&mut self, target: &Node, replacement: &Node) {
        self.edits.push(Edit {
            target: target.span,
            op: EditOp::Replace(replacement.text.clone()),
        });
    }

    /// Remove `target` along with its line when the removal would leave
    /// the line blank.
    pub fn remove_node(&mut self, target: &Node) {
        self.edits.push(Edit {
            target: target.span,
            op: EditOp::Remove,
        });
    }

    /// Insert the rendered form of `inserted` after `target`, separated
    /// by a blank line.
    pub fn insert_after(&mut self, target: &Node, inserted: &Node) {
        self.edits.push(Edit {
            target: target.span,
            op: EditOp::InsertAfter(inserted.text.clone()),
        });
    }

    /// Apply all queued edits, returning the new source text.
    pub fn commit(self) -> Result<String, ServiceError> {
        let mut splices: Vec<(Span, String)> = Vec::with_capacity(self.edits.len());
        for edit in &self.edits {
            if edit.target.end > self.source.len() || edit.target.is_empty() {
                return Err(ServiceError::Internal(format!(
                    "edit target {}..{} is not part of the source",
                    edit.target.start, edit.target.end
                )));
            }
            match &edit.op {
                EditOp::Replace(text) => splices.push((edit.target, text.clone())),
                EditOp::Remove => {
                    splices.push((expand_for_removal(self.source, edit.target), String::new()))
                }
                EditOp::InsertAfter(text) => splices.push((
                    Span::new(edit.target.end, edit.target.end),
                    format!("\n\n{text}"),
                )),
            }
        }

        splices.sort_by_key(|(span, _)| (span.start, span.end));
        let mut cursor = 0usize;
        let mut output = String::with_capacity(self.source.len());
        for (span, text) in splices {
            if span.start < cursor {
                return Err(ServiceError::Internal(
                    "overlapping structural edits".to_string(),
                ));
            }
            output.push_str(&self.source[cursor..span.start]);
            output.push_str(&text);
            cursor = span.end;
        }
        output.push_str(&self.source[cursor..]);
        Ok(output)
    }
}

/// Grow a removal span over surrounding indentation and the trailing
/// newline so deleted statements do not leave blank lines behind.
fn expand_for_removal(source: &str, span: Span) -> Span {
    let bytes = source.as_bytes();
    let mut start = span.start;
    while start > 0 && (bytes[start - 1] == b' ' || bytes[start - 1] == b'\t') {
        start -= 1;
    }
    let at_line_start = start == 0 || bytes[start - 1] == b'\n';

    let mut end = span.end;
    while end < bytes.len() && (bytes[end] == b' ' || bytes[end] == b'\t') {
        end += 1;
    }
    if at_line_start && end < bytes.len() && bytes[end] == b'\n' {
        end += 1;
    } else if !at_line_start {
        // Mid-line removal: keep the line, drop only the node itself.
        start = span.start;
        end = span.end;
    }
    Span::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn node_at(source: &str, fragment: &str) -> Node {
        let start = source.find(fragment).expect("fragment present");
        Node::new(
            NodeKind::Other("statement".to_string()),
            Span::new(start, start + fragment.len()),
            fragment.to_string(),
            vec![],
        )
    }

    fn synthesized(text: &str) -> Node {
        Node::synthesized(NodeKind::ExpressionStatement, text.to_string(), vec![])
    }

    #[test]
    fn test_replace_single_node() {
        let source = "const a = 1;\nconst b = 2;\n";
        let mut editor = TreeEditor::new(source);
        editor.replace_node(&node_at(source, "const b = 2;"), &synthesized("const b = 3;"));
        assert_eq!(editor.commit().unwrap(), "const a = 1;\nconst b = 3;\n");
    }

    #[test]
    fn test_remove_swallows_line() {
        let source = "const a = 1;\n    const b = 2;\nconst c = 3;\n";
        let mut editor = TreeEditor::new(source);
        editor.remove_node(&node_at(source, "const b = 2;"));
        assert_eq!(editor.commit().unwrap(), "const a = 1;\nconst c = 3;\n");
    }

    #[test]
    fn test_insert_after_appends_with_blank_line() {
        let source = "const a = 1;";
        let mut editor = TreeEditor::new(source);
        editor.insert_after(&node_at(source, "const a = 1;"), &synthesized("const b = 2;"));
        assert_eq!(editor.commit().unwrap(), "const a = 1;\n\nconst b = 2;");
    }

    #[test]
    fn test_overlapping_edits_rejected() {
        let source = "const abc = 1;";
        let mut editor = TreeEditor::new(source);
        editor.replace_node(&node_at(source, "const abc = 1;"), &synthesized("x"));
        editor.remove_node(&node_at(source, "abc"));
        assert!(editor.commit().is_err());
    }

    #[test]
    fn test_synthesized_target_rejected() {
        let source = "const a = 1;";
        let mut editor = TreeEditor::new(source);
        editor.remove_node(&synthesized("ghost"));
        assert!(editor.commit().is_err());
    }
}
