//! Depth-first, pre-order traversal with subtree pruning.
//!
//! This is the single traversal primitive of the crate; every detection
//! and rewrite pass goes through it so that visit order and pruning
//! semantics are defined once.

use super::{Node, Span};

/// Visit `root` and its descendants depth-first, pre-order. Returning
/// `false` from `visit` skips the node's descendants; siblings are
/// unaffected.
pub fn walk<F>(root: &Node, mut visit: F)
where
    F: FnMut(&Node) -> bool,
{
    walk_inner(root, &mut visit);
}

/// The first node covering exactly `span`, pre-order, descending only
/// through ancestors that contain it. Spans identify nodes within one
/// parse; synthesized nodes (empty spans) are never found.
pub fn find_by_span<'t>(root: &'t Node, span: Span) -> Option<&'t Node> {
    if span.is_empty() {
        return None;
    }
    if root.span == span {
        return Some(root);
    }
    if !root.span.contains(span) {
        return None;
    }
    root.children
        .iter()
        .find_map(|child| find_by_span(child, span))
}

fn walk_inner<F>(node: &Node, visit: &mut F)
where
    F: FnMut(&Node) -> bool,
{
    if !visit(node) {
        return;
    }
    for child in &node.children {
        walk_inner(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, Span};

    fn leaf(text: &str) -> Node {
        Node::new(NodeKind::Identifier, Span::default(), text.to_string(), vec![])
    }

    fn branch(text: &str, children: Vec<Node>) -> Node {
        Node::new(
            NodeKind::Other("branch".to_string()),
            Span::default(),
            text.to_string(),
            children,
        )
    }

    #[test]
    fn test_preorder_visits_all() {
        let tree = branch("a", vec![branch("b", vec![leaf("c")]), leaf("d")]);
        let mut seen = Vec::new();
        walk(&tree, |node| {
            seen.push(node.text.clone());
            true
        });
        assert_eq!(seen, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_by_span() {
        let inner = Node::new(
            NodeKind::Identifier,
            Span::new(2, 5),
            "abc".to_string(),
            vec![],
        );
        let tree = Node::new(
            NodeKind::Other("root".to_string()),
            Span::new(0, 10),
            "xxabcxxxxx".to_string(),
            vec![inner],
        );
        assert_eq!(find_by_span(&tree, Span::new(2, 5)).unwrap().text, "abc");
        assert!(find_by_span(&tree, Span::new(3, 6)).is_none());
        assert!(find_by_span(&tree, Span::default()).is_none());
    }

    #[test]
    fn test_pruning_skips_descendants_only() {
        let tree = branch("a", vec![branch("b", vec![leaf("c")]), leaf("d")]);
        let mut seen = Vec::new();
        walk(&tree, |node| {
            seen.push(node.text.clone());
            node.text != "b"
        });
        // "c" is under the pruned node, "d" is a sibling and still visited.
        assert_eq!(seen, ["a", "b", "d"]);
    }
}
