//! Tree-wide grouping of invocations that pin shared arguments.

use std::collections::HashMap;

use crate::extract::{Invocation, extract_invocation};
use crate::tree::{Node, NodeKind, walk};

/// Same-named, same-arity calls sharing argument texts.
///
/// Groups are disjoint: an invocation belongs to at most one group per
/// analysis run. The first member is the anchor whose location the
/// detection reports.
#[derive(Debug, Clone)]
pub struct CurryGroup {
    pub function_name: String,
    pub arg_count: usize,
    pub members: Vec<Invocation>,
    /// Argument texts appearing in at least two members, in first
    /// encounter order
    pub shared_args: Vec<String>,
}

impl CurryGroup {
    pub fn anchor(&self) -> &Invocation {
        &self.members[0]
    }
}

/// Partition all simple-callee invocations of the tree into disjoint
/// groups by shared argument text.
///
/// The grouping is one pass over an immutable snapshot taken in walk
/// order: each not-yet-consumed invocation pulls in every other
/// unconsumed call of the same name and arity that shares at least one
/// argument text with it. Calls that share with nobody stay ungrouped
/// and produce no candidate.
pub fn find_curry_groups(root: &Node) -> Vec<CurryGroup> {
    let mut invocations: Vec<Invocation> = Vec::new();
    walk(root, |n| {
        if n.kind == NodeKind::CallExpression {
            let invocation = extract_invocation(n);
            if invocation.callee_is_simple && invocation.arg_count > 0 {
                invocations.push(invocation);
            }
        }
        true
    });

    let mut consumed = vec![false; invocations.len()];
    let mut groups = Vec::new();

    for i in 0..invocations.len() {
        if consumed[i] {
            continue;
        }
        let matches: Vec<usize> = (0..invocations.len())
            .filter(|&j| {
                j != i
                    && !consumed[j]
                    && invocations[j].name == invocations[i].name
                    && invocations[j].arg_count == invocations[i].arg_count
                    && invocations[j].shares_argument_with(&invocations[i])
            })
            .collect();
        if matches.is_empty() {
            continue;
        }

        let mut member_indices = vec![i];
        member_indices.extend(&matches);
        member_indices.sort_unstable();
        for &index in &member_indices {
            consumed[index] = true;
        }

        let members: Vec<Invocation> = member_indices
            .iter()
            .map(|&index| invocations[index].clone())
            .collect();
        groups.push(CurryGroup {
            function_name: members[0].name.clone(),
            arg_count: members[0].arg_count,
            shared_args: shared_argument_texts(&members),
            members,
        });
    }

    groups
}

/// Argument texts present in more than one member, counted by presence
/// per member and kept in first encounter order.
fn shared_argument_texts(members: &[Invocation]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for member in members {
        let mut seen_in_member: Vec<&str> = Vec::new();
        for text in &member.argument_texts {
            if seen_in_member.contains(&text.as_str()) {
                continue;
            }
            seen_in_member.push(text);
            let count = counts.entry(text).or_insert(0);
            if *count == 0 {
                order.push(text);
            }
            *count += 1;
        }
    }
    order
        .into_iter()
        .filter(|text| counts[text] > 1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_source;
    use ast_grep_language::SupportLang as Language;

    fn groups_for(code: &str) -> Vec<CurryGroup> {
        find_curry_groups(&parse_source(code, Language::JavaScript))
    }

    #[test]
    fn test_shared_first_argument_forms_group() {
        let groups = groups_for("h(x, y);\nh(x, z);\nh(q, w);\n");
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.function_name, "h");
        assert_eq!(group.members.len(), 2);
        assert_eq!(group.shared_args, ["x"]);
    }

    #[test]
    fn test_sharing_with_a_consumed_member_does_not_join() {
        // h(q, z) shares z only with a call the first group already
        // consumed, so it stays ungrouped.
        let groups = groups_for("h(x, y);\nh(x, z);\nh(q, z);\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[0].shared_args, ["x"]);
    }

    #[test]
    fn test_groups_are_disjoint() {
        let groups = groups_for(
            "h(x, y);\nh(x, z);\nh(q, w);\nk(a, b);\nk(a, c);\nh(q, v);\n",
        );
        let mut spans = Vec::new();
        for group in &groups {
            for member in &group.members {
                assert!(
                    !spans.contains(&member.span),
                    "invocation appears in two groups"
                );
                spans.push(member.span);
            }
        }
    }

    #[test]
    fn test_arity_separates_buckets() {
        let groups = groups_for("h(x, y);\nh(x);\nh(x, z);\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].arg_count, 2);
    }

    #[test]
    fn test_no_shared_arguments_no_group() {
        let groups = groups_for("h(x, y);\nh(q, w);\n");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_member_expression_callees_are_ignored() {
        let groups = groups_for("console.log(x);\nconsole.log(x);\n");
        assert!(groups.is_empty());
    }
}
