//! Curried declaration synthesis and call-site rewriting.

use super::CurryGroup;
use crate::errors::{ServiceError, SkipReason};
use crate::tree::edit::TreeEditor;
use crate::tree::{Node, NodeKind, Span, build, find_by_span};

/// A function declaration as the transformer needs it: ordered
/// parameters with optional type annotations, optional return type, and
/// the body kept verbatim.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<(String, Option<String>)>,
    pub return_type: Option<String>,
    pub body_text: String,
    pub decl_span: Span,
}

/// Locate the declaration of `name` in the tree. Returns `None` when the
/// declaration is absent or uses parameter shapes (defaults, rest,
/// destructuring) the rewrite cannot carry over.
pub fn find_function(root: &Node, name: &str) -> Option<FunctionSignature> {
    let declaration = find_declaration(root, name)?;

    let mut params = Vec::new();
    for param in declaration
        .child_of_kind(&NodeKind::FormalParameters)?
        .named_children()
    {
        match param.kind {
            NodeKind::Identifier => params.push((param.text.clone(), None)),
            NodeKind::Parameter => {
                let ident = param.child_of_kind(&NodeKind::Identifier)?;
                let annotation = param
                    .child_of_kind(&NodeKind::TypeAnnotation)
                    .and_then(annotation_type);
                params.push((ident.text.clone(), annotation));
            }
            _ => return None,
        }
    }

    Some(FunctionSignature {
        name: name.to_string(),
        params,
        return_type: declaration
            .child_of_kind(&NodeKind::TypeAnnotation)
            .and_then(annotation_type),
        body_text: declaration.child_of_kind(&NodeKind::StatementBlock)?.text.clone(),
        decl_span: declaration.span,
    })
}

/// First declaration of `name`, pre-order.
fn find_declaration<'t>(root: &'t Node, name: &str) -> Option<&'t Node> {
    if root.kind == NodeKind::FunctionDeclaration
        && root
            .child_of_kind(&NodeKind::Identifier)
            .is_some_and(|ident| ident.text == name)
    {
        return Some(root);
    }
    root.children
        .iter()
        .find_map(|child| find_declaration(child, name))
}

/// The annotated type, without the leading `:`.
fn annotation_type(annotation: &Node) -> Option<String> {
    annotation.named_children().next().map(|ty| ty.text.clone())
}

/// Length of the fixed prefix: the maximal leading run of parameter
/// positions at which every member passes the identical argument text.
/// Only this reading keeps the two-stage call sites computing the same
/// values as the originals.
fn fixed_prefix_len(signature: &FunctionSignature, group: &CurryGroup) -> usize {
    if group
        .members
        .iter()
        .any(|member| member.arg_count != signature.params.len())
    {
        return 0;
    }
    let anchor = group.anchor();
    let mut len = 0;
    for position in 0..signature.params.len() {
        let pinned = &anchor.argument_texts[position];
        if group
            .members
            .iter()
            .all(|member| &member.argument_texts[position] == pinned)
        {
            len += 1;
        } else {
            break;
        }
    }
    len
}

/// Right-nested chain of single-parameter functions: the outer function
/// keeps the name and first parameter; each arrow takes the next
/// parameter; the innermost arrow carries the original body verbatim.
/// Fully annotated signatures get the recursively built return-type
/// chain, innermost type outward.
fn build_curried_declaration(signature: &FunctionSignature) -> Node {
    let annotated = signature.return_type.is_some()
        && signature.params.iter().all(|(_, ty)| ty.is_some());

    let mut inner = build::verbatim(&signature.body_text);
    for (param, ty) in signature.params[1..].iter().rev() {
        inner = build::arrow_function(param, ty.as_deref(), inner);
    }

    let return_chain = if annotated {
        let mut chain = signature.return_type.clone().expect("checked above");
        for (param, ty) in signature.params[1..].iter().rev() {
            chain = format!("({}: {}) => {}", param, ty.as_deref().expect("checked above"), chain);
        }
        Some(chain)
    } else {
        None
    };

    let (first_param, first_type) = &signature.params[0];
    build::function_declaration(
        &signature.name,
        first_param,
        first_type.as_deref(),
        return_chain.as_deref(),
        build::statement_block(build::return_statement(inner)),
    )
}

/// Two-stage call: fixed prefix arguments first (they occupy the leading
/// positions), then the remaining arguments in their original call
/// order, each as one single-argument application.
fn build_two_stage_call(name: &str, argument_texts: &[String]) -> Node {
    let mut applications = argument_texts.iter().map(|arg| build::verbatim(arg));
    let head = build::call(
        build::identifier(name),
        vec![applications.next().expect("at least one fixed argument")],
    );
    build::call_chain(head, applications)
}

/// Replace the declaration with its curried form and every member call
/// site with two-stage application. All edits commit together or not at
/// all.
pub fn apply_curry_fix(
    source: &str,
    root: &Node,
    group: &CurryGroup,
) -> Result<Result<String, SkipReason>, ServiceError> {
    if group.shared_args.is_empty() || group.members.len() < 2 {
        return Ok(Err(SkipReason::NotApplicable));
    }

    let Some(signature) = find_function(root, &group.function_name) else {
        return Ok(Err(SkipReason::DeclarationNotFound));
    };
    if signature.params.len() < 2 {
        return Ok(Err(SkipReason::NotApplicable));
    }

    let fixed_len = fixed_prefix_len(&signature, group);
    if fixed_len == 0 {
        return Ok(Err(SkipReason::NotApplicable));
    }

    // A recursive member inside the declaration body would be preserved
    // verbatim with its old arity; refuse rather than mis-rewrite.
    if group
        .members
        .iter()
        .any(|member| signature.decl_span.contains(member.span))
    {
        return Ok(Err(SkipReason::NotApplicable));
    }

    let Some(declaration) = find_by_span(root, signature.decl_span) else {
        return Ok(Err(SkipReason::DeclarationNotFound));
    };

    let mut editor = TreeEditor::new(source);
    editor.replace_node(declaration, &build_curried_declaration(&signature));
    for member in &group.members {
        let Some(call) = find_by_span(root, member.span) else {
            return Ok(Err(SkipReason::NotApplicable));
        };
        editor.replace_node(
            call,
            &build_two_stage_call(&group.function_name, &member.argument_texts),
        );
    }

    editor.commit().map(Ok)
}
