//! Typed builders for synthesized fragments.
//!
//! Replacement nodes are constructed directly as [`Node`] values with
//! their rendered text derived from their parts; generated code never
//! takes a round trip through the parser.

use super::{Node, NodeKind};

pub fn identifier(name: &str) -> Node {
    Node::synthesized(NodeKind::Identifier, name.to_string(), vec![])
}

/// A fragment preserved verbatim from the original source (argument
/// texts, function bodies).
pub fn verbatim(text: &str) -> Node {
    Node::synthesized(NodeKind::Other("fragment".to_string()), text.to_string(), vec![])
}

/// `callee(arg, arg, ...)`
pub fn call(callee: Node, args: Vec<Node>) -> Node {
    let rendered_args = args
        .iter()
        .map(|arg| arg.text.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!("{}({})", callee.text, rendered_args);
    let arguments = Node::synthesized(
        NodeKind::Arguments,
        format!("({rendered_args})"),
        args,
    );
    Node::synthesized(NodeKind::CallExpression, text, vec![callee, arguments])
}

/// `head(link)(link)...` — sequential single-argument applications.
pub fn call_chain(head: Node, links: impl IntoIterator<Item = Node>) -> Node {
    links
        .into_iter()
        .fold(head, |acc, link| call(acc, vec![link]))
}

/// `return expr;`
pub fn return_statement(expr: Node) -> Node {
    let text = format!("return {};", expr.text);
    Node::synthesized(NodeKind::ReturnStatement, text, vec![expr])
}

/// `const name = init;`
pub fn const_declaration(name: &str, init: Node) -> Node {
    let text = format!("const {} = {};", name, init.text);
    let declarator = Node::synthesized(
        NodeKind::VariableDeclarator,
        format!("{} = {}", name, init.text),
        vec![identifier(name), init],
    );
    Node::synthesized(NodeKind::VariableDeclaration, text, vec![declarator])
}

/// `(param) => body` or `(param: Type) => body`.
pub fn arrow_function(param: &str, param_type: Option<&str>, body: Node) -> Node {
    let rendered_param = match param_type {
        Some(ty) => format!("{param}: {ty}"),
        None => param.to_string(),
    };
    let text = format!("({rendered_param}) => {}", body.text);
    Node::synthesized(NodeKind::ArrowFunction, text, vec![body])
}

/// A one-statement block body.
pub fn statement_block(statement: Node) -> Node {
    let indented = statement
        .text
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    let text = format!("{{\n{indented}\n}}");
    Node::synthesized(NodeKind::StatementBlock, text, vec![statement])
}

/// `function name(param) body` with optional parameter and return type
/// annotations.
pub fn function_declaration(
    name: &str,
    param: &str,
    param_type: Option<&str>,
    return_type: Option<&str>,
    body: Node,
) -> Node {
    let rendered_param = match param_type {
        Some(ty) => format!("{param}: {ty}"),
        None => param.to_string(),
    };
    let rendered_return = match return_type {
        Some(ty) => format!(": {ty}"),
        None => String::new(),
    };
    let text = format!(
        "function {name}({rendered_param}){rendered_return} {}",
        body.text
    );
    Node::synthesized(
        NodeKind::FunctionDeclaration,
        text,
        vec![identifier(name), body],
    )
}
