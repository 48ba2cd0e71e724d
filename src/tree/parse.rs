//! Parsing front end.
//!
//! The only place in the crate that touches the tree-sitter stack.
//! Source text is parsed through ast-grep and converted into the
//! language-neutral [`Node`] model; everything downstream is independent
//! of the parser.

use std::str::FromStr;

use ast_grep_core::AstGrep;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang as Language;

use super::{Node, NodeKind, Span};
use crate::errors::ServiceError;

/// Resolve a user-supplied language name. Only the JavaScript family is
/// supported: the analyses assume a statement-oriented imperative
/// language with named function declarations.
pub fn language_from_str(name: &str) -> Result<Language, ServiceError> {
    let lang = Language::from_str(name)
        .map_err(|_| ServiceError::UnsupportedLanguage(name.to_string()))?;
    match lang {
        Language::JavaScript | Language::TypeScript | Language::Tsx => Ok(lang),
        _ => Err(ServiceError::UnsupportedLanguage(name.to_string())),
    }
}

/// Parse source text into the neutral tree model.
pub fn parse_source(code: &str, lang: Language) -> Node {
    let ast = AstGrep::new(code, lang);
    convert(ast.root())
}

fn convert(node: ast_grep_core::Node<StrDoc<Language>>) -> Node {
    let range = node.range();
    let children = node.children().map(convert).collect();
    Node::new(
        NodeKind::from_kind_str(&node.kind()),
        Span::new(range.start, range.end),
        node.text().to_string(),
        children,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_resolution() {
        assert!(language_from_str("javascript").is_ok());
        assert!(language_from_str("typescript").is_ok());
        assert!(language_from_str("python").is_err());
        assert!(language_from_str("not-a-language").is_err());
    }

    #[test]
    fn test_parse_simple_program() {
        let root = parse_source("const x = f(a);", Language::JavaScript);
        assert_eq!(root.kind, NodeKind::Program);
        assert_eq!(root.text, "const x = f(a);");
        assert_eq!(
            root.children[0].kind,
            NodeKind::VariableDeclaration,
            "top-level statement should be a variable declaration"
        );
    }

    #[test]
    fn test_spans_cover_source() {
        let code = "function id(v) { return v; }";
        let root = parse_source(code, Language::JavaScript);
        assert_eq!(root.span, Span::new(0, code.len()));
        let decl = &root.children[0];
        assert_eq!(decl.kind, NodeKind::FunctionDeclaration);
        assert_eq!(&code[decl.span.start..decl.span.end], decl.text);
    }
}
