mod common;

use common::{analyze, apply, create_test_service};

#[tokio::test]
async fn test_declaration_and_call_sites_rewrite_together() {
    let service = create_test_service();
    let code = r#"function scale(factor, value) {
    return factor * value;
}

const a = scale(rate, x);
const b = scale(rate, y);
"#;
    let analysis = analyze(&service, code, "javascript").await;
    let curry = analysis
        .detections
        .iter()
        .find(|d| d.rule == "curry")
        .expect("curry group detected");

    let result = apply(&service, code, "javascript", &curry.token).await;
    assert!(result.applied);
    let new_code = result.new_code.unwrap();

    assert!(new_code.contains("function scale(factor) {"));
    assert!(new_code.contains("return (value) =>"));
    assert!(new_code.contains("const a = scale(rate)(x);"));
    assert!(new_code.contains("const b = scale(rate)(y);"));
    assert!(
        !new_code.contains("scale(rate, x)"),
        "no original call site survives"
    );
}

#[tokio::test]
async fn test_typescript_signature_gets_type_chain() {
    let service = create_test_service();
    let code = r#"function join(sep: string, left: string, right: string): string {
    return left + sep + right;
}

const a = join(dash, x, y);
const b = join(dash, p, q);
"#;
    let analysis = analyze(&service, code, "typescript").await;
    let curry = analysis
        .detections
        .iter()
        .find(|d| d.rule == "curry")
        .expect("curry group detected");

    let new_code = apply(&service, code, "typescript", &curry.token)
        .await
        .new_code
        .expect("fix applies");

    assert!(new_code.contains(
        "function join(sep: string): (left: string) => (right: string) => string {"
    ));
    assert!(new_code.contains("const a = join(dash)(x)(y);"));
    assert!(new_code.contains("const b = join(dash)(p)(q);"));
}

#[tokio::test]
async fn test_two_fixed_arguments_apply_in_declaration_order() {
    let service = create_test_service();
    let code = r#"function blend(base, tint, amount) {
    return base + tint + amount;
}

blend(bg, accent, 0.25);
blend(bg, accent, 0.75);
"#;
    let analysis = analyze(&service, code, "javascript").await;
    let curry = analysis
        .detections
        .iter()
        .find(|d| d.rule == "curry")
        .expect("curry group detected");

    let new_code = apply(&service, code, "javascript", &curry.token)
        .await
        .new_code
        .expect("fix applies");

    assert!(new_code.contains("blend(bg)(accent)(0.25);"));
    assert!(new_code.contains("blend(bg)(accent)(0.75);"));
    assert!(new_code.contains("function blend(base) {"));
}

#[tokio::test]
async fn test_missing_declaration_declines_quietly() {
    let service = create_test_service();
    let code = "h(x, y);\nh(x, z);\n";
    let analysis = analyze(&service, code, "javascript").await;
    let token = &analysis.detections[0].token;

    let result = apply(&service, code, "javascript", token).await;
    assert!(!result.applied);
    assert_eq!(result.reason.as_deref(), Some("declaration_not_found"));
}

#[tokio::test]
async fn test_shared_trailing_argument_declines() {
    let service = create_test_service();
    // The shared text sits at the last position; no leading run exists.
    let code = r#"function h(a, b) { return a + b; }
h(x, z);
h(y, z);
"#;
    let analysis = analyze(&service, code, "javascript").await;
    let token = &analysis.detections[0].token;

    let result = apply(&service, code, "javascript", token).await;
    assert!(!result.applied);
    assert_eq!(result.reason.as_deref(), Some("not_applicable"));
}

#[tokio::test]
async fn test_single_parameter_function_declines() {
    let service = create_test_service();
    let code = "function id(v) { return v; }\nid(x);\nid(x);\n";
    let analysis = analyze(&service, code, "javascript").await;
    let token = &analysis.detections[0].token;

    let result = apply(&service, code, "javascript", token).await;
    assert!(!result.applied);
    assert_eq!(result.reason.as_deref(), Some("not_applicable"));
}
