mod common;

use common::{analyze, create_test_service};

const CHAIN_WITH_RETURN: &str = r#"function run(a) {
    const v1 = f(a);
    const v2 = g(v1);
    return v2;
}"#;

#[tokio::test]
async fn test_basic_chain_is_detected() {
    let service = create_test_service();
    let result = analyze(&service, CHAIN_WITH_RETURN, "javascript").await;

    assert_eq!(result.detections.len(), 1);
    let detection = &result.detections[0];
    assert_eq!(detection.rule, "pipe");
    assert!(detection.message.contains("'run'"));
    assert!(detection.message.contains("f -> g"));
    assert!(!detection.token.is_empty());
}

#[tokio::test]
async fn test_detection_reports_chain_start_location() {
    let service = create_test_service();
    let result = analyze(&service, CHAIN_WITH_RETURN, "javascript").await;

    let detection = &result.detections[0];
    // The reported location is the first chained statement.
    assert_eq!(detection.start_line, 1);
    assert_eq!(detection.text, "const v1 = f(a);");
}

#[tokio::test]
async fn test_outside_reference_is_reported_but_flagged() {
    let service = create_test_service();
    let code = r#"function run(a) {
    const v1 = f(a);
    const v2 = g(v1);
    log(v1);
    return v2;
}"#;
    let result = analyze(&service, code, "javascript").await;

    assert_eq!(result.detections.len(), 1);
    assert!(
        result.detections[0]
            .message
            .contains("still referenced elsewhere")
    );
}

#[tokio::test]
async fn test_single_call_is_not_a_chain() {
    let service = create_test_service();
    let code = r#"function run(a) {
    const v1 = f(a);
    return v1;
}"#;
    let result = analyze(&service, code, "javascript").await;
    assert!(result.detections.is_empty());
}

#[tokio::test]
async fn test_branching_ends_the_chain() {
    let service = create_test_service();
    let code = r#"function run(a) {
    const v1 = f(a);
    if (v1) {
        return null;
    }
    const v2 = g(v1);
    return v2;
}"#;
    let result = analyze(&service, code, "javascript").await;
    assert!(
        result.detections.is_empty(),
        "one call before the branch is not a chain"
    );
}

#[tokio::test]
async fn test_already_piped_code_yields_nothing() {
    let service = create_test_service();
    let code = r#"function run(a) {
    return pipe(f)(g)(a);
}"#;
    let result = analyze(&service, code, "javascript").await;
    assert!(result.detections.is_empty());
}

#[tokio::test]
async fn test_chains_in_two_functions_are_both_found() {
    let service = create_test_service();
    let code = r#"function first(a) {
    const v1 = f(a);
    const v2 = g(v1);
    return v2;
}

function second(b) {
    const w1 = p(b);
    const w2 = q(w1);
    return w2;
}"#;
    let result = analyze(&service, code, "javascript").await;
    let pipes: Vec<_> = result
        .detections
        .iter()
        .filter(|d| d.rule == "pipe")
        .collect();
    assert_eq!(pipes.len(), 2);
    assert!(pipes[0].message.contains("'first'"));
    assert!(pipes[1].message.contains("'second'"));
}
