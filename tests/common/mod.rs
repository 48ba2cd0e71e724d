// Common test utilities
use functional_refactor_mcp::config::ServiceConfig;
use functional_refactor_mcp::service::RefactorService;
use functional_refactor_mcp::types::*;

pub fn create_test_service() -> RefactorService {
    RefactorService::with_config(ServiceConfig::default())
}

pub async fn analyze(service: &RefactorService, code: &str, language: &str) -> AnalyzeCodeResult {
    service
        .analyze_code(AnalyzeCodeParam {
            code: code.to_string(),
            language: language.to_string(),
        })
        .await
        .expect("analysis should succeed")
}

pub async fn apply(
    service: &RefactorService,
    code: &str,
    language: &str,
    token: &str,
) -> ApplyRefactoringResult {
    service
        .apply_refactoring(ApplyRefactoringParam {
            code: code.to_string(),
            language: language.to_string(),
            token: token.to_string(),
        })
        .await
        .expect("apply should succeed")
}
