//! # Refactor Service
//!
//! Orchestrates parse → analyze → report/apply for the MCP tools and
//! implements the MCP server handler. Completed analysis runs are
//! cached behind an LRU keyed by language and source digest; a cached
//! run is immutable, so concurrent tool calls share it safely.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use rmcp::{
    ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorData, Implementation, InitializeResult,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
    },
    service::{RequestContext, RoleServer},
};
use tracing::{debug, info};

use crate::analysis::{AnalysisRun, FixOutcome, RuleId, source_digest};
use crate::config::ServiceConfig;
use crate::errors::ServiceError;
use crate::tool_router::ToolRouter;
use crate::tools::ToolService;
use crate::tree::{Node, language_from_str, parse_source};
use crate::types::*;

struct CachedAnalysis {
    root: Node,
    run: AnalysisRun,
}

#[derive(Clone)]
pub struct RefactorService {
    config: ServiceConfig,
    run_cache: Arc<Mutex<LruCache<String, Arc<CachedAnalysis>>>>,
}

impl Default for RefactorService {
    fn default() -> Self {
        Self::new()
    }
}

impl RefactorService {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        let cache_size = NonZeroUsize::new(config.analysis_cache_size)
            .unwrap_or(NonZeroUsize::new(100).unwrap());
        Self {
            config,
            run_cache: Arc::new(Mutex::new(LruCache::new(cache_size))),
        }
    }

    /// Parse and analyze `code`, or return the cached run for it.
    fn analysis_for(&self, code: &str, language: &str) -> Result<Arc<CachedAnalysis>, ServiceError> {
        if code.len() > self.config.max_source_size {
            return Err(ServiceError::SourceTooLarge {
                size: code.len(),
                limit: self.config.max_source_size,
            });
        }
        let lang = language_from_str(language)?;
        let key = format!("{lang}:{}", source_digest(code));

        {
            let mut cache = self.run_cache.lock().unwrap();
            if let Some(cached) = cache.get(&key) {
                debug!("analysis cache hit");
                return Ok(Arc::clone(cached));
            }
        }

        let root = parse_source(code, lang);
        let run = AnalysisRun::analyze(code, &root, lang);
        let cached = Arc::new(CachedAnalysis { root, run });

        let mut cache = self.run_cache.lock().unwrap();
        cache.put(key, Arc::clone(&cached));
        Ok(cached)
    }

    /// Detect pipe and curry opportunities in a code snippet.
    pub async fn analyze_code(
        &self,
        param: AnalyzeCodeParam,
    ) -> Result<AnalyzeCodeResult, ServiceError> {
        info!("Analyzing {} bytes of {}", param.code.len(), param.language);
        let analysis = self.analysis_for(&param.code, &param.language)?;
        let detections: Vec<DetectionResult> = analysis
            .run
            .detections()
            .iter()
            .take(self.config.limit)
            .map(|detection| DetectionResult::from_detection(detection, &param.code))
            .collect();
        Ok(AnalyzeCodeResult {
            detections,
            language: param.language,
            source_digest: source_digest(&param.code),
        })
    }

    /// Apply the candidate behind a correlation token, returning the
    /// rewritten source or the reason nothing changed.
    pub async fn apply_refactoring(
        &self,
        param: ApplyRefactoringParam,
    ) -> Result<ApplyRefactoringResult, ServiceError> {
        info!("Applying refactoring {}", param.token);
        let analysis = self.analysis_for(&param.code, &param.language)?;
        match analysis
            .run
            .apply_fix(&param.code, &analysis.root, &param.token)?
        {
            FixOutcome::Applied { new_source, .. } => Ok(ApplyRefactoringResult {
                applied: true,
                new_code: Some(new_source),
                reason: None,
            }),
            FixOutcome::NoChange { reason } => {
                debug!("fix request produced no change: {reason}");
                Ok(ApplyRefactoringResult {
                    applied: false,
                    new_code: None,
                    reason: Some(reason.as_str().to_string()),
                })
            }
        }
    }

    /// List the available refactoring rules.
    pub async fn list_rules(&self) -> ListRulesResult {
        ListRulesResult {
            rules: RuleId::ALL
                .iter()
                .map(|rule| RuleInfo {
                    id: rule.id().to_string(),
                    name: rule.name().to_string(),
                    description: rule.description().to_string(),
                })
                .collect(),
        }
    }

    /// Render the parsed tree of a snippet, for debugging patterns.
    pub async fn generate_ast(
        &self,
        param: GenerateAstParam,
    ) -> Result<GenerateAstResult, ServiceError> {
        if param.code.len() > self.config.max_source_size {
            return Err(ServiceError::SourceTooLarge {
                size: param.code.len(),
                limit: self.config.max_source_size,
            });
        }
        let lang = language_from_str(&param.language)?;
        let root = parse_source(&param.code, lang);
        Ok(GenerateAstResult {
            ast: root.to_tree_string(),
            language: param.language,
        })
    }
}

impl ServerHandler for RefactorService {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "functional-refactor-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            capabilities: ServerCapabilities {
                tools: Some(rmcp::model::ToolsCapability {
                    list_changed: Some(true),
                }),
                ..Default::default()
            },
            instructions: Some(
                "This MCP server detects functional refactoring opportunities in \
                 JavaScript/TypeScript snippets: sequential call chains that can become \
                 a composed pipe, and repeated calls that can be curried. Run \
                 analyze_code first, then pass a detection's token to apply_refactoring \
                 with the same code to get the rewritten source."
                    .into(),
            ),
        }
    }

    #[tracing::instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ToolService::list_tools())
    }

    #[tracing::instrument(skip(self, request, _context), fields(tool_name = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        ToolRouter::route_tool_call(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_runs_are_cached() {
        let service = RefactorService::new();
        let code = "function h(a, b) { return a + b; }\nh(x, y);\nh(x, z);\n";
        let first = service.analysis_for(code, "javascript").unwrap();
        let second = service.analysis_for(code, "javascript").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_oversized_source_is_rejected() {
        let service = RefactorService::with_config(ServiceConfig {
            max_source_size: 8,
            ..Default::default()
        });
        let result = tokio_test::block_on(service.analyze_code(AnalyzeCodeParam {
            code: "const aLongName = 1;".to_string(),
            language: "javascript".to_string(),
        }));
        assert!(matches!(result, Err(ServiceError::SourceTooLarge { .. })));
    }

    #[test]
    fn test_detection_and_apply_round_trip() {
        let service = RefactorService::new();
        let code = r#"function run(a) {
    const v1 = f(a);
    const v2 = g(v1);
    return v2;
}"#;
        let analysis = tokio_test::block_on(service.analyze_code(AnalyzeCodeParam {
            code: code.to_string(),
            language: "javascript".to_string(),
        }))
        .unwrap();
        assert_eq!(analysis.detections.len(), 1);

        let applied = tokio_test::block_on(service.apply_refactoring(ApplyRefactoringParam {
            code: code.to_string(),
            language: "javascript".to_string(),
            token: analysis.detections[0].token.clone(),
        }))
        .unwrap();
        assert!(applied.applied);
        assert!(applied.new_code.unwrap().contains("pipe(f)(g)(a)"));
    }
}
