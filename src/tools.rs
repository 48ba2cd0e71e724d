use rmcp::model::{ListToolsResult, Tool};
use serde_json;
use std::sync::Arc;

pub struct ToolService;

impl ToolService {
    pub fn list_tools() -> ListToolsResult {
        ListToolsResult {
            tools: vec![
                Tool {
                    name: "analyze_code".into(),
                    description: Some("Detect functional refactoring opportunities (pipe chains, curryable calls) in a code snippet. Returns one detection per opportunity with a correlation token for apply_refactoring.".into()),
                    input_schema: Arc::new(serde_json::from_value(serde_json::json!({
                        "type": "object",
                        "properties": {
                            "code": { "type": "string", "description": "Source code to analyze" },
                            "language": { "type": "string", "description": "javascript, typescript or tsx" }
                        },
                        "required": ["code", "language"]
                    })).unwrap()),
                    annotations: None,
                },
                Tool {
                    name: "apply_refactoring".into(),
                    description: Some("Apply a previously detected refactoring. Pass the same code that was analyzed plus the detection's token; returns the rewritten source, or the reason nothing changed (stale token, unsafe rewrite, pattern no longer applicable).".into()),
                    input_schema: Arc::new(serde_json::from_value(serde_json::json!({
                        "type": "object",
                        "properties": {
                            "code": { "type": "string", "description": "The exact source the token was minted against" },
                            "language": { "type": "string", "description": "javascript, typescript or tsx" },
                            "token": { "type": "string", "description": "Correlation token from analyze_code" }
                        },
                        "required": ["code", "language", "token"]
                    })).unwrap()),
                    annotations: None,
                },
                Tool {
                    name: "list_rules".into(),
                    description: Some("List the available refactoring rules.".into()),
                    input_schema: Arc::new(serde_json::from_value(serde_json::json!({
                        "type": "object",
                        "properties": {}
                    })).unwrap()),
                    annotations: None,
                },
                Tool {
                    name: "generate_ast".into(),
                    description: Some("Render the syntax tree of a code snippet, for understanding why a pattern does or does not match.".into()),
                    input_schema: Arc::new(serde_json::from_value(serde_json::json!({
                        "type": "object",
                        "properties": {
                            "code": { "type": "string" },
                            "language": { "type": "string" }
                        },
                        "required": ["code", "language"]
                    })).unwrap()),
                    annotations: None,
                },
            ],
            ..Default::default()
        }
    }
}
