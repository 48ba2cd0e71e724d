use crate::types::*;
use rmcp::model::{CallToolResult, Content};
use serde_json;

pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Create a formatted response with both JSON data and human-readable text
    pub fn create_formatted_response<T>(
        result: &T,
        summary: String,
    ) -> Result<CallToolResult, Box<dyn std::error::Error + Send + Sync>>
    where
        T: serde::Serialize,
    {
        let json_value = serde_json::to_value(result)?;

        let contents = vec![Content::text(summary), Content::json(json_value)?];

        Ok(CallToolResult::success(contents))
    }

    /// Format an analysis result with a readable summary
    pub fn format_analyze_result(result: &AnalyzeCodeResult) -> String {
        if result.detections.is_empty() {
            return "🔍 **No refactoring opportunities found**".to_string();
        }

        let pipes = result
            .detections
            .iter()
            .filter(|d| d.rule == "pipe")
            .count();
        let curries = result.detections.len() - pipes;

        let mut summary = format!(
            "🔍 **Refactoring opportunities**: {} total ({} pipe, {} curry)\n",
            result.detections.len(),
            pipes,
            curries
        );
        for (i, detection) in result.detections.iter().enumerate() {
            summary.push_str(&format!(
                "\n{}. [{}] line {}: {}\n   token: `{}`",
                i + 1,
                detection.rule,
                detection.start_line + 1,
                detection.message,
                detection.token
            ));
        }
        summary
    }

    /// Format a fix application result with a readable summary
    pub fn format_apply_result(result: &ApplyRefactoringResult) -> String {
        if result.applied {
            "✅ **Refactoring applied** — the rewritten source is in `new_code`".to_string()
        } else {
            format!(
                "⏭️ **No change** — {}",
                result.reason.as_deref().unwrap_or("not applicable")
            )
        }
    }

    /// Format the rule listing with a readable summary
    pub fn format_rules_result(result: &ListRulesResult) -> String {
        let mut summary = format!("📋 **{} refactoring rules**\n", result.rules.len());
        for rule in &result.rules {
            summary.push_str(&format!("\n- `{}`: {}", rule.id, rule.name));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_summary_counts_rules() {
        let result = AnalyzeCodeResult {
            detections: vec![
                DetectionResult {
                    rule: "pipe".to_string(),
                    message: "Function 'run' can compose f -> g into a pipe".to_string(),
                    token: "abcd".to_string(),
                    text: String::new(),
                    start_line: 1,
                    end_line: 1,
                    start_col: 4,
                    end_col: 20,
                },
                DetectionResult {
                    rule: "curry".to_string(),
                    message: "Arguments (x) in 'h(x, y)' can be curried".to_string(),
                    token: "efgh".to_string(),
                    text: String::new(),
                    start_line: 5,
                    end_line: 5,
                    start_col: 0,
                    end_col: 7,
                },
            ],
            language: "javascript".to_string(),
            source_digest: "d".repeat(64),
        };
        let summary = ResponseFormatter::format_analyze_result(&result);
        assert!(summary.contains("1 pipe, 1 curry"));
        assert!(summary.contains("token: `abcd`"));
    }

    #[test]
    fn test_apply_summary_reports_reason() {
        let result = ApplyRefactoringResult {
            applied: false,
            new_code: None,
            reason: Some("unsafe_rewrite".to_string()),
        };
        assert!(
            ResponseFormatter::format_apply_result(&result).contains("unsafe_rewrite")
        );
    }
}
