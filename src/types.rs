use serde::{Deserialize, Serialize};

use crate::analysis::Detection;

// Analysis types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeCodeParam {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeCodeResult {
    pub detections: Vec<DetectionResult>,
    pub language: String,
    /// Digest of the analyzed source; tokens are only valid against it
    pub source_digest: String,
}

/// Wire form of a detection: message, location and the correlation
/// token. The structured candidate never travels; the token is how a
/// later apply call gets it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub rule: String,
    pub message: String,
    pub token: String,
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl DetectionResult {
    /// Convert a Detection into its wire form, resolving the byte span
    /// into line/column positions.
    pub fn from_detection(detection: &Detection, source: &str) -> Self {
        let (start_line, start_col) = line_col(source, detection.span.start);
        let (end_line, end_col) = line_col(source, detection.span.end);
        DetectionResult {
            rule: detection.rule.id().to_string(),
            message: detection.message.clone(),
            token: detection.token.clone(),
            text: source
                .get(detection.span.start..detection.span.end)
                .unwrap_or_default()
                .to_string(),
            start_line,
            end_line,
            start_col,
            end_col,
        }
    }
}

// Fix application types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRefactoringParam {
    pub code: String,
    pub language: String,
    /// Correlation token from a previous analyze_code call on the same code
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyRefactoringResult {
    /// Whether the source was rewritten
    pub applied: bool,

    /// The fully rewritten source (when applied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_code: Option<String>,

    /// Why nothing changed (when not applied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// Rule listing types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListRulesResult {
    pub rules: Vec<RuleInfo>,
}

// Debugging types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAstParam {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAstResult {
    pub ast: String,
    pub language: String,
}

/// Zero-based line/column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source[..offset.min(source.len())];
    let line = prefix.matches('\n').count();
    let col = prefix
        .rfind('\n')
        .map(|newline| offset - newline - 1)
        .unwrap_or(offset);
    (line, col)
}
