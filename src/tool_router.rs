//! # Tool Router Module
//!
//! Handles routing of MCP tool calls to appropriate service methods.
//! Keeps the parameter parsing and response shaping out of the service
//! so the service surface stays plain Rust.

use crate::response_formatter::ResponseFormatter;
use crate::service::RefactorService;
use crate::types::*;

use rmcp::model::{CallToolRequestParam, CallToolResult, Content, ErrorData};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Routes tool calls to appropriate service methods
pub struct ToolRouter;

impl ToolRouter {
    /// Helper function to parse request parameters
    fn parse_params<T: DeserializeOwned>(request: &CallToolRequestParam) -> Result<T, ErrorData> {
        serde_json::from_value(serde_json::Value::Object(
            request.arguments.clone().unwrap_or_default(),
        ))
        .map_err(|e| ErrorData::invalid_params(Cow::Owned(e.to_string()), None))
    }

    /// Helper function to create JSON response
    fn create_json_response<T: serde::Serialize>(result: T) -> Result<CallToolResult, ErrorData> {
        let json_value = serde_json::to_value(&result)
            .map_err(|e| ErrorData::internal_error(Cow::Owned(e.to_string()), None))?;
        Ok(CallToolResult::success(vec![Content::json(json_value)?]))
    }

    /// Helper function to create formatted response
    fn create_formatted_response<T: serde::Serialize>(
        result: &T,
        summary: String,
    ) -> Result<CallToolResult, ErrorData> {
        ResponseFormatter::create_formatted_response(result, summary)
            .map_err(|e| ErrorData::internal_error(Cow::Owned(e.to_string()), None))
    }

    /// Route a tool call to the appropriate service method
    pub async fn route_tool_call(
        service: &RefactorService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        match request.name.as_ref() {
            "analyze_code" => Self::handle_analyze_code(service, request).await,
            "apply_refactoring" => Self::handle_apply_refactoring(service, request).await,
            "list_rules" => Self::handle_list_rules(service, request).await,
            "generate_ast" => Self::handle_generate_ast(service, request).await,
            _ => Err(ErrorData::method_not_found::<
                rmcp::model::CallToolRequestMethod,
            >()),
        }
    }

    async fn handle_analyze_code(
        service: &RefactorService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: AnalyzeCodeParam = Self::parse_params(&request)?;

        if param.code.is_empty() {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed(
                    "The 'analyze_code' tool requires a non-empty 'code' parameter containing the source to analyze.",
                ),
                None,
            ));
        }

        let result = service.analyze_code(param).await.map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_analyze_result(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_apply_refactoring(
        service: &RefactorService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: ApplyRefactoringParam = Self::parse_params(&request)?;

        if param.token.is_empty() {
            return Err(ErrorData::invalid_params(
                Cow::Borrowed(
                    "The 'apply_refactoring' tool requires the 'token' of a detection returned by 'analyze_code'. Run 'analyze_code' first.",
                ),
                None,
            ));
        }

        let result = service
            .apply_refactoring(param)
            .await
            .map_err(ErrorData::from)?;
        let summary = ResponseFormatter::format_apply_result(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_list_rules(
        service: &RefactorService,
        _request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let result = service.list_rules().await;
        let summary = ResponseFormatter::format_rules_result(&result);
        Self::create_formatted_response(&result, summary)
    }

    async fn handle_generate_ast(
        service: &RefactorService,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let param: GenerateAstParam = Self::parse_params(&request)?;
        let result = service.generate_ast(param).await.map_err(ErrorData::from)?;
        Self::create_json_response(result)
    }
}
