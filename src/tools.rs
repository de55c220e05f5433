//! Tool stubs for the advertising platform
//!
//! Tools are stateless; all per-call context arrives via `ToolContext`.
//! Each stub answers with a fixed textual contract that the launch flow
//! and the router read back from conversation history.

mod fetch_report;
mod generate_creatives;
mod launch_campaign;

pub use fetch_report::FetchReportTool;
pub use generate_creatives::GenerateCreativesTool;
pub use launch_campaign::LaunchCampaignTool;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::state_machine::ToolCall;

/// Result from tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub output: String,
}

impl ToolOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

/// All context needed for a tool invocation.
///
/// Created fresh for each tool call.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// The conversation this tool is executing within
    pub conversation_id: String,
}

impl ToolContext {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Name, description, and input schema of a registered tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Trait for tools the router can dispatch
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;

    /// Tool description, shown by `ToolRegistry::definitions`
    fn description(&self) -> String;

    /// JSON schema for tool input
    fn input_schema(&self) -> Value;

    /// Execute the tool with all context provided via `ToolContext`
    async fn run(&self, input: Value, ctx: ToolContext) -> ToolOutput;
}

/// Collection of tools available to conversations
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry with the three advertising-platform stubs
    pub fn standard() -> Self {
        Self::with_tools(vec![
            Arc::new(GenerateCreativesTool),
            Arc::new(LaunchCampaignTool),
            Arc::new(FetchReportTool),
        ])
    }

    /// Registry over an explicit tool set
    pub fn with_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// Names of registered tools, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Definitions of registered tools, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name with context
    pub async fn execute(
        &self,
        name: &str,
        input: Value,
        ctx: ToolContext,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        Ok(tool.run(input, ctx).await)
    }

    /// Execute a typed call produced by the launch flow or the router
    pub async fn dispatch(&self, call: &ToolCall, ctx: ToolContext) -> Result<ToolOutput, ToolError> {
        tracing::info!(
            tool = call.name(),
            tool_call_id = %call.id,
            conversation_id = %ctx.conversation_id,
            "Dispatching tool"
        );
        self.execute(call.name(), call.input.to_value(), ctx).await
    }
}

/// Render a URL list the way the stubs print it: `["a", "b"]`
fn format_url_list(urls: &[String]) -> String {
    serde_json::to_string(urls).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::state::{FetchReportInput, ToolInput};
    use serde_json::json;

    #[test]
    fn test_standard_tools_registered() {
        let registry = ToolRegistry::standard();
        assert_eq!(
            registry.names(),
            vec!["generate_creatives", "launch_campaign", "fetch_report"]
        );
    }

    #[test]
    fn test_definitions_describe_each_tool() {
        let definitions = ToolRegistry::standard().definitions();
        assert_eq!(definitions.len(), 3);
        for definition in &definitions {
            assert!(!definition.description.is_empty(), "{}", definition.name);
            assert_eq!(definition.input_schema["type"], "object");
        }
        assert_eq!(
            definitions[2].input_schema["required"],
            json!(["campaign_id"])
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = ToolRegistry::standard();
        let result = registry
            .execute("bash", json!({}), ToolContext::new("test-conv"))
            .await;
        assert_eq!(result, Err(ToolError::UnknownTool("bash".to_string())));
    }

    #[tokio::test]
    async fn test_dispatch_typed_call() {
        let registry = ToolRegistry::standard();
        let call = ToolCall::new(
            "report_1",
            ToolInput::FetchReport(FetchReportInput {
                campaign_id: "123".to_string(),
            }),
        );
        let output = registry
            .dispatch(&call, ToolContext::new("test-conv"))
            .await
            .unwrap();
        assert!(output.success);
        assert!(output.output.contains("Campaign ID: 123"));
    }
}
