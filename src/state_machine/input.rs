//! Inputs that drive one launch-flow transition

use super::state::ToolResult;

/// Latest user text plus, optionally, the tool result that arrived since the
/// previous user turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    pub text: String,
    pub tool_result: Option<ToolResult>,
}

impl TurnInput {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_result: None,
        }
    }

    pub fn with_tool_result(mut self, result: ToolResult) -> Self {
        self.tool_result = Some(result);
        self
    }
}

/// Immutable configuration for a launch flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowContext {
    /// How many creatives to ask the generation tool for
    pub creative_count: u32,
}

impl Default for FlowContext {
    fn default() -> Self {
        Self {
            creative_count: super::state::DEFAULT_CREATIVE_COUNT,
        }
    }
}
