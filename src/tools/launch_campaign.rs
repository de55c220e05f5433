//! Campaign launch stub

use super::{format_url_list, Tool, ToolContext, ToolOutput};
use crate::state_machine::state::LaunchCampaignInput;
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct LaunchCampaignTool;

#[async_trait]
impl Tool for LaunchCampaignTool {
    fn name(&self) -> &'static str {
        "launch_campaign"
    }

    fn description(&self) -> String {
        "Launch an ad campaign with a confirmed objective, geo, daily budget and creative URLs.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["objective", "geo", "daily_budget", "creative_urls"],
            "properties": {
                "objective": {"type": "string"},
                "geo": {"type": "string"},
                "daily_budget": {"type": "integer", "minimum": 1},
                "creative_urls": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1
                }
            }
        })
    }

    async fn run(&self, input: Value, ctx: ToolContext) -> ToolOutput {
        let input: LaunchCampaignInput = match serde_json::from_value(input) {
            Ok(input) => input,
            Err(e) => return ToolOutput::error(format!("Invalid input: {e}")),
        };

        if input.daily_budget == 0 {
            return ToolOutput::error("daily_budget must be greater than zero");
        }
        if input.creative_urls.is_empty() {
            return ToolOutput::error("at least one creative URL is required");
        }

        tracing::info!(
            conversation_id = %ctx.conversation_id,
            objective = %input.objective,
            geo = %input.geo,
            daily_budget = input.daily_budget,
            creatives = input.creative_urls.len(),
            "Campaign launch initiated"
        );

        ToolOutput::success(format!(
            "[DEMO] Campaign launch initiated. Objective={}, Geo={}, Daily Budget={}, Creatives={}",
            input.objective,
            input.geo,
            input.daily_budget,
            format_url_list(&input.creative_urls)
        ))
    }
}
