//! Campaign reporting stub

use super::{Tool, ToolContext, ToolOutput};
use crate::state_machine::state::FetchReportInput;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

/// Fixed metric set returned for every campaign
#[derive(Debug, Serialize)]
struct ReportMetrics {
    spend: u64,
    impressions: u64,
    clicks: u64,
    ctr: u64,
    conversions: u64,
    roas: u64,
}

const DEMO_METRICS: ReportMetrics = ReportMetrics {
    spend: 100,
    impressions: 1000,
    clicks: 100,
    ctr: 10,
    conversions: 10,
    roas: 10,
};

pub struct FetchReportTool;

#[async_trait]
impl Tool for FetchReportTool {
    fn name(&self) -> &'static str {
        "fetch_report"
    }

    fn description(&self) -> String {
        "Fetch performance metrics (spend, impressions, clicks, ctr, conversions, roas) for a campaign.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["campaign_id"],
            "properties": {
                "campaign_id": {
                    "type": "string",
                    "description": "Campaign identifier"
                }
            }
        })
    }

    async fn run(&self, input: Value, _ctx: ToolContext) -> ToolOutput {
        let input: FetchReportInput = match serde_json::from_value(input) {
            Ok(input) => input,
            Err(e) => return ToolOutput::error(format!("Invalid input: {e}")),
        };
        let campaign_id = input.campaign_id.trim();
        if campaign_id.is_empty() {
            return ToolOutput::error("campaign_id must not be empty");
        }

        let metrics = serde_json::to_string(&DEMO_METRICS).unwrap_or_default();
        ToolOutput::success(format!(
            "[DEMO] Reporting successful. Campaign ID: {campaign_id}. Reporting data: {metrics}"
        ))
    }
}
