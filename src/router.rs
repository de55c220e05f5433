//! Router / supervisor
//!
//! Classifies each turn, invokes at most one delegate (the launch flow or
//! the reporting stub), and renders a fixed-shape `RouterResponse`. The
//! launch state is owned by the caller; the router hands back the state to
//! keep for the next turn.

mod intent;

pub use intent::{ClassifyContext, Intent, IntentClassifier, KeywordClassifier, LlmClassifier};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::{Arc, LazyLock};

use crate::history::{ConversationHistory, Turn};
use crate::state_machine::state::FetchReportInput;
use crate::state_machine::transition::{
    CREATIVE_MODE_QUESTION, LAUNCH_CONFIRMATION_QUESTION, SELECT_CREATIVES_QUESTION,
};
use crate::state_machine::{
    advance, generated_creative_urls, question_for, Confirmation, CreativeMode, FieldIssue,
    FlowContext, LaunchState, Outcome, Stage, ToolCall, ToolInput, TransitionError, TurnInput,
};
use crate::tools::{ToolContext, ToolOutput, ToolRegistry};

pub const CLARIFY_QUESTION: &str =
    "Would you like to launch a new campaign or see reporting for an existing one?";
pub const CAMPAIGN_ID_QUESTION: &str = "Which campaign ID should I pull the report for?";
const MIXED_NOTE: &str = "Once this launch is complete I can pull performance reporting for you.";

/// Marker preceding the metrics object in reporting tool output
const REPORT_MARKER: &str = "Reporting data:";
const REPORT_METRICS: [&str; 6] = ["spend", "impressions", "clicks", "ctr", "conversions", "roas"];

static CAMPAIGN_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:campaign(?:\s+id)?|id)\b\s*(?:is\s+|:|#|=)?\s*([A-Za-z0-9_-]*[0-9][A-Za-z0-9_-]*)",
    )
    .expect("campaign id pattern")
});

static BARE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#?([A-Za-z0-9_-]*[0-9][A-Za-z0-9_-]*)\s*[.!]?\s*$").expect("bare id pattern")
});

/// The user-facing output of one routed turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterResponse {
    /// Short machine-readable status, e.g. `mode=launch | stage=CREATIVE | missing=creative_mode`
    pub context: String,
    /// Text shown to the user
    pub response: String,
}

impl RouterResponse {
    fn new(context: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            response: response.into(),
        }
    }
}

/// Which delegate ran, and what it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegate {
    /// No delegate was invoked
    None,
    Launch(Outcome),
    Report {
        campaign_id: String,
        output: ToolOutput,
    },
}

/// Everything the caller needs after one routed turn
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub intent: Intent,
    pub delegate: Delegate,
    pub reply: RouterResponse,
    /// Launch state to keep for the next turn
    pub launch_state: Option<LaunchState>,
    /// Tool turn to record after the user turn
    pub tool_turn: Option<Turn>,
}

pub struct Supervisor {
    classifier: Arc<dyn IntentClassifier>,
    tools: ToolRegistry,
    flow: FlowContext,
}

impl Supervisor {
    pub fn new(classifier: Arc<dyn IntentClassifier>, tools: ToolRegistry, flow: FlowContext) -> Self {
        Self {
            classifier,
            tools,
            flow,
        }
    }

    /// Route one user turn.
    ///
    /// `history` holds the turns before this one; the caller appends the user
    /// turn, the optional tool turn, and the reply afterwards.
    pub async fn route(
        &self,
        history: &ConversationHistory,
        launch: Option<&LaunchState>,
        text: &str,
        ctx: ToolContext,
    ) -> RouteOutcome {
        let launch_ongoing = launch.is_some_and(|state| !state.is_completed());
        let awaiting_campaign_id = history
            .last_assistant()
            .is_some_and(|reply| reply.ends_with(CAMPAIGN_ID_QUESTION));

        let intent = if awaiting_campaign_id && bare_campaign_id(text).is_some() {
            Intent::Reporting
        } else {
            self.classifier
                .classify(history, text, ClassifyContext { launch_ongoing })
                .await
        };

        let outcome = match intent {
            Intent::Ambiguous => clarify(launch),
            Intent::Launch | Intent::Mixed => self.run_launch(history, launch, text, intent, ctx).await,
            Intent::Reporting => self.run_report(launch, text, ctx).await,
        };

        tracing::info!(
            delegate = delegate_kind(&outcome.delegate),
            intent = %intent,
            context = %outcome.reply.context,
            "Routed turn"
        );
        outcome
    }

    async fn run_launch(
        &self,
        history: &ConversationHistory,
        launch: Option<&LaunchState>,
        text: &str,
        intent: Intent,
        ctx: ToolContext,
    ) -> RouteOutcome {
        // A completed session ends; a new launch intent starts over
        let prior = match launch {
            Some(state) if !state.is_completed() => state.clone(),
            _ => LaunchState::new(),
        };

        let pending_id = prior.pending_tool_call.as_ref().map(|p| p.id.as_str());
        for orphan in history
            .tool_results_since_last_user()
            .iter()
            .filter(|result| Some(result.tool_call_id.as_str()) != pending_id)
        {
            tracing::debug!(
                tool_call_id = %orphan.tool_call_id,
                tool = %orphan.tool_name,
                "Discarding tool result with no pending request"
            );
        }

        let input = TurnInput {
            text: text.to_string(),
            tool_result: pending_id.and_then(|id| history.tool_result_for(id)),
        };
        let outcome = advance(&prior, &self.flow, &input);

        let (reply, launch_state, tool_turn) = match &outcome {
            Outcome::Updated { state, issues } => {
                (launch_reply(state, issues, intent), state.clone(), None)
            }
            Outcome::ToolRequest { state, call } => {
                match self.dispatch_launch_tool(call, ctx).await {
                    Ok((output, turn)) => (
                        tool_request_reply(state, call, &output, intent),
                        state.clone(),
                        Some(turn),
                    ),
                    Err((message, turn)) => {
                        tracing::warn!(tool = call.name(), error = %message, "Launch tool failed");
                        // Keep the counter so a retry gets a fresh call id
                        let kept = LaunchState {
                            tool_calls_issued: state.tool_calls_issued,
                            ..prior
                        };
                        (tool_failure_reply(&kept, call, &message), kept, turn)
                    }
                }
            }
            Outcome::Failure { reason } => {
                tracing::warn!(error = %reason, "Launch transition failed");
                (transition_failure_reply(&prior, reason), prior, None)
            }
        };

        RouteOutcome {
            intent,
            delegate: Delegate::Launch(outcome),
            reply,
            launch_state: Some(launch_state),
            tool_turn,
        }
    }

    /// Run a tool the launch flow asked for.
    ///
    /// Output the flow could not fold later counts as a failure now, so the
    /// new state is never kept with an unusable result behind it.
    async fn dispatch_launch_tool(
        &self,
        call: &ToolCall,
        ctx: ToolContext,
    ) -> Result<(ToolOutput, Turn), (String, Option<Turn>)> {
        let output = self
            .tools
            .dispatch(call, ctx)
            .await
            .map_err(|e| (e.to_string(), None))?;

        let usable = output.success
            && (call.name() != "generate_creatives" || generated_creative_urls(&output.output).is_some());
        let turn = Turn::tool(call.id.clone(), call.name(), output.output.clone(), !usable);
        if usable {
            Ok((output, turn))
        } else {
            Err((output.output, Some(turn)))
        }
    }

    async fn run_report(
        &self,
        launch: Option<&LaunchState>,
        text: &str,
        ctx: ToolContext,
    ) -> RouteOutcome {
        let Some(campaign_id) = campaign_id(text).or_else(|| bare_campaign_id(text)) else {
            return RouteOutcome {
                intent: Intent::Reporting,
                delegate: Delegate::None,
                reply: RouterResponse::new(
                    "mode=reporting | stage=intake | missing=campaign_id",
                    CAMPAIGN_ID_QUESTION,
                ),
                launch_state: launch.cloned(),
                tool_turn: None,
            };
        };

        let call = ToolCall::new(
            format!("report_{}", uuid::Uuid::new_v4().simple()),
            ToolInput::FetchReport(FetchReportInput {
                campaign_id: campaign_id.clone(),
            }),
        );
        let output = match self.tools.dispatch(&call, ctx).await {
            Ok(output) => output,
            Err(e) => ToolOutput::error(e.to_string()),
        };
        let tool_turn = Turn::tool(call.id.clone(), call.name(), output.output.clone(), !output.success);

        let reply = if output.success {
            let mut response = format_report(&campaign_id, &output.output);
            if let Some(state) = launch.filter(|state| !state.is_completed()) {
                let _ = write!(
                    response,
                    "\n\nYour campaign launch is still in progress. {}",
                    state
                        .follow_up_question
                        .as_deref()
                        .unwrap_or("Reply to continue it.")
                );
            }
            RouterResponse::new(
                format!("mode=reporting | stage=fetch_report | campaign={campaign_id}"),
                response,
            )
        } else {
            tracing::warn!(campaign_id = %campaign_id, error = %output.output, "Report fetch failed");
            RouterResponse::new(
                "mode=reporting | stage=fetch_report | error=tool_failed",
                format!(
                    "I couldn't fetch the report for campaign {campaign_id}: {}. Please check the campaign ID and try again.",
                    output.output
                ),
            )
        };

        RouteOutcome {
            intent: Intent::Reporting,
            delegate: Delegate::Report {
                campaign_id,
                output,
            },
            reply,
            launch_state: launch.cloned(),
            tool_turn: Some(tool_turn),
        }
    }
}

fn delegate_kind(delegate: &Delegate) -> &'static str {
    match delegate {
        Delegate::None => "clarify",
        Delegate::Launch(_) => "launch",
        Delegate::Report { .. } => "reporting",
    }
}

fn clarify(launch: Option<&LaunchState>) -> RouteOutcome {
    RouteOutcome {
        intent: Intent::Ambiguous,
        delegate: Delegate::None,
        reply: RouterResponse::new(
            "mode=clarify | stage=intake | question=launch_or_reporting",
            CLARIFY_QUESTION,
        ),
        launch_state: launch.cloned(),
        tool_turn: None,
    }
}

// ============================================================================
// Campaign ids
// ============================================================================

/// Campaign id stated after `campaign`, `campaign id`, or `id`
fn campaign_id(text: &str) -> Option<String> {
    CAMPAIGN_ID_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// A reply that is nothing but an id
fn bare_campaign_id(text: &str) -> Option<String> {
    BARE_ID_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn format_report(campaign_id: &str, output: &str) -> String {
    let metrics = output
        .find(REPORT_MARKER)
        .and_then(|i| output.get(i + REPORT_MARKER.len()..))
        .map(str::trim)
        .and_then(|raw| serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw).ok());

    match metrics {
        Some(metrics) => {
            let mut response = format!("Performance for campaign {campaign_id}:");
            for name in REPORT_METRICS {
                if let Some(value) = metrics.get(name) {
                    let _ = write!(response, "\n- {name}: {value}");
                }
            }
            response
        }
        None => format!("Report for campaign {campaign_id}: {output}"),
    }
}

// ============================================================================
// Launch replies
// ============================================================================

fn stage_label(state: &LaunchState) -> &'static str {
    if state.is_completed() {
        "COMPLETED"
    } else {
        state.stage.as_str()
    }
}

/// Status detail for the context string
fn launch_detail(state: &LaunchState) -> String {
    if state.is_completed() {
        return "next=reporting".to_string();
    }
    match state.stage {
        Stage::CampaignInfo => state
            .missing_campaign_info()
            .map_or_else(|| "missing=none".to_string(), |f| format!("missing={}", f.as_str())),
        Stage::Creative => match state.creative_mode {
            None => "missing=creative_mode".to_string(),
            Some(CreativeMode::Generate) if state.product_url.is_none() => {
                "missing=product_url".to_string()
            }
            Some(CreativeMode::Generate) if state.is_waiting_on("generate_creatives") => {
                "tool=generate_creatives | waiting=user_select_creative".to_string()
            }
            Some(CreativeMode::Generate) => "waiting=user_select_creative".to_string(),
            Some(CreativeMode::UserProvided) if !state.has_creative_urls() => {
                "missing=creative_urls".to_string()
            }
            Some(CreativeMode::UserProvided) => "waiting=final_creatives".to_string(),
        },
        Stage::Launching => {
            if state.is_waiting_on("launch_campaign") {
                return "tool=launch_campaign | waiting=launch_result".to_string();
            }
            match state.user_confirmation {
                None => "waiting=confirmation".to_string(),
                Some(Confirmation::No) => "waiting=change_request".to_string(),
                Some(Confirmation::Yes) => "confirmed".to_string(),
            }
        }
    }
}

fn launch_context(state: &LaunchState) -> String {
    format!("mode=launch | stage={} | {}", stage_label(state), launch_detail(state))
}

fn numbered(urls: &[String]) -> String {
    urls.iter()
        .enumerate()
        .map(|(i, url)| format!("{}. {url}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn campaign_summary(state: &LaunchState) -> String {
    let mut summary = format!(
        "Objective: {}\nGeo: {}\nDaily budget: {}\nStart: {}",
        state.objective.as_deref().unwrap_or("-"),
        state.geo.as_deref().unwrap_or("-"),
        state
            .daily_budget
            .map_or_else(|| "-".to_string(), |b| b.to_string()),
        state.start_time.as_deref().unwrap_or("-"),
    );
    if let Some(end) = &state.end_time {
        let _ = write!(summary, "\nEnd: {end}");
    }
    summary
}

fn launch_reply(state: &LaunchState, issues: &[FieldIssue], intent: Intent) -> RouterResponse {
    let mut parts: Vec<String> = issues
        .iter()
        .map(|issue| {
            format!(
                "I couldn't use \"{}\" for {}: {}.",
                issue.raw,
                issue.field.as_str(),
                issue.reason
            )
        })
        .collect();

    if state.is_completed() {
        parts.push(format!(
            "Your campaign launch is complete. Want to see how it performs? {CAMPAIGN_ID_QUESTION}"
        ));
        return RouterResponse::new(launch_context(state), parts.join("\n\n"));
    }

    match state.follow_up_question.as_deref() {
        Some(question) => {
            if state.stage == Stage::Creative && state.has_creative_urls() {
                let urls = state.creative_urls.as_deref().unwrap_or_default();
                parts.push(format!("Current creatives:\n{}", numbered(urls)));
            }
            parts.push(question.to_string());
        }
        None => match state.stage {
            Stage::Creative => {
                parts.push(format!("Campaign details captured:\n{}", campaign_summary(state)));
                parts.push(CREATIVE_MODE_QUESTION.to_string());
            }
            Stage::Launching => {
                let urls = state.creative_urls.as_deref().unwrap_or_default();
                parts.push(format!(
                    "Here is your campaign:\n{}\nCreatives:\n{}",
                    campaign_summary(state),
                    numbered(urls)
                ));
                parts.push(LAUNCH_CONFIRMATION_QUESTION.to_string());
            }
            Stage::CampaignInfo => {
                if let Some(field) = state.missing_campaign_info() {
                    parts.push(question_for(field).to_string());
                }
            }
        },
    }

    if intent == Intent::Mixed {
        parts.push(MIXED_NOTE.to_string());
    }
    RouterResponse::new(launch_context(state), parts.join("\n\n"))
}

fn tool_request_reply(
    state: &LaunchState,
    call: &ToolCall,
    output: &ToolOutput,
    intent: Intent,
) -> RouterResponse {
    let mut response = match &call.input {
        ToolInput::GenerateCreatives(_) => {
            let urls = generated_creative_urls(&output.output).unwrap_or_default();
            format!(
                "Here are your generated creatives:\n{}\n\n{SELECT_CREATIVES_QUESTION}",
                numbered(&urls)
            )
        }
        ToolInput::LaunchCampaign(_) => format!(
            "Your campaign launch has been initiated.\n{}",
            output.output
        ),
        ToolInput::FetchReport(_) => output.output.clone(),
    };
    if intent == Intent::Mixed {
        let _ = write!(response, "\n\n{MIXED_NOTE}");
    }
    RouterResponse::new(launch_context(state), response)
}

fn tool_failure_reply(prior: &LaunchState, call: &ToolCall, message: &str) -> RouterResponse {
    RouterResponse::new(
        format!(
            "mode=launch | stage={} | tool={} | error=tool_failed",
            stage_label(prior),
            call.name()
        ),
        format!(
            "The {} step failed: {message}. Nothing was changed; please try again.",
            call.name()
        ),
    )
}

fn transition_failure_reply(prior: &LaunchState, reason: &TransitionError) -> RouterResponse {
    RouterResponse::new(
        format!(
            "mode=launch | stage={} | error={}",
            stage_label(prior),
            reason.code()
        ),
        format!("{reason}. Nothing was changed; please check your input and try again."),
    )
}
