//! Pure launch-flow transition function
//!
//! `advance` reads the previous [`LaunchState`] and the latest turn, and
//! returns the next state. Stages only move forward, at most one question is
//! pending, and nothing is filled in that the user or a tool did not state.

use super::extract::{self, Extracted, FieldIssue};
use super::input::{FlowContext, TurnInput};
use super::state::{
    Confirmation, CreativeMode, Field, GenerateCreativesInput, LaunchCampaignInput, LaunchState,
    LaunchStatus, PendingToolCall, Stage, ToolCall, ToolInput, ToolResult,
};
use thiserror::Error;

pub const OBJECTIVE_QUESTION: &str = "What is your campaign objective? (Traffic / Leads / Sales)";
pub const GEO_QUESTION: &str = "Which country or region should this campaign target?";
pub const DAILY_BUDGET_QUESTION: &str = "What is the daily budget (number only) for this campaign?";
pub const START_TIME_QUESTION: &str = "When should the campaign start? (ISO format preferred)";
pub const CREATIVE_MODE_QUESTION: &str =
    "Do you want creatives GENERATED or USER_PROVIDED? (GENERATE / USER_PROVIDED)";
pub const PRODUCT_URL_QUESTION: &str =
    "Please share the product/landing page URL to generate creatives.";
pub const SELECT_CREATIVES_QUESTION: &str =
    "Please select which creative URL(s) to use from the generated list.";
pub const CONFIRM_SELECTION_QUESTION: &str =
    "Are these the final creative URL(s)? Reply 'final' to continue, or pick again from the generated list.";
pub const CREATIVE_URLS_QUESTION: &str = "Please provide the creative asset URL(s) you want to use.";
pub const CONFIRM_PROVIDED_QUESTION: &str =
    "Are these creative URL(s) final? Reply 'final' to continue, or send replacement URLs.";
pub const LAUNCH_CONFIRMATION_QUESTION: &str =
    "Please confirm if you want to proceed with launching this campaign (YES / NO).";
pub const CHANGE_REQUEST_QUESTION: &str = "Okay, what would you like to change before launching?";

/// Marker preceding the URL list in generation tool output
const GENERATED_MARKER: &str = "Generated creatives:";

/// Fixed question for a missing field
pub fn question_for(field: Field) -> &'static str {
    match field {
        Field::Objective => OBJECTIVE_QUESTION,
        Field::Geo => GEO_QUESTION,
        Field::DailyBudget => DAILY_BUDGET_QUESTION,
        Field::StartTime | Field::EndTime => START_TIME_QUESTION,
        Field::CreativeMode => CREATIVE_MODE_QUESTION,
        Field::ProductUrl => PRODUCT_URL_QUESTION,
        Field::CreativeUrls => CREATIVE_URLS_QUESTION,
        Field::UserConfirmation => LAUNCH_CONFIRMATION_QUESTION,
    }
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// New state, plus any values the user gave that could not be accepted
    Updated {
        state: LaunchState,
        issues: Vec<FieldIssue>,
    },
    /// New state and an external tool the caller must run
    ToolRequest { state: LaunchState, call: ToolCall },
    /// Nothing was committed; the caller keeps the previous state
    Failure { reason: TransitionError },
}

impl Outcome {
    /// The next state, if this outcome commits one
    pub fn state(&self) -> Option<&LaunchState> {
        match self {
            Outcome::Updated { state, .. } | Outcome::ToolRequest { state, .. } => Some(state),
            Outcome::Failure { .. } => None,
        }
    }

    fn updated(state: LaunchState, issues: Vec<FieldIssue>) -> Self {
        Outcome::Updated { state, issues }
    }
}

/// Reasons a transition commits nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("This launch session is already completed")]
    SessionCompleted,
    #[error("Tool `{tool}` failed: {message}")]
    ToolFailed { tool: String, message: String },
    #[error("Tool `{tool}` returned output without {expected}")]
    MalformedToolOutput { tool: String, expected: &'static str },
    #[error("Cannot launch: {0} is missing")]
    IncompleteCampaign(&'static str),
}

impl TransitionError {
    /// Short machine-readable code for status strings
    pub fn code(&self) -> &'static str {
        match self {
            TransitionError::SessionCompleted => "session_completed",
            TransitionError::ToolFailed { .. } => "tool_failed",
            TransitionError::MalformedToolOutput { .. } => "malformed_tool_output",
            TransitionError::IncompleteCampaign(_) => "incomplete_campaign",
        }
    }
}

/// Pure transition function
///
/// Given the same state and input it always produces the same outcome; tool
/// call ids come from the counter carried in the state.
pub fn advance(state: &LaunchState, ctx: &FlowContext, input: &TurnInput) -> Outcome {
    if state.is_completed() {
        return Outcome::Failure {
            reason: TransitionError::SessionCompleted,
        };
    }

    let mut next = state.clone();

    if let Some(result) = &input.tool_result {
        if let Err(reason) = fold_tool_result(&mut next, result) {
            return Outcome::Failure { reason };
        }
        if next.is_completed() {
            return Outcome::updated(next, vec![]);
        }
    }

    let text = input.text.as_str();
    match next.stage {
        Stage::CampaignInfo => campaign_info_step(next, text),
        Stage::Creative => creative_step(next, ctx, text, state.follow_up_question.as_deref()),
        Stage::Launching => launching_step(next, text),
    }
}

// ============================================================================
// Tool results
// ============================================================================

/// Apply a tool result that answers the pending request.
///
/// Results that match no pending request are dropped without touching state.
fn fold_tool_result(next: &mut LaunchState, result: &ToolResult) -> Result<(), TransitionError> {
    let matches_pending = next.pending_tool_call.as_ref().is_some_and(|pending| {
        pending.id == result.tool_call_id && pending.name == result.tool_name
    });
    if !matches_pending {
        return Ok(());
    }

    if result.is_error {
        return Err(TransitionError::ToolFailed {
            tool: result.tool_name.clone(),
            message: result.content.clone(),
        });
    }

    match result.tool_name.as_str() {
        "generate_creatives" => {
            let urls = generated_creative_urls(&result.content).ok_or_else(|| {
                TransitionError::MalformedToolOutput {
                    tool: result.tool_name.clone(),
                    expected: "a generated creative URL list",
                }
            })?;
            next.creative_urls = Some(urls);
        }
        "launch_campaign" => {
            next.status = LaunchStatus::Completed;
            next.follow_up_question = None;
        }
        _ => return Ok(()),
    }

    next.pending_tool_call = None;
    Ok(())
}

/// Locate the ordered URL list in generation tool output
pub fn generated_creative_urls(content: &str) -> Option<Vec<String>> {
    let start = content.find(GENERATED_MARKER)? + GENERATED_MARKER.len();
    let urls = extract::urls(content.get(start..)?);
    if urls.is_empty() {
        None
    } else {
        Some(urls)
    }
}

fn issue_tool_call(next: &mut LaunchState, input: ToolInput) -> ToolCall {
    next.tool_calls_issued = next.tool_calls_issued.saturating_add(1);
    let id = format!("call_{}", next.tool_calls_issued);
    next.pending_tool_call = Some(PendingToolCall {
        id: id.clone(),
        name: input.tool_name().to_string(),
    });
    ToolCall::new(id, input)
}

// ============================================================================
// Field absorption
// ============================================================================

/// Fill an unset slot from an extracted value; set slots are never overwritten
fn absorb<T>(slot: &mut Option<T>, extracted: Extracted<T>, field: Field, issues: &mut Vec<FieldIssue>) {
    if slot.is_some() {
        return;
    }
    match extracted {
        Extracted::Found(value) => *slot = Some(value),
        Extracted::Malformed { raw, reason } => issues.push(FieldIssue::new(field, raw, reason)),
        Extracted::Absent => {}
    }
}

/// Overwrite a slot with an explicitly restated value; returns whether it changed
fn amend<T: PartialEq>(
    slot: &mut Option<T>,
    extracted: Extracted<T>,
    field: Field,
    issues: &mut Vec<FieldIssue>,
) -> bool {
    match extracted {
        Extracted::Found(value) if slot.as_ref() != Some(&value) => {
            *slot = Some(value);
            true
        }
        Extracted::Malformed { raw, reason } => {
            issues.push(FieldIssue::new(field, raw, reason));
            false
        }
        _ => false,
    }
}

// ============================================================================
// Stage 1 - CAMPAIGN_INFO
// ============================================================================

fn campaign_info_step(mut next: LaunchState, text: &str) -> Outcome {
    let mut issues = Vec::new();
    let fields = extract::campaign_info(text, next.missing_campaign_info());

    absorb(&mut next.objective, fields.objective, Field::Objective, &mut issues);
    absorb(&mut next.geo, fields.geo, Field::Geo, &mut issues);
    absorb(&mut next.daily_budget, fields.daily_budget, Field::DailyBudget, &mut issues);
    absorb(&mut next.start_time, fields.start_time, Field::StartTime, &mut issues);
    absorb(&mut next.end_time, fields.end_time, Field::EndTime, &mut issues);

    match next.missing_campaign_info() {
        Some(field) => {
            next.follow_up_question = Some(question_for(field).to_string());
        }
        None => {
            next.stage = Stage::Creative;
            next.follow_up_question = None;
        }
    }
    Outcome::updated(next, issues)
}

// ============================================================================
// Stage 2 - CREATIVE
// ============================================================================

fn creative_step(
    mut next: LaunchState,
    ctx: &FlowContext,
    text: &str,
    previous_question: Option<&str>,
) -> Outcome {
    let mut issues = Vec::new();

    if next.creative_mode.is_none() {
        absorb(
            &mut next.creative_mode,
            extract::creative_mode(text, true),
            Field::CreativeMode,
            &mut issues,
        );
    }

    // Asked "are these final?" last turn, so a plain yes finalizes
    let asked_final = matches!(
        previous_question,
        Some(CONFIRM_SELECTION_QUESTION | CONFIRM_PROVIDED_QUESTION)
    );

    match next.creative_mode {
        None => {
            next.follow_up_question = Some(CREATIVE_MODE_QUESTION.to_string());
            Outcome::updated(next, issues)
        }
        Some(CreativeMode::Generate) => generate_creatives_step(next, ctx, text, asked_final, issues),
        Some(CreativeMode::UserProvided) => provided_creatives_step(next, text, asked_final, issues),
    }
}

fn generate_creatives_step(
    mut next: LaunchState,
    ctx: &FlowContext,
    text: &str,
    asked_final: bool,
    mut issues: Vec<FieldIssue>,
) -> Outcome {
    if next.product_url.is_none() {
        next.product_url = extract::urls(text).into_iter().next();
    }
    let Some(product_url) = next.product_url.clone() else {
        next.follow_up_question = Some(PRODUCT_URL_QUESTION.to_string());
        return Outcome::updated(next, issues);
    };

    if !next.has_creative_urls() {
        let call = issue_tool_call(
            &mut next,
            ToolInput::GenerateCreatives(GenerateCreativesInput {
                product_url,
                count: ctx.creative_count,
            }),
        );
        next.follow_up_question = Some(SELECT_CREATIVES_QUESTION.to_string());
        return Outcome::ToolRequest { state: next, call };
    }

    let candidates = next.creative_urls.clone().unwrap_or_default();
    let mut selected_now = false;
    let mut selection_rejected = false;
    match extract::selection(text, &candidates) {
        Extracted::Found(picked) => {
            next.creative_urls = Some(picked);
            selected_now = true;
        }
        Extracted::Malformed { raw, reason } => {
            issues.push(FieldIssue::new(Field::CreativeUrls, raw, reason));
            selection_rejected = true;
        }
        Extracted::Absent => {}
    }

    // Only a list the user picked can be finalized; the generated list as a
    // whole counts only when they said "all"
    let has_selection = selected_now || (asked_final && !selection_rejected);
    let is_final = extract::final_signal(text) || (asked_final && extract::affirmative(text));
    if is_final && has_selection {
        next.stage = Stage::Launching;
        next.follow_up_question = None;
    } else if has_selection {
        next.follow_up_question = Some(CONFIRM_SELECTION_QUESTION.to_string());
    } else {
        next.follow_up_question = Some(SELECT_CREATIVES_QUESTION.to_string());
    }
    Outcome::updated(next, issues)
}

fn provided_creatives_step(
    mut next: LaunchState,
    text: &str,
    asked_final: bool,
    issues: Vec<FieldIssue>,
) -> Outcome {
    let provided = extract::urls(text);
    if !provided.is_empty() {
        next.creative_urls = Some(provided);
    }

    if !next.has_creative_urls() {
        next.follow_up_question = Some(CREATIVE_URLS_QUESTION.to_string());
        return Outcome::updated(next, issues);
    }

    let is_final = extract::final_signal(text) || (asked_final && extract::affirmative(text));
    if is_final {
        next.stage = Stage::Launching;
        next.follow_up_question = None;
    } else {
        next.follow_up_question = Some(CONFIRM_PROVIDED_QUESTION.to_string());
    }
    Outcome::updated(next, issues)
}

// ============================================================================
// Stage 3 - LAUNCHING
// ============================================================================

fn launching_step(mut next: LaunchState, text: &str) -> Outcome {
    let mut issues = Vec::new();

    match extract::confirmation(text) {
        Extracted::Found(confirmation) => next.user_confirmation = Some(confirmation),
        Extracted::Malformed { raw, reason } => {
            issues.push(FieldIssue::new(Field::UserConfirmation, raw, reason));
        }
        Extracted::Absent => {}
    }

    if next.user_confirmation == Some(Confirmation::No) {
        // Campaign-info values restated after a NO replace the old ones
        let fields = extract::campaign_info(text, None);
        let mut amended = false;
        amended |= amend(&mut next.objective, fields.objective, Field::Objective, &mut issues);
        amended |= amend(&mut next.geo, fields.geo, Field::Geo, &mut issues);
        amended |= amend(&mut next.daily_budget, fields.daily_budget, Field::DailyBudget, &mut issues);
        amended |= amend(&mut next.start_time, fields.start_time, Field::StartTime, &mut issues);
        amended |= amend(&mut next.end_time, fields.end_time, Field::EndTime, &mut issues);
        if amended {
            next.user_confirmation = None;
        }
    }

    match next.user_confirmation {
        None => {
            next.pending_tool_call = None;
            next.follow_up_question = Some(LAUNCH_CONFIRMATION_QUESTION.to_string());
            Outcome::updated(next, issues)
        }
        Some(Confirmation::No) => {
            next.pending_tool_call = None;
            next.follow_up_question = Some(CHANGE_REQUEST_QUESTION.to_string());
            Outcome::updated(next, issues)
        }
        Some(Confirmation::Yes) => match launch_input(&next) {
            Ok(input) => {
                let call = issue_tool_call(&mut next, ToolInput::LaunchCampaign(input));
                next.follow_up_question = None;
                Outcome::ToolRequest { state: next, call }
            }
            Err(reason) => Outcome::Failure { reason },
        },
    }
}

fn launch_input(state: &LaunchState) -> Result<LaunchCampaignInput, TransitionError> {
    Ok(LaunchCampaignInput {
        objective: state
            .objective
            .clone()
            .ok_or(TransitionError::IncompleteCampaign("objective"))?,
        geo: state
            .geo
            .clone()
            .ok_or(TransitionError::IncompleteCampaign("geo"))?,
        daily_budget: state
            .daily_budget
            .ok_or(TransitionError::IncompleteCampaign("daily_budget"))?,
        creative_urls: state
            .creative_urls
            .clone()
            .filter(|urls| !urls.is_empty())
            .ok_or(TransitionError::IncompleteCampaign("creative_urls"))?,
    })
}
