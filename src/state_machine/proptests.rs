//! Property-based tests for the launch flow
//!
//! These tests verify key invariants hold across generated states and inputs.

use super::extract::{self, Extracted};
use super::input::{FlowContext, TurnInput};
use super::state::*;
use super::transition::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> FlowContext {
    FlowContext::default()
}

fn step(state: &LaunchState, text: &str) -> Outcome {
    advance(state, &test_context(), &TurnInput::user(text))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

const PHRASES: &[&str] = &[
    "Traffic",
    "Leads please",
    "target Canada",
    "Brazil",
    "budget is 75",
    "$40/day",
    "120",
    "fifty",
    "start tomorrow",
    "2026-12-01",
    "end 2026-12-31",
    "GENERATE",
    "USER_PROVIDED",
    "https://shop.example.com/item",
    "https://cdn.example.com/a.png",
    "#1",
    "all of them",
    "final",
    "yes",
    "no",
    "YES",
    "NO",
    "change the budget to 90",
    "hello",
    "",
];

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(PHRASES).prop_map(str::to_string),
        proptest::collection::vec(proptest::sample::select(PHRASES), 1..4)
            .prop_map(|parts| parts.join(" ")),
        "[a-zA-Z0-9 $/#.,]{0,40}",
    ]
}

fn arb_opt_string(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::sample::select(values).prop_map(str::to_string))
}

fn arb_creative_mode() -> impl Strategy<Value = Option<CreativeMode>> {
    proptest::option::of(prop_oneof![
        Just(CreativeMode::Generate),
        Just(CreativeMode::UserProvided),
    ])
}

fn arb_confirmation() -> impl Strategy<Value = Option<Confirmation>> {
    proptest::option::of(prop_oneof![Just(Confirmation::Yes), Just(Confirmation::No)])
}

fn arb_campaign_info_state() -> impl Strategy<Value = LaunchState> {
    (
        arb_opt_string(&["Traffic", "Sales"]),
        arb_opt_string(&["US", "Canada"]),
        proptest::option::of(1u64..10_000),
        arb_opt_string(&["tomorrow", "2026-11-01"]),
    )
        .prop_filter("at least one field missing", |(o, g, b, s)| {
            o.is_none() || g.is_none() || b.is_none() || s.is_none()
        })
        .prop_map(|(objective, geo, daily_budget, start_time)| LaunchState {
            objective,
            geo,
            daily_budget,
            start_time,
            ..LaunchState::new()
        })
}

fn filled_campaign_info() -> LaunchState {
    LaunchState {
        objective: Some("Traffic".to_string()),
        geo: Some("US".to_string()),
        daily_budget: Some(50),
        start_time: Some("tomorrow".to_string()),
        ..LaunchState::new()
    }
}

fn arb_creative_state() -> impl Strategy<Value = LaunchState> {
    (
        arb_creative_mode(),
        arb_opt_string(&["https://shop.example.com/item"]),
        proptest::option::of(proptest::collection::vec(
            proptest::sample::select(&[
                "https://cdn.demo.com/generated_creative_1.png",
                "https://cdn.demo.com/generated_creative_2.png",
            ][..])
            .prop_map(str::to_string),
            1..3,
        )),
    )
        .prop_map(|(creative_mode, product_url, creative_urls)| LaunchState {
            stage: Stage::Creative,
            creative_mode,
            product_url,
            creative_urls,
            ..filled_campaign_info()
        })
}

fn arb_launching_state() -> impl Strategy<Value = LaunchState> {
    arb_confirmation().prop_map(|user_confirmation| LaunchState {
        stage: Stage::Launching,
        creative_mode: Some(CreativeMode::UserProvided),
        creative_urls: Some(vec!["https://cdn.example.com/a.png".to_string()]),
        user_confirmation,
        ..filled_campaign_info()
    })
}

fn arb_state() -> impl Strategy<Value = LaunchState> {
    prop_oneof![
        arb_campaign_info_state(),
        arb_creative_state(),
        arb_launching_state(),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: stages never move backwards, across whole conversations
    #[test]
    fn prop_stage_is_monotonic(texts in proptest::collection::vec(arb_text(), 1..12)) {
        let mut state = LaunchState::new();
        for text in texts {
            match step(&state, &text) {
                Outcome::Updated { state: next, .. } | Outcome::ToolRequest { state: next, .. } => {
                    prop_assert!(next.stage >= state.stage, "{:?} -> {:?}", state.stage, next.stage);
                    state = next;
                }
                Outcome::Failure { .. } => {}
            }
        }
    }

    // Invariant 2: staying in a stage always leaves exactly one question,
    // except while the launch request is outstanding
    #[test]
    fn prop_follow_up_iff_stage_unsatisfied(state in arb_state(), text in arb_text()) {
        if let Some(next) = step(&state, &text).state() {
            let waiting_on_launch = next.is_waiting_on("launch_campaign");
            if next.stage != state.stage {
                prop_assert!(next.follow_up_question.is_none());
            } else if !waiting_on_launch {
                prop_assert!(next.follow_up_question.is_some(), "no question in {:?}", next);
            }
        }
    }

    // Invariant 3: GENERATE without a product URL never advances
    #[test]
    fn prop_generate_without_product_url_stays(text in "[a-zA-Z0-9 #,.]{0,40}") {
        let state = LaunchState {
            stage: Stage::Creative,
            creative_mode: Some(CreativeMode::Generate),
            creative_urls: Some(vec!["https://cdn.demo.com/generated_creative_1.png".to_string()]),
            ..filled_campaign_info()
        };
        if let Some(next) = step(&state, &text).state() {
            prop_assert_eq!(next.stage, Stage::Creative);
        }
    }

    // Invariant 4: USER_PROVIDED URLs without a final signal stay in CREATIVE
    #[test]
    fn prop_user_provided_needs_final_signal(text in "[a-eg-z0-9 ]{0,30}") {
        let state = LaunchState {
            stage: Stage::Creative,
            creative_mode: Some(CreativeMode::UserProvided),
            creative_urls: Some(vec!["a.png".to_string()]),
            ..filled_campaign_info()
        };
        prop_assume!(!extract::final_signal(&text));
        let next = step(&state, &text);
        prop_assert_eq!(next.state().map(|s| s.stage), Some(Stage::Creative));
    }

    // Invariant 4b: a generated list is never finalized before the user picks from it
    #[test]
    fn prop_generated_list_needs_user_selection(text in arb_text()) {
        let generated: Vec<String> = (1..=3)
            .map(|i| format!("https://cdn.demo.com/generated_creative_{i}.png"))
            .collect();
        let state = LaunchState {
            stage: Stage::Creative,
            creative_mode: Some(CreativeMode::Generate),
            product_url: Some("https://shop.example.com/item".to_string()),
            creative_urls: Some(generated.clone()),
            follow_up_question: Some(SELECT_CREATIVES_QUESTION.to_string()),
            ..filled_campaign_info()
        };
        prop_assume!(extract::selection(&text, &generated) == Extracted::Absent);
        let next = step(&state, &text);
        prop_assert_eq!(next.state().map(|s| s.stage), Some(Stage::Creative));
    }

    // Invariant 5: NO never completes or leaves LAUNCHING
    #[test]
    fn prop_no_keeps_launching(state in arb_launching_state(), suffix in "[a-z ]{0,10}") {
        let text = format!("no {suffix}");
        prop_assume!(!suffix.split_whitespace().any(|w| matches!(w, "yes" | "yep" | "yeah")));
        let outcome = step(&state, &text);
        let next = outcome.state().expect("NO commits a state");
        prop_assert_eq!(next.stage, Stage::Launching);
        prop_assert_eq!(next.status, LaunchStatus::Ongoing);
        let launched = matches!(outcome, Outcome::ToolRequest { .. });
        prop_assert!(!launched);
    }

    // Invariant 6: completed sessions accept nothing
    #[test]
    fn prop_completed_rejects_all_input(text in arb_text()) {
        let state = LaunchState {
            status: LaunchStatus::Completed,
            ..LaunchState::new()
        };
        prop_assert_eq!(
            step(&state, &text),
            Outcome::Failure { reason: TransitionError::SessionCompleted }
        );
    }

    // Invariant 7: tool call ids are unique within a session
    #[test]
    fn prop_tool_call_ids_are_unique(texts in proptest::collection::vec(arb_text(), 1..12)) {
        let mut state = filled_campaign_info();
        state.stage = Stage::Creative;
        let mut seen = std::collections::HashSet::new();
        for text in texts {
            match step(&state, &text) {
                Outcome::ToolRequest { state: next, call } => {
                    prop_assert!(seen.insert(call.id.clone()), "duplicate id {}", call.id);
                    state = next;
                }
                Outcome::Updated { state: next, .. } => state = next,
                Outcome::Failure { .. } => {}
            }
        }
    }

    // Invariant 8: transitions never edit fields set in an earlier stage,
    // unless the user amended them after declining to launch
    #[test]
    fn prop_campaign_info_stable_outside_amendments(state in arb_creative_state(), text in arb_text()) {
        if let Some(next) = step(&state, &text).state() {
            prop_assert_eq!(&next.objective, &state.objective);
            prop_assert_eq!(&next.geo, &state.geo);
            prop_assert_eq!(next.daily_budget, state.daily_budget);
            prop_assert_eq!(&next.start_time, &state.start_time);
        }
    }

    // Invariant 9: the state record survives its wire format
    #[test]
    fn prop_state_serde_roundtrip(state in arb_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let back: LaunchState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, state);
    }
}
