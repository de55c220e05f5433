//! Property-based tests for the `OpenAI` translation layer
//!
//! These tests verify that translation between our internal types and the
//! wire format preserves key invariants:
//! - Empty responses are rejected
//! - Message translation keeps role order and text
//! - Translated requests always serialize

use super::openai::{self, OpenAIChoice, OpenAIMessage, OpenAIResponse, OpenAIUsage};
use super::types::{LlmMessage, LlmRequest, MessageRole};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (any::<bool>(), "[a-zA-Z0-9 _.!?,$/#]{0,80}").prop_map(|(is_user, text)| {
        if is_user {
            LlmMessage::user(text)
        } else {
            LlmMessage::assistant(text)
        }
    })
}

fn make_openai_response(content: Option<String>, finish_reason: Option<String>) -> OpenAIResponse {
    OpenAIResponse {
        choices: vec![OpenAIChoice {
            message: OpenAIMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason,
        }],
        usage: Some(OpenAIUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
        }),
    }
}

// ============================================================================
// Response validation
// ============================================================================

proptest! {
    /// Missing or blank content is an error
    #[test]
    fn prop_normalize_rejects_blank(
        blank in "[ \t\n]{0,5}",
        missing in any::<bool>(),
        finish_reason in proptest::option::of("[a-z_]{3,10}")
    ) {
        let content = if missing { None } else { Some(blank) };
        let result = openai::test_helpers::normalize_response(make_openai_response(content, finish_reason));
        prop_assert!(result.is_err());
    }

    /// Non-blank content survives verbatim
    #[test]
    fn prop_normalize_preserves_text(text in "[A-Z]{1,20}[a-z ]{0,20}") {
        let result = openai::test_helpers::normalize_response(
            make_openai_response(Some(text.clone()), Some("stop".to_string()))
        );
        let response = result.expect("non-blank content accepted");
        prop_assert_eq!(response.text, text);
        prop_assert!(response.end_turn);
    }

    /// No choices at all is an error
    #[test]
    fn prop_normalize_rejects_no_choices(_dummy in Just(())) {
        let resp = OpenAIResponse { choices: vec![], usage: None };
        prop_assert!(openai::test_helpers::normalize_response(resp).is_err());
    }
}

// ============================================================================
// Request translation
// ============================================================================

proptest! {
    /// One wire message per input message, plus the system message, in order
    #[test]
    fn prop_translate_preserves_order_and_text(
        messages in proptest::collection::vec(arb_message(), 0..8),
        system in "[a-zA-Z ]{1,40}",
    ) {
        let request = LlmRequest::new(system.clone(), messages.clone());
        let translated = openai::test_helpers::translate_request(&request);

        prop_assert_eq!(translated.messages.len(), messages.len() + 1);
        prop_assert_eq!(translated.messages[0].role.as_str(), "system");
        prop_assert_eq!(translated.messages[0].content.as_deref(), Some(system.as_str()));

        for (wire, msg) in translated.messages[1..].iter().zip(&messages) {
            let expected_role = match msg.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            prop_assert_eq!(wire.role.as_str(), expected_role);
            prop_assert_eq!(wire.content.as_deref(), Some(msg.text.as_str()));
        }
    }

    /// Every translated message carries content
    #[test]
    fn prop_translate_message_has_content(msg in arb_message()) {
        let wire = openai::test_helpers::translate_message(&msg);
        prop_assert!(wire.content.is_some());
    }

    /// Translated requests always serialize, and omit unset limits
    #[test]
    fn prop_translated_request_serializes(
        messages in proptest::collection::vec(arb_message(), 0..5),
        max_tokens in proptest::option::of(1u32..512),
    ) {
        let mut request = LlmRequest::new("system", messages);
        if let Some(limit) = max_tokens {
            request = request.with_max_tokens(limit);
        }
        let translated = openai::test_helpers::translate_request(&request);
        let json = serde_json::to_value(&translated).expect("serializes");
        prop_assert_eq!(json.get("max_tokens").is_some(), max_tokens.is_some());
        prop_assert_eq!(&json["stream"], &serde_json::Value::Bool(false));
    }
}
