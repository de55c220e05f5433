//! adflow - conversational ad-campaign assistant
//!
//! Routes each chat turn to a staged campaign-launch flow or to campaign
//! reporting, and answers with a short status context plus a reply.

mod config;
mod history;
mod llm;
mod router;
mod runtime;
mod state_machine;
mod tools;

use config::{AppConfig, ClassifierKind};
use router::{IntentClassifier, KeywordClassifier, LlmClassifier};
use runtime::ConversationRuntime;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tools::ToolRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; stdout carries the chat
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adflow=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = AppConfig::from_env()?;
    let classifier = build_classifier(&config)?;
    let tools = ToolRegistry::standard();
    tracing::info!(
        tools = ?tools.names(),
        creative_count = config.creative_count,
        "Tools registered"
    );
    let mut tool_listing = String::new();
    for tool in tools.definitions() {
        tracing::debug!(tool = %tool.name, schema = %tool.input_schema, "Tool schema");
        let _ = writeln!(tool_listing, "- {}: {}", tool.name, tool.description);
    }

    let mut runtime = ConversationRuntime::new(classifier, tools, config.flow_context());

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout
        .write_all(
            b"Ask me to launch a campaign or pull a report. /tools lists tools, /clear resets, /quit exits.\n> ",
        )
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        match text {
            "" => {}
            "/quit" | "/exit" => break,
            "/tools" => stdout.write_all(tool_listing.as_bytes()).await?,
            "/clear" => {
                runtime.clear();
                stdout.write_all(b"Chat history cleared.\n").await?;
            }
            _ => {
                let reply = runtime.send(text).await;
                let rendered = format!("[{}]\n{}\n", reply.context, reply.response);
                stdout.write_all(rendered.as_bytes()).await?;
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    tracing::info!(
        conversation_id = %runtime.id(),
        turns = runtime.history().len(),
        "Session ended"
    );
    Ok(())
}

fn build_classifier(config: &AppConfig) -> Result<Arc<dyn IntentClassifier>, llm::LlmError> {
    match config.classifier {
        ClassifierKind::Keyword => Ok(Arc::new(KeywordClassifier)),
        ClassifierKind::Llm => match llm::build_service(&config.llm)? {
            Some(service) => {
                tracing::info!(model = service.model_id(), "Using LLM intent classifier");
                Ok(Arc::new(LlmClassifier::new(service)))
            }
            None => {
                tracing::warn!(
                    "ADFLOW_CLASSIFIER=llm but no OPENAI_API_KEY or LLM_GATEWAY is set; using keyword rules"
                );
                Ok(Arc::new(KeywordClassifier))
            }
        },
    }
}
