//! Creative generation stub

use super::{format_url_list, Tool, ToolContext, ToolOutput};
use crate::state_machine::state::GenerateCreativesInput;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Upper bound on creatives per request
const MAX_CREATIVES: u32 = 10;

pub struct GenerateCreativesTool;

#[async_trait]
impl Tool for GenerateCreativesTool {
    fn name(&self) -> &'static str {
        "generate_creatives"
    }

    fn description(&self) -> String {
        "Generate ad creative images from a product or landing page URL. Returns the generated creative URLs in order.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["product_url"],
            "properties": {
                "product_url": {
                    "type": "string",
                    "description": "Product or landing page URL"
                },
                "count": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_CREATIVES,
                    "description": "Number of creatives to generate"
                }
            }
        })
    }

    async fn run(&self, input: Value, _ctx: ToolContext) -> ToolOutput {
        let input: GenerateCreativesInput = match serde_json::from_value(input) {
            Ok(input) => input,
            Err(e) => return ToolOutput::error(format!("Invalid input: {e}")),
        };

        if url::Url::parse(&input.product_url).is_err() {
            return ToolOutput::error(format!("Invalid product URL: {}", input.product_url));
        }
        if input.count == 0 || input.count > MAX_CREATIVES {
            return ToolOutput::error(format!(
                "count must be between 1 and {MAX_CREATIVES}, got {}",
                input.count
            ));
        }

        let urls: Vec<String> = (1..=input.count)
            .map(|i| format!("https://cdn.demo.com/generated_creative_{i}.png"))
            .collect();

        ToolOutput::success(format!(
            "[DEMO] Image generation successful. Product URL: {}. Generated creatives: {}",
            input.product_url,
            format_url_list(&urls)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::generated_creative_urls;

    #[tokio::test]
    async fn test_generates_requested_count() {
        let result = GenerateCreativesTool
            .run(
                json!({"product_url": "https://shop.example.com/p", "count": 2}),
                ToolContext::new("test-conv"),
            )
            .await;
        assert!(result.success);
        assert_eq!(
            generated_creative_urls(&result.output),
            Some(vec![
                "https://cdn.demo.com/generated_creative_1.png".to_string(),
                "https://cdn.demo.com/generated_creative_2.png".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_count_defaults_to_three() {
        let result = GenerateCreativesTool
            .run(
                json!({"product_url": "https://shop.example.com/p"}),
                ToolContext::new("test-conv"),
            )
            .await;
        assert_eq!(generated_creative_urls(&result.output).map(|u| u.len()), Some(3));
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let ctx = ToolContext::new("test-conv");
        assert!(!GenerateCreativesTool.run(json!({}), ctx.clone()).await.success);
        assert!(
            !GenerateCreativesTool
                .run(json!({"product_url": "not a url"}), ctx.clone())
                .await
                .success
        );
        assert!(
            !GenerateCreativesTool
                .run(json!({"product_url": "https://a.com", "count": 0}), ctx)
                .await
                .success
        );
    }
}
