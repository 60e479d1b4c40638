//! Wire types for `generateContent` requests and the coin-analysis
//! response schema.

use crate::services::prompt::{build_prompt, Language};
use serde::Serialize;
use serde_json::{json, Value};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// Tool directive. Only Google Search grounding is used.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

/// Schema of the expected answer: one analysis object per coin.
///
/// The same schema is used for every language; language-specific constraints
/// (recommendation values, disclaimer) are carried by the prompt.
pub fn coin_analysis_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "coinName": { "type": "STRING" },
                "analysis": {
                    "type": "OBJECT",
                    "properties": {
                        "opinion": { "type": "STRING" },
                        "recommendation": { "type": "STRING" },
                        "priceTarget": { "type": "STRING" }
                    },
                    "required": ["opinion", "recommendation", "priceTarget"]
                },
                "relatedNews": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "url": { "type": "STRING" }
                        },
                        "required": ["title", "url"]
                    }
                }
            },
            "required": ["coinName", "analysis", "relatedNews"]
        }
    })
}

/// Assemble the upstream payload for a coin analysis.
pub fn build_analysis_request<S: AsRef<str>>(lang: Language, coins: &[S]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: build_prompt(lang, coins),
            }],
        }],
        tools: vec![Tool {
            google_search: GoogleSearch::default(),
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: coin_analysis_schema(),
        }),
    }
}
