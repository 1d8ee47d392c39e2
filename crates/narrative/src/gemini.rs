//! REST client for the Gemini `generateContent` endpoint.
//!
//! Sends the directing prompt with a JSON response-format hint and
//! extracts the first candidate's text. The reply is untrusted: it is
//! parsed and shape-validated before a [`StoryPlan`] is returned.

use serde::{Deserialize, Serialize};

use reelforge_core::types::StoryPlan;

use crate::planner::{validate_plan, PlanningError, StoryPlanner};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini text-generation API.
pub struct GeminiPlanner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl GeminiPlanner {
    /// Create a planner for the given API key and model name.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(API_BASE_URL.to_string(), api_key, model)
    }

    /// Create a planner against a non-default base URL (tests).
    pub fn with_base_url(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, PlanningError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlanningError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().await?;
        extract_candidate_text(reply)
    }
}

#[async_trait::async_trait]
impl StoryPlanner for GeminiPlanner {
    async fn plan(&self, topic: &str) -> Result<StoryPlan, PlanningError> {
        let text = self.generate(directing_prompt(topic)).await?;
        let plan = parse_plan(&text)?;
        validate_plan(&plan)?;

        tracing::info!(
            sentences = plan.scene_count(),
            script_chars = plan.script.len(),
            "Story plan generated"
        );
        Ok(plan)
    }
}

// ---------------------------------------------------------------------------
// Prompt construction and reply parsing
// ---------------------------------------------------------------------------

/// Build the directing prompt for a topic.
///
/// The instruction pins the output schema and keeps the image prompts
/// literal: quality/style descriptors are appended later by the image
/// stage, so content and aesthetic stay separated.
pub fn directing_prompt(topic: &str) -> String {
    format!(
        r#"You are a Movie Director.
Topic: "{topic}"

Task:
1. Write a 3-sentence story.
2. Write 3 image prompts (one for each sentence).

CRITICAL FOR IMAGES: Describe the subject and action clearly. Do not add too many "quality" words, I will add those.

OUTPUT JSON:
{{
    "script": "Sentence 1. Sentence 2. Sentence 3.",
    "image_prompts": ["Scene 1 description...", "Scene 2...", "Scene 3..."]
}}"#
    )
}

/// Pull the first candidate's first text part out of a reply.
fn extract_candidate_text(reply: GenerateResponse) -> Result<String, PlanningError> {
    reply
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(PlanningError::EmptyResponse)
}

/// Parse candidate text into a [`StoryPlan`].
fn parse_plan(text: &str) -> Result<StoryPlan, PlanningError> {
    serde_json::from_str::<StoryPlan>(text).map_err(|e| PlanningError::MalformedPlan(e.to_string()))
}
