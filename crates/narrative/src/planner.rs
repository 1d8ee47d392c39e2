//! Planner seam trait, validation, and error type.

use reelforge_core::types::{count_sentences, StoryPlan};

/// Errors from the narrative planning stage.
///
/// Service-call failures and schema violations surface the same way:
/// the run aborts before any audio, image, or video work starts, and
/// nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// The HTTP request itself failed (network, DNS, TLS, quota).
    #[error("Text-generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Text-generation API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The service reply carried no usable candidate text.
    #[error("Text-generation reply contained no candidate text")]
    EmptyResponse,

    /// Candidate text did not parse as the requested JSON schema.
    #[error("Story plan is not valid JSON: {0}")]
    MalformedPlan(String),

    /// The plan parsed but violates the 1:1 sentence/prompt invariant.
    #[error("Story plan shape invalid: {0}")]
    InvalidShape(String),
}

/// Stage seam: anything that can turn a topic into a validated plan.
#[async_trait::async_trait]
pub trait StoryPlanner: Send + Sync {
    /// Produce a validated [`StoryPlan`] for the given topic.
    ///
    /// The topic is free text; it may be empty or arbitrarily long, no
    /// validation is performed on it.
    async fn plan(&self, topic: &str) -> Result<StoryPlan, PlanningError>;
}

/// Validate a parsed plan before it leaves the stage.
///
/// Downstream timing assumes one prompt per narrated sentence, in
/// order, so a plan is rejected when it has no prompts or when the
/// prompt count disagrees with the script's sentence count. Planner
/// output is always validated, never assumed.
pub fn validate_plan(plan: &StoryPlan) -> Result<(), PlanningError> {
    if plan.image_prompts.is_empty() {
        return Err(PlanningError::InvalidShape(
            "plan contains no image prompts".to_string(),
        ));
    }
    if plan.image_prompts.iter().any(|p| p.trim().is_empty()) {
        return Err(PlanningError::InvalidShape(
            "plan contains an empty image prompt".to_string(),
        ));
    }

    let sentences = count_sentences(&plan.script);
    let prompts = plan.image_prompts.len();
    if sentences != prompts {
        return Err(PlanningError::InvalidShape(format!(
            "script has {sentences} sentences but {prompts} image prompts"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn plan(script: &str, prompts: &[&str]) -> StoryPlan {
        StoryPlan {
            script: script.to_string(),
            image_prompts: prompts.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn accepts_aligned_plan() {
        let p = plan("One. Two. Three.", &["a", "b", "c"]);
        assert!(validate_plan(&p).is_ok());
    }

    #[test]
    fn rejects_count_mismatch() {
        let p = plan("One. Two. Three.", &["a", "b"]);
        assert_matches!(validate_plan(&p), Err(PlanningError::InvalidShape(_)));
    }

    #[test]
    fn rejects_empty_prompt_list() {
        let p = plan("One sentence.", &[]);
        assert_matches!(validate_plan(&p), Err(PlanningError::InvalidShape(_)));
    }

    #[test]
    fn rejects_blank_prompt_entries() {
        let p = plan("One. Two.", &["a robot", "   "]);
        assert_matches!(validate_plan(&p), Err(PlanningError::InvalidShape(_)));
    }

    #[test]
    fn accepts_single_sentence_plan() {
        let p = plan("Just one sentence here.", &["one prompt"]);
        assert!(validate_plan(&p).is_ok());
    }
}
