//! Narrative planning stage.
//!
//! Turns a free-text topic into a [`StoryPlan`](reelforge_core::types::StoryPlan):
//! a short narration script plus one image prompt per sentence,
//! requested from a text-generation service as a JSON document and
//! validated before anything downstream runs.

pub mod gemini;
pub mod planner;

pub use gemini::GeminiPlanner;
pub use planner::{validate_plan, PlanningError, StoryPlanner};
