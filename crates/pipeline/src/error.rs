//! Aggregated pipeline error taxonomy.

use reelforge_assembly::AssemblyError;
use reelforge_images::ImageAcquisitionError;
use reelforge_narrative::PlanningError;
use reelforge_speech::SynthesisError;

/// Any stage failure, converted at the coordinator boundary into the
/// run's single failure outcome. No stage is retried; the underlying
/// message surfaces verbatim in the report.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Planning(#[from] PlanningError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    ImageAcquisition(#[from] ImageAcquisitionError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
