//! Run coordination for the topic-to-video pipeline.
//!
//! The [`RunCoordinator`](coordinator::RunCoordinator) drives the four
//! stages in strict sequence, short-circuits on the first failure,
//! and guarantees transient artifact cleanup on every exit path. The
//! invoking collaborator receives a structured
//! [`RunReport`](report::RunReport), never an unhandled fault.

pub mod coordinator;
pub mod error;
pub mod report;

pub use coordinator::RunCoordinator;
pub use error::PipelineError;
pub use report::{RunOutcome, RunReport};
