//! Scene image acquisition stage.
//!
//! For each plan prompt, in order: draw a random seed, append the
//! fixed style suffix, fetch one 1280x720 still from the image
//! service, and persist it to the run's per-index path. Any single
//! failure aborts the whole run; a partial scene set is never passed
//! downstream.

pub mod acquirer;
pub mod client;
pub mod seed;

pub use acquirer::{ImageAcquisitionError, PollinationsAcquirer, SceneImageAcquirer};
pub use client::{enhance_prompt, PollinationsClient, STYLE_SUFFIX};
pub use seed::{SeedSource, ThreadRngSeeds};
