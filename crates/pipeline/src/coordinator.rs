//! The run coordinator: the pipeline's entry point.

use reelforge_assembly::{FfmpegAssembler, VideoAssembler};
use reelforge_core::config::PipelineConfig;
use reelforge_core::storage::MediaDirs;
use reelforge_core::types::RunId;
use reelforge_images::{
    PollinationsAcquirer, PollinationsClient, SceneImageAcquirer, ThreadRngSeeds,
};
use reelforge_narrative::{GeminiPlanner, StoryPlanner};
use reelforge_speech::{EdgeSpeechClient, SpeechSynthesizer};

use crate::error::PipelineError;
use crate::report::RunOutcome;

/// Drives one topic-to-video run: plan, synthesize, acquire,
/// assemble, in strict sequence. Each run gets a fresh [`RunId`] and
/// its transient artifacts are swept on every exit path; a partially
/// written video is left where the encoder stopped.
pub struct RunCoordinator {
    dirs: MediaDirs,
    planner: Box<dyn StoryPlanner>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    acquirer: Box<dyn SceneImageAcquirer>,
    assembler: Box<dyn VideoAssembler>,
}

impl RunCoordinator {
    /// Assemble a coordinator from explicit stage implementations
    /// (tests inject fakes here).
    pub fn new(
        dirs: MediaDirs,
        planner: Box<dyn StoryPlanner>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        acquirer: Box<dyn SceneImageAcquirer>,
        assembler: Box<dyn VideoAssembler>,
    ) -> Self {
        Self {
            dirs,
            planner,
            synthesizer,
            acquirer,
            assembler,
        }
    }

    /// Wire up the real service clients from a [`PipelineConfig`].
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            MediaDirs::new(&config.media_root),
            Box::new(GeminiPlanner::new(
                config.text_api_key.clone(),
                config.text_model.clone(),
            )),
            Box::new(EdgeSpeechClient::new(config.voice.clone())),
            Box::new(PollinationsAcquirer::new(
                PollinationsClient::new(
                    config.image_base_url.clone(),
                    config.image_model.clone(),
                ),
                Box::new(ThreadRngSeeds),
            )),
            Box::new(FfmpegAssembler),
        )
    }

    /// The media directories this coordinator writes under.
    pub fn dirs(&self) -> &MediaDirs {
        &self.dirs
    }

    /// Execute one run for a topic.
    ///
    /// Short-circuits to the first stage error; stages after a failure
    /// point are never invoked. Whether the run succeeds or fails, the
    /// run's transient audio and image files are removed before this
    /// returns.
    pub async fn run(&self, topic: &str) -> Result<RunOutcome, PipelineError> {
        let run = RunId::generate();
        tracing::info!(run = %run, topic, "Pipeline run started");

        let mut planned_scenes = 0usize;
        let result = self.execute(&run, topic, &mut planned_scenes).await;

        let removed = self.dirs.cleanup_run(&run, planned_scenes).await;
        tracing::debug!(run = %run, removed, "Transient artifacts swept");

        match &result {
            Ok(outcome) => {
                tracing::info!(run = %run, video = %outcome.video.path.display(),
                    "Pipeline run succeeded");
            }
            Err(e) => {
                tracing::error!(run = %run, error = %e, "Pipeline run failed");
            }
        }
        result
    }

    async fn execute(
        &self,
        run: &RunId,
        topic: &str,
        planned_scenes: &mut usize,
    ) -> Result<RunOutcome, PipelineError> {
        let plan = self.planner.plan(topic).await?;
        // Everything the later stages may leave behind is bounded by
        // the plan's scene count; record it before any file exists so
        // the cleanup sweep covers partial failures.
        *planned_scenes = plan.scene_count();

        let audio = self
            .synthesizer
            .synthesize(&plan.script, &self.dirs.audio_path(run))
            .await?;

        let scenes = self
            .acquirer
            .acquire(run, &plan.image_prompts, &self.dirs)
            .await?;

        let video = self
            .assembler
            .assemble(&audio, &scenes, &self.dirs.video_path(run))
            .await?;

        Ok(RunOutcome {
            run: run.clone(),
            video,
            script: plan.script,
        })
    }
}
