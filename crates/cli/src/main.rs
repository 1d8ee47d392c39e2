//! Command-line entry point: one topic in, one report out.
//!
//! This binary is the pipeline's invoking collaborator. It loads
//! configuration from the environment, runs a single pipeline
//! invocation, and prints the structured success/failure report as
//! JSON on stdout. The exit code mirrors the report.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelforge_core::config::PipelineConfig;
use reelforge_pipeline::{RunCoordinator, RunReport};

#[derive(Parser, Debug)]
#[command(name = "reelforge", about = "Turn a short text topic into a narrated video")]
struct Args {
    /// Topic to build a video for.
    topic: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = PipelineConfig::from_env()?;

    let coordinator = RunCoordinator::from_config(&config);
    coordinator.dirs().ensure().await?;

    let result = coordinator.run(&args.topic).await;
    let failed = result.is_err();

    let report = RunReport::from_result(result);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
