use anyhow::Result;
use chunk_advisor::{
    api, cli,
    config::AppConfig,
    estimator::{ChunkSizeEstimator, HeuristicEstimator},
    models::PredictionInput,
    network::OptimizerClient,
    plan::{chunk_size_bytes, plan_chunks},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let args = cli::Cli::parse_args();
    let estimator = HeuristicEstimator::new();

    match args.command {
        cli::Command::Serve { bind } => {
            let bind_addr = bind.unwrap_or_else(|| config.api_bind_addr.clone());
            api::serve(&bind_addr, Arc::new(estimator)).await?;
        }
        cli::Command::Predict(input) => {
            let output = estimator.predict(&PredictionInput::from(input));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        cli::Command::Query { input, url } => {
            let base_url = url.unwrap_or_else(|| config.optimizer_url.clone());
            let client = OptimizerClient::new(base_url, config.request_timeout())?;
            let output = client.predict(&PredictionInput::from(input)).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        cli::Command::Plan(input) => {
            let input = PredictionInput::from(input);
            let output = estimator.predict(&input);
            let chunk_bytes = chunk_size_bytes(output.chunk_size_mb);
            tracing::info!(
                chunk_size_mb = output.chunk_size_mb,
                chunk_bytes,
                "planning chunks"
            );
            let plan = plan_chunks(input.size_bytes, chunk_bytes)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }

    Ok(())
}
