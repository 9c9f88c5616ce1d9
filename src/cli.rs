use crate::models::PredictionInput;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chunk size advisor for file transfer pipelines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP prediction service
    Serve {
        /// Address to listen on, overrides CHUNK_ADVISOR_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Predict a chunk size locally
    Predict(PredictArgs),
    /// Ask a running advisor for a chunk size
    Query {
        #[command(flatten)]
        input: PredictArgs,
        /// Advisor base URL, overrides CHUNK_ADVISOR_OPTIMIZER_URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the chunk plan for a file using the predicted chunk size
    Plan(PredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// File size in bytes
    #[arg(allow_negative_numbers = true)]
    pub size_bytes: i64,
    #[arg(long)]
    pub mime_type: Option<String>,
    /// Estimated bandwidth in megabits per second
    #[arg(long = "bandwidth")]
    pub bandwidth_mbps: Option<f64>,
    /// Estimated round-trip latency in milliseconds
    #[arg(long = "latency")]
    pub latency_ms: Option<f64>,
}

impl From<PredictArgs> for PredictionInput {
    fn from(args: PredictArgs) -> Self {
        Self {
            size_bytes: args.size_bytes,
            mime_type: args.mime_type,
            estimated_bandwidth_mbps: args.bandwidth_mbps,
            latency_ms: args.latency_ms,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
