use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "warden", version, about = "Automated AWS Well-Architected review service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP review API
    Serve(ServeArgs),
    /// Run the queue worker that dispatches analysis runs
    Worker(WorkerArgs),
    /// Run a single review inline against a local inventory fixture
    Review(ReviewArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Path to the review store database
    #[arg(long, default_value = "./data/warden.db")]
    pub db: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also run the queue worker in this process
    #[arg(long)]
    pub with_worker: bool,
}

#[derive(Args, Clone)]
pub struct WorkerArgs {
    /// Path to the review store database
    #[arg(long, default_value = "./data/warden.db")]
    pub db: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Queue poll interval in seconds
    #[arg(long)]
    pub poll_secs: Option<u64>,

    /// Messages per batch
    #[arg(long)]
    pub batch: Option<usize>,
}

#[derive(Args, Clone)]
pub struct ReviewArgs {
    /// AWS account id to review
    #[arg(short, long)]
    pub account: String,

    /// AWS region
    #[arg(short, long, default_value = "us-east-1")]
    pub region: String,

    /// Comma-separated pillar tags, or "all"
    #[arg(long)]
    pub pillars: Option<String>,

    /// Path to the inventory fixture JSON
    #[arg(short, long)]
    pub fixture: String,

    /// Path to the review store database
    #[arg(long, default_value = "./data/warden.db")]
    pub db: String,

    /// Engine provider: anthropic, local, offline
    #[arg(long, default_value = "offline")]
    pub provider: String,

    /// Engine model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Engine API key (or use env vars)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Engine endpoint for the local provider
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: String,
}
