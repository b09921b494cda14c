use clap::Parser;
use serde::{Deserialize, Serialize};

/// Base configuration for the service, parsed from CLI arguments.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "formsmith", about = "Webhook intake for partner registration")]
pub struct BaseConfig {
    /// Address to bind the webhook server to.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind_addr: String,

    /// Path for the durable dedup cache (RocksDB).
    #[arg(long, default_value = "./data/dedup")]
    pub dedup_path: String,

    /// Path of the append-only record file.
    #[arg(long, default_value = "./data/records.csv")]
    pub records_path: String,

    /// Path of the document template.
    #[arg(long, default_value = "./templates/contract.txt")]
    pub template_path: String,

    /// Directory for intermediate working copies.
    #[arg(long, default_value = "./data/work")]
    pub work_dir: String,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "./data/output")]
    pub output_dir: String,

    /// Remote endpoint for artifact upload. When set, artifacts are
    /// POSTed there instead of written to the output directory.
    #[arg(long)]
    pub artifact_upload_url: Option<String>,

    /// Bearer token sent with artifact uploads.
    #[arg(long, default_value = "")]
    pub artifact_auth_token: String,

    /// Dedup suppression window in seconds.
    #[arg(long, default_value_t = 3600)]
    pub dedup_window_secs: u64,

    /// Bounded wait for the pipeline lock in seconds; timing out answers
    /// "Busy" without touching anything.
    #[arg(long, default_value_t = 30)]
    pub lock_wait_secs: u64,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            dedup_path: "./data/dedup".to_string(),
            records_path: "./data/records.csv".to_string(),
            template_path: "./templates/contract.txt".to_string(),
            work_dir: "./data/work".to_string(),
            output_dir: "./data/output".to_string(),
            artifact_upload_url: None,
            artifact_auth_token: String::new(),
            dedup_window_secs: 3600,
            lock_wait_secs: 30,
        }
    }
}
