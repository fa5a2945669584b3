//! Command-line interface based on clap.
//!
//! Inside a workflow step the inputs arrive as `INPUT_*` variables; the flags
//! here exist for local runs and override those variables when given.

use std::path::PathBuf;

use clap::Parser;

use crate::config::InputOverrides;

/// Trigger a Jenkins job build, skipping parameters on the job's first run.
#[derive(Debug, Parser)]
#[command(name = "jenkins-trigger", version, about)]
pub struct Cli {
    /// Jenkins base URL (overrides INPUT_BASEURL).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Job name, folder path or full job URL (overrides INPUT_JOBURL).
    #[arg(long)]
    pub job_url: Option<String>,

    /// Build parameters as a JSON object (overrides INPUT_JOBPARAMS).
    #[arg(long)]
    pub job_params: Option<String>,

    /// Path to a settings file. Defaults to ./jenkins-trigger.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print debug lines on local runs.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> InputOverrides {
        InputOverrides {
            base_url: self.base_url.clone(),
            job_url: self.job_url.clone(),
            job_params: self.job_params.clone(),
        }
    }
}
