//! Configuration for a trigger run.
//!
//! Two layers are involved:
//! - [`TriggerInputs`]: the step inputs (`baseUrl`, `jobUrl`, `jobParams`),
//!   read once from the host run context, with CLI flags taking precedence.
//! - [`ClientSettings`]: HTTP client tuning loaded from `jenkins-trigger.toml`.
//!   Missing keys use defaults. `JENKINS_USER` and `JENKINS_API_TOKEN` take
//!   precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::actions::RunContext;
use crate::error::TriggerError;

pub const INPUT_BASE_URL: &str = "baseUrl";
pub const INPUT_JOB_URL: &str = "jobUrl";
pub const INPUT_JOB_PARAMS: &str = "jobParams";

const DEFAULT_SETTINGS_FILE: &str = "jenkins-trigger.toml";

/// Step inputs, immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerInputs {
    pub base_url: String,
    /// Job name, folder path or full job URL.
    pub job_url: String,
    /// Raw JSON object text; empty means no parameters.
    pub job_params: String,
}

/// Values given on the command line that replace the host inputs.
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub base_url: Option<String>,
    pub job_url: Option<String>,
    pub job_params: Option<String>,
}

impl TriggerInputs {
    /// Reads all inputs. Fails on the first missing required input, before any
    /// network activity.
    pub fn read(ctx: &dyn RunContext, overrides: &InputOverrides) -> Result<Self, TriggerError> {
        Ok(Self {
            base_url: input(ctx, INPUT_BASE_URL, overrides.base_url.as_deref(), true)?,
            job_url: input(ctx, INPUT_JOB_URL, overrides.job_url.as_deref(), true)?,
            job_params: input(ctx, INPUT_JOB_PARAMS, overrides.job_params.as_deref(), false)?,
        })
    }
}

fn input(
    ctx: &dyn RunContext,
    name: &str,
    overridden: Option<&str>,
    required: bool,
) -> Result<String, TriggerError> {
    match overridden {
        Some(value) => {
            let value = value.trim();
            if required && value.is_empty() {
                return Err(TriggerError::missing_input(name));
            }
            Ok(value.to_string())
        }
        None => ctx.get_input(name, required),
    }
}

/// HTTP client settings loaded from `jenkins-trigger.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fetch a CSRF crumb before each POST.
    #[serde(default)]
    pub crumb_issuer: bool,

    /// User for basic auth. Overrides credentials embedded in the base URL.
    #[serde(default)]
    pub user: Option<String>,

    /// API token (or password) for basic auth.
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            crumb_issuer: false,
            user: None,
            api_token: None,
        }
    }
}

impl ClientSettings {
    /// Loads settings from `path`, or from `jenkins-trigger.toml` in the
    /// current directory when no path is given. A missing default file means
    /// defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = toml::from_str::<ClientSettings>(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Environment credentials win over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(user) = lookup("JENKINS_USER").filter(|v| !v.is_empty()) {
            self.user = Some(user);
        }
        if let Some(token) = lookup("JENKINS_API_TOKEN").filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
    }

    /// Basic-auth credentials, if a user is configured.
    pub fn credentials(&self) -> Option<(String, Option<String>)> {
        self.user
            .as_ref()
            .map(|user| (user.clone(), self.api_token.clone()))
    }
}
