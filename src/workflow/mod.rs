//! The job trigger workflow.
//!
//! [`run`] reads the step inputs, binds a [`JenkinsClient`] and hands over to
//! [`trigger`], which holds the one real decision: a job that has never been
//! built is triggered without parameters, because Jenkins only learns a
//! pipeline's parameter definitions from its first run. [`report`] is the
//! single place an outcome is turned into a success or failure report.

mod state;

pub use state::{State, TriggerRun};

use serde_json::Value;

use crate::actions::RunContext;
use crate::config::{ClientSettings, InputOverrides, TriggerInputs};
use crate::error::TriggerError;
use crate::jenkins::{BuildOptions, JenkinsClient, JobApi, JobParameters};

pub const OUTPUT_QUEUE_ID: &str = "queueId";

/// Full run against a real controller. Returns the queue item number when
/// Jenkins reported one.
pub async fn run(
    run: &mut TriggerRun,
    ctx: &dyn RunContext,
    settings: &ClientSettings,
    overrides: &InputOverrides,
) -> Result<Option<u64>, TriggerError> {
    let inputs = TriggerInputs::read(ctx, overrides)?;

    let client = JenkinsClient::connect(&inputs.base_url, settings)?;
    ctx.info("Fetching Jenkins client");
    ctx.debug(&format!("Jenkins client bound to {}", client.base_url()));

    trigger(run, &client, ctx, &inputs).await
}

/// Fetches job metadata and issues exactly one build trigger.
pub async fn trigger(
    run: &mut TriggerRun,
    client: &impl JobApi,
    ctx: &dyn RunContext,
    inputs: &TriggerInputs,
) -> Result<Option<u64>, TriggerError> {
    let job_url = inputs.job_url.as_str();

    run.advance(State::FetchingMetadata);
    let job = client.get_job(job_url).await?;
    ctx.debug(&format!(
        "Job {job_url} next build number: {}",
        job.next_build_number
    ));

    let parameters = parse_job_params(&inputs.job_params)?;

    let queue_item = if job.is_first_build() {
        ctx.warning(&format!(
            "Triggering Jenkins job {job_url} without parameters because this is its first execution"
        ));
        run.advance(State::TriggeringUnparameterized);
        client.build(job_url, None).await?
    } else {
        let options = BuildOptions::immediate(parameters);
        ctx.info(&format!(
            "Triggering Jenkins job: {job_url} with params: {}",
            options.describe()
        ));
        run.advance(State::TriggeringParameterized);
        client.build(job_url, Some(&options)).await?
    };

    match queue_item {
        Some(item) => ctx.info(&format!("Triggered Jenkins job: {job_url} (queue item {item})")),
        None => ctx.info(&format!("Triggered Jenkins job: {job_url}")),
    }
    Ok(queue_item)
}

/// Parses the `jobParams` input. Blank input means no parameters.
pub fn parse_job_params(raw: &str) -> Result<JobParameters, TriggerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(JobParameters::new());
    }

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| TriggerError::Parse(format!("jobParams is not valid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(TriggerError::Parse(format!(
            "jobParams must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reports the outcome exactly once and moves the run to its terminal state.
pub fn report(
    ctx: &dyn RunContext,
    run: &mut TriggerRun,
    outcome: Result<Option<u64>, TriggerError>,
) -> State {
    match outcome {
        Ok(queue_item) => {
            run.succeed(queue_item);
            if let Some(item) = run.queue_item
                && let Err(e) = ctx.set_output(OUTPUT_QUEUE_ID, &item.to_string())
            {
                ctx.warning(&format!("Failed to set output {OUTPUT_QUEUE_ID}: {e}"));
            }
        }
        Err(err) => {
            let message = err.to_string();
            run.fail(&message);
            ctx.set_failed(&message);
        }
    }
    ctx.debug(&format!("Run path: {}", run.path()));
    ctx.debug(&format!(
        "Run record: {}",
        serde_json::to_string(run).unwrap_or_default()
    ));
    run.state
}
