//! Data types exchanged with the Jenkins remote API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Caller-defined build parameters. Keys and values pass through to Jenkins
/// untouched; only the top level is required to be an object.
pub type JobParameters = Map<String, Value>;

/// Subset of `GET {job}/api/json` used to decide how to trigger a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    /// Number the next build of this job will receive. `1` means the job
    /// has never been built.
    pub next_build_number: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub buildable: Option<bool>,
    #[serde(default)]
    pub in_queue: Option<bool>,
}

impl JobInfo {
    /// A job that has never run may not have its parameter definitions yet.
    pub fn is_first_build(&self) -> bool {
        self.next_build_number == 1
    }
}

/// Options for a parameterized trigger (`buildWithParameters`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOptions {
    /// Quiet period before the build starts.
    pub delay_seconds: u64,
    pub parameters: JobParameters,
}

impl BuildOptions {
    /// Options for a build that starts right away.
    pub fn immediate(parameters: JobParameters) -> Self {
        Self {
            delay_seconds: 0,
            parameters,
        }
    }

    /// Value of the `delay` query parameter, e.g. `0sec`.
    pub fn delay_query(&self) -> String {
        format!("{}sec", self.delay_seconds)
    }

    /// Form body sent to `buildWithParameters`.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|(name, value)| (name.clone(), form_value(value)))
            .collect()
    }

    /// JSON rendering of the full payload, used in log lines.
    pub fn describe(&self) -> String {
        json!({
            "delay": self.delay_query(),
            "parameters": self.parameters,
        })
        .to_string()
    }
}

// Jenkins parameters are strings on the wire.
fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Response of `GET /crumbIssuer/api/json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    #[serde(default)]
    pub crumb_request_field: Option<String>,
    #[serde(default)]
    pub crumb: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_info_deserialize_from_api_format() {
        let api_json = r#"{
            "_class": "org.jenkinsci.plugins.workflow.job.WorkflowJob",
            "name": "PR-12345",
            "url": "https://jenkins.foo.com/job/foo/job/bar/job/PR-12345/",
            "buildable": true,
            "inQueue": false,
            "nextBuildNumber": 7,
            "builds": []
        }"#;
        let info: JobInfo = serde_json::from_str(api_json).unwrap();
        assert_eq!(info.next_build_number, 7);
        assert_eq!(info.name.as_deref(), Some("PR-12345"));
        assert_eq!(info.in_queue, Some(false));
        assert!(!info.is_first_build());
    }

    #[test]
    fn job_info_minimal_payload() {
        let info: JobInfo = serde_json::from_str(r#"{"nextBuildNumber": 1}"#).unwrap();
        assert!(info.is_first_build());
        assert!(info.name.is_none());
    }

    #[test]
    fn job_info_requires_next_build_number() {
        assert!(serde_json::from_str::<JobInfo>(r#"{"name": "x"}"#).is_err());
    }

    #[test]
    fn immediate_options_have_zero_delay() {
        let opts = BuildOptions::immediate(JobParameters::new());
        assert_eq!(opts.delay_seconds, 0);
        assert_eq!(opts.delay_query(), "0sec");
    }

    #[test]
    fn form_fields_stringify_values() {
        let params: JobParameters = serde_json::from_str(
            r#"{"BRANCH":"main","CLEAN_WS":false,"RETRIES":3,"NOTE":null,"TAGS":["a","b"]}"#,
        )
        .unwrap();
        let fields = BuildOptions::immediate(params).form_fields();
        let get = |k: &str| {
            fields
                .iter()
                .find(|(name, _)| name == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("BRANCH"), Some("main"));
        assert_eq!(get("CLEAN_WS"), Some("false"));
        assert_eq!(get("RETRIES"), Some("3"));
        assert_eq!(get("NOTE"), Some(""));
        assert_eq!(get("TAGS"), Some(r#"["a","b"]"#));
    }

    #[test]
    fn describe_includes_delay_and_parameters() {
        let params: JobParameters = serde_json::from_str(r#"{"BRANCH":"main"}"#).unwrap();
        let text = BuildOptions::immediate(params).describe();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["delay"], "0sec");
        assert_eq!(parsed["parameters"]["BRANCH"], "main");
    }
}
