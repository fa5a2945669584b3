//! Job locators for the Jenkins folder plugin.
//!
//! A job can be addressed either by a slash-separated name (`team/api/main`)
//! or by its full browser URL
//! (`https://ci.example.com/job/team/job/api/job/main/`). Both forms resolve
//! to the same list of job names, which is rendered back as the
//! `/job/<a>/job/<b>` path Jenkins expects.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use reqwest::Url;

// Same characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SEP: &str = "/job/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPath {
    names: Vec<String>,
}

impl FolderPath {
    pub fn parse(locator: &str) -> Self {
        let names = if locator.starts_with("http://") || locator.starts_with("https://") {
            names_from_job_url(locator)
        } else {
            locator
                .split('/')
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        };
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// URL path for this job relative to the controller root, e.g.
    /// `/job/team/job/my%20job`. Empty for an empty locator.
    pub fn path(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let encoded: Vec<String> = self
            .names
            .iter()
            .map(|name| utf8_percent_encode(name, COMPONENT).to_string())
            .collect();
        format!("{SEP}{}", encoded.join(SEP))
    }
}

// Collects the first continuous run of `job/<name>` pairs:
//   /foo/job/a/job/b/bar/job/c => [a, b]
fn names_from_job_url(url: &str) -> Vec<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => return Vec::new(),
    };

    let mut names = Vec::new();
    let mut expect_name = false;
    let mut started = false;
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if expect_name {
            names.push(percent_decode_str(part).decode_utf8_lossy().into_owned());
            expect_name = false;
            started = true;
        } else if part == "job" {
            expect_name = true;
        } else if started {
            break;
        }
    }
    names
}
