pub mod client;
pub mod error;
pub mod folder;
pub mod types;

pub use client::{JenkinsClient, JobApi};
pub use error::JenkinsError;
pub use types::{BuildOptions, JobParameters};
