//! Resolution provenance report.
//!
//! `--explain_rc` prints this instead of dispatching: a machine-readable
//! snapshot of which rc files were read (with content digests), what the
//! startup options resolved to, and the exact argument vector that would
//! have been handed downstream.

use crate::options::OptionProcessor;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SCHEMA_VERSION: u32 = 1;
pub const SCHEMA_ID: &str = "forge-launcher/invocation_plan@1";

/// One rc file in the report: path, slot-determining index, content digest.
#[derive(Debug, Serialize)]
pub struct RcSourceInfo {
    pub path: String,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// The full resolution snapshot for one invocation.
#[derive(Debug, Serialize)]
pub struct InvocationPlan {
    pub schema_version: u32,
    pub schema_id: String,
    pub created_at: DateTime<Utc>,
    pub command: String,
    pub startup_args: usize,
    pub batch: bool,
    pub rc_sources: Vec<RcSourceInfo>,
    pub command_arguments: Vec<String>,
}

impl InvocationPlan {
    pub fn from_processor(processor: &OptionProcessor) -> Self {
        let rc_sources = processor
            .session()
            .files()
            .iter()
            .map(|file| RcSourceInfo {
                path: file.filename().to_string(),
                index: file.index(),
                sha256: file.sha256().map(str::to_string),
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            command: processor.command().to_string(),
            startup_args: processor.startup_args(),
            batch: processor.startup_options().batch,
            rc_sources,
            command_arguments: processor.command_arguments().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
