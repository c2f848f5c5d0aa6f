use crate::result::JobResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    pub job_id: String,
    pub endpoint: String,
    pub sink_path: String,
    pub started: String,
    pub finished: String,
    pub elevated: bool,
    pub result: JobResult,
    pub output_data: BTreeMap<String, String>,
}
