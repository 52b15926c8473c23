//! File-name conventions of the pairwise OMB job logs
//!
//! Jobs write `{index}_{module}_{node1}_{node2}_{jobid}.out`, where the
//! module is the OMB environment module with `/` replaced by `-`
//! (e.g. `microOSU-openmpi-4.1.5-cuda`).

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref CUDA_74_MODULE: Regex =
        Regex::new(r"^\d+_microOSU-([a-zA-Z\-]+-[\d\.]+-7.4-cuda)").unwrap();
    static ref MODULE: Regex = Regex::new(r"^\d+_microOSU-([a-zA-Z\-]+-[\d\.]+(?:-cuda)?)").unwrap();
    static ref JOB_LOG: Regex = Regex::new(r"^(\d+)_(.+)_([^_]+)_([^_]+)_(\d+)\.out$").unwrap();
}

/// MPI library, version and optional CUDA flag encoded in a log file name
pub fn module_name(file_name: &str) -> Option<String> {
    CUDA_74_MODULE
        .captures(file_name)
        .or_else(|| MODULE.captures(file_name))
        .map(|caps| caps[1].to_string())
}

/// Fields of a pairwise job log name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobLogName {
    pub index: u32,
    pub benchmark: String,
    pub nodes: [String; 2],
    pub job_id: u64,
    pub module: Option<String>,
}

impl JobLogName {
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = JOB_LOG.captures(file_name)?;
        Some(Self {
            index: caps[1].parse().ok()?,
            benchmark: caps[2].to_string(),
            nodes: [caps[3].to_string(), caps[4].to_string()],
            job_id: caps[5].parse().ok()?,
            module: module_name(file_name),
        })
    }
}
