pub mod config;
pub mod doctor;
pub mod seed;

use std::path::Path;

use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

/// What a command did to the customer data file, when it touched one.
#[derive(Debug, Serialize)]
pub struct DataFileSummary {
    pub path: String,
    pub customers: usize,
    pub cities: usize,
}

impl DataFileSummary {
    pub fn new(path: &Path, customers: usize, cities: usize) -> Self {
        Self { path: path.display().to_string(), customers, cities }
    }
}

#[derive(Debug, Serialize)]
struct CommandOutcome<'a> {
    command: &'a str,
    status: &'static str,
    error_class: Option<&'a str>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_file: Option<DataFileSummary>,
}

impl CommandResult {
    pub fn success(
        command: &str,
        message: impl Into<String>,
        data_file: Option<DataFileSummary>,
    ) -> Self {
        let payload = CommandOutcome {
            command,
            status: "ok",
            error_class: None,
            message: message.into(),
            data_file,
        };
        Self { exit_code: 0, output: serialize_payload(&payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command,
            status: "error",
            error_class: Some(error_class),
            message: message.into(),
            data_file: None,
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }

    /// Free-form output, used by commands that render their own report.
    pub fn report(exit_code: u8, output: String) -> Self {
        Self { exit_code, output }
    }
}

fn serialize_payload(payload: &CommandOutcome<'_>) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        json!({
            "command": payload.command,
            "status": "error",
            "error_class": "serialization",
            "message": error.to_string(),
        })
        .to_string()
    })
}
