use std::env;
use std::fs;
use std::path::PathBuf;

use custdir_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

struct ConfigFile {
    path: PathBuf,
    doc: Value,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    CommandResult::report(0, render(&config, load_config_file(resolve_config_path(None)).as_ref()))
}

fn render(config: &AppConfig, file: Option<&ConfigFile>) -> String {
    let fields: [(&str, String, &[&str]); 8] = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            &["CUSTDIR_SERVER_BIND_ADDRESS"],
        ),
        ("server.port", config.server.port.to_string(), &["CUSTDIR_SERVER_PORT", "PORT"]),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["CUSTDIR_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        (
            "storage.data_file",
            config.storage.data_file.display().to_string(),
            &["CUSTDIR_STORAGE_DATA_FILE"],
        ),
        (
            "directory.default_page_size",
            config.directory.default_page_size.to_string(),
            &["CUSTDIR_DIRECTORY_DEFAULT_PAGE_SIZE"],
        ),
        (
            "directory.max_page_size",
            config.directory.max_page_size.to_string(),
            &["CUSTDIR_DIRECTORY_MAX_PAGE_SIZE"],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["CUSTDIR_LOGGING_LEVEL", "CUSTDIR_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            &["CUSTDIR_LOGGING_FORMAT", "CUSTDIR_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key_path, value, env_keys) in &fields {
        lines.push(render_line(key_path, value, field_source(key_path, env_keys, file)));
    }
    lines.join("\n")
}

fn load_config_file(path: Option<PathBuf>) -> Option<ConfigFile> {
    let path = path?;
    let raw = fs::read_to_string(&path).ok()?;
    let doc = raw.parse::<Value>().ok()?;
    Some(ConfigFile { path, doc })
}

fn field_source(key_path: &str, env_keys: &[&str], file: Option<&ConfigFile>) -> String {
    for env_key in env_keys {
        if env::var(env_key).is_ok_and(|value| !value.trim().is_empty()) {
            return format!("env ({env_key})");
        }
    }

    if let Some(file) = file {
        if contains_path(&file.doc, key_path) {
            return format!("file ({})", file.path.display());
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use super::{contains_path, field_source, ConfigFile};
    use std::path::PathBuf;
    use toml::Value;

    fn file(raw: &str) -> ConfigFile {
        ConfigFile {
            path: PathBuf::from("custdir.toml"),
            doc: raw.parse::<Value>().expect("valid toml"),
        }
    }

    #[test]
    fn contains_path_walks_nested_tables() {
        let doc = file("[server]\nport = 8080\n").doc;

        assert!(contains_path(&doc, "server.port"));
        assert!(!contains_path(&doc, "server.bind_address"));
        assert!(!contains_path(&doc, "storage.data_file"));
    }

    #[test]
    fn field_source_prefers_file_over_default() {
        let file = file("[storage]\ndata_file = \"data/customers.json\"\n");

        assert_eq!(
            field_source("storage.data_file", &["CUSTDIR_TEST_UNSET_KEY"], Some(&file)),
            "file (custdir.toml)"
        );
        assert_eq!(
            field_source("directory.max_page_size", &["CUSTDIR_TEST_UNSET_KEY"], Some(&file)),
            "default"
        );
    }
}
