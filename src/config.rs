use crate::clickup::{ClickUpClient, DEFAULT_API_BASE};
use crate::error::ConfigError;
use crate::source::{ClickUpTaskSource, EmptyTaskSource, FileTaskSource, TaskSource};
use crate::workload::Roster;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub clickup_token: Option<String>,
    pub api_base: String,
    pub list_id: Option<String>,
    pub port: u16,
    pub roster: Roster,
    pub data_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clickup_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            list_id: None,
            port: DEFAULT_PORT,
            roster: Roster::default(),
            data_file: None,
        }
    }
}

impl AppConfig {
    /// Reads the process environment after loading `.env`, if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            clickup_token: get("CLICKUP_API_TOKEN"),
            api_base: get("CLICKUP_API_BASE").unwrap_or(defaults.api_base),
            list_id: get("CLICKUP_LIST_ID"),
            port,
            roster: get("TASKBOARD_ROSTER")
                .map(|list| Roster::parse(&list))
                .unwrap_or(defaults.roster),
            data_file: get("TASKBOARD_DATA_FILE").map(PathBuf::from),
        })
    }

    /// Upstream client, when a credential is configured.
    pub fn client(&self) -> Option<ClickUpClient> {
        self.clickup_token
            .as_deref()
            .map(|token| ClickUpClient::new(&self.api_base, token))
    }

    /// Data file wins; otherwise a live list when both token and list id
    /// are set; otherwise nothing.
    pub fn task_source(&self) -> Arc<dyn TaskSource> {
        if let Some(path) = &self.data_file {
            return Arc::new(FileTaskSource::new(path.clone()));
        }
        match (self.client(), &self.list_id) {
            (Some(client), Some(list_id)) => Arc::new(ClickUpTaskSource::new(client, list_id.clone())),
            _ => Arc::new(EmptyTaskSource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 4000);
        assert_eq!(config.api_base, "https://api.clickup.com/api/v2");
        assert!(config.client().is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("CLICKUP_API_TOKEN", "pk_123"),
            ("CLICKUP_API_BASE", "http://localhost:9000"),
            ("CLICKUP_LIST_ID", "901"),
            ("PORT", "8080"),
            ("TASKBOARD_ROSTER", "Ana,Ben"),
            ("TASKBOARD_DATA_FILE", "data/summary.json"),
        ])
        .unwrap();

        assert_eq!(config.clickup_token.as_deref(), Some("pk_123"));
        assert_eq!(config.list_id.as_deref(), Some("901"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.roster.members(), &["Ana", "Ben"]);
        assert_eq!(config.data_file, Some(PathBuf::from("data/summary.json")));
        assert_eq!(config.client().map(|c| c.base_url().to_string()), Some("http://localhost:9000".into()));
    }

    #[test]
    fn test_blank_token_counts_as_unset() {
        let config = config_from(&[("CLICKUP_API_TOKEN", "   ")]).unwrap();
        assert!(config.clickup_token.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let result = config_from(&[("PORT", "eighty")]);
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }

    #[test]
    fn test_task_source_selection() {
        let mut config = config_from(&[("CLICKUP_API_TOKEN", "pk"), ("CLICKUP_LIST_ID", "7")]).unwrap();
        assert_eq!(config.task_source().describe(), "ClickUp list 7");

        config.data_file = Some(PathBuf::from("snapshot.json"));
        assert_eq!(config.task_source().describe(), "file snapshot.json");

        let config = config_from(&[("CLICKUP_LIST_ID", "7")]).unwrap();
        assert_eq!(config.task_source().describe(), "no task data configured");
    }
}
