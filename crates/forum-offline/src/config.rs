use crate::model::SortOrder;

use serde::Deserialize;

/// Settings for the offline forum layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForumOfflineConfig {
    /// Component identifier tagged onto uploads and folder paths
    pub component: String,
    /// Ordering used when scanning discussion pages
    pub discussion_sort: SortOrder,
    /// Whether discussion page fetches bypass caches
    pub force_refresh: bool,
    /// Whether profile enrichment may use cached profiles
    pub profile_cache_ok: bool,
    /// Root path segment for offline attachment folders
    pub folder_root: String,
}

impl Default for ForumOfflineConfig {
    fn default() -> Self {
        Self {
            component: "mod_forum".to_string(),
            discussion_sort: SortOrder::default(),
            force_refresh: false,
            profile_cache_ok: true,
            folder_root: "offlinefiles".to_string(),
        }
    }
}

impl ForumOfflineConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (defaults apply when unset):
    /// - `FORUM_OFFLINE_COMPONENT`: component identifier
    /// - `FORUM_OFFLINE_SORT`: sort order, `1`..`6` or a variant name such as `CreatedAsc`
    /// - `FORUM_OFFLINE_FORCE_REFRESH`: `true`/`false`
    /// - `FORUM_OFFLINE_PROFILE_CACHE`: `true`/`false`
    /// - `FORUM_OFFLINE_FOLDER_ROOT`: root folder for queued attachments
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(component) = lookup("FORUM_OFFLINE_COMPONENT") {
            if component.trim().is_empty() {
                return Err(ConfigError::EmptyComponent);
            }
            config.component = component;
        }
        if let Some(sort) = lookup("FORUM_OFFLINE_SORT") {
            config.discussion_sort = parse_sort(&sort)?;
        }
        if let Some(value) = lookup("FORUM_OFFLINE_FORCE_REFRESH") {
            config.force_refresh = parse_bool("FORUM_OFFLINE_FORCE_REFRESH", &value)?;
        }
        if let Some(value) = lookup("FORUM_OFFLINE_PROFILE_CACHE") {
            config.profile_cache_ok = parse_bool("FORUM_OFFLINE_PROFILE_CACHE", &value)?;
        }
        if let Some(root) = lookup("FORUM_OFFLINE_FOLDER_ROOT") {
            config.folder_root = root;
        }

        Ok(config)
    }
}

fn parse_sort(value: &str) -> Result<SortOrder, ConfigError> {
    let value = value.trim();
    if let Ok(number) = value.parse::<u8>() {
        return SortOrder::from_value(number).ok_or_else(|| ConfigError::InvalidSort(value.into()));
    }
    match value.to_ascii_lowercase().as_str() {
        "lastpostdesc" => Ok(SortOrder::LastPostDesc),
        "lastpostasc" => Ok(SortOrder::LastPostAsc),
        "createddesc" => Ok(SortOrder::CreatedDesc),
        "createdasc" => Ok(SortOrder::CreatedAsc),
        "repliesdesc" => Ok(SortOrder::RepliesDesc),
        "repliesasc" => Ok(SortOrder::RepliesAsc),
        _ => Err(ConfigError::InvalidSort(value.into())),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.into(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FORUM_OFFLINE_COMPONENT must not be empty")]
    EmptyComponent,
    #[error("Invalid discussion sort order: {0}")]
    InvalidSort(String),
    #[error("{name} must be a boolean, got {value:?}")]
    InvalidBool { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ForumOfflineConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ForumOfflineConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), ForumOfflineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FORUM_OFFLINE_COMPONENT", "mod_hsuforum"),
            ("FORUM_OFFLINE_SORT", "CreatedAsc"),
            ("FORUM_OFFLINE_FORCE_REFRESH", "yes"),
            ("FORUM_OFFLINE_PROFILE_CACHE", "0"),
            ("FORUM_OFFLINE_FOLDER_ROOT", "drafts"),
        ])
        .unwrap();

        assert_eq!(config.component, "mod_hsuforum");
        assert_eq!(config.discussion_sort, SortOrder::CreatedAsc);
        assert!(config.force_refresh);
        assert!(!config.profile_cache_ok);
        assert_eq!(config.folder_root, "drafts");
    }

    #[test]
    fn test_numeric_sort() {
        let config = load(&[("FORUM_OFFLINE_SORT", "5")]).unwrap();
        assert_eq!(config.discussion_sort, SortOrder::RepliesDesc);
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(
            load(&[("FORUM_OFFLINE_SORT", "9")]),
            Err(ConfigError::InvalidSort(_))
        ));
        assert!(matches!(
            load(&[("FORUM_OFFLINE_FORCE_REFRESH", "maybe")]),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert!(matches!(
            load(&[("FORUM_OFFLINE_COMPONENT", " ")]),
            Err(ConfigError::EmptyComponent)
        ));
    }

    #[test]
    fn test_deserialize_with_partial_fields() {
        let config: ForumOfflineConfig =
            serde_json::from_str(r#"{"component": "mod_forum", "force_refresh": true}"#).unwrap();
        assert!(config.force_refresh);
        assert_eq!(config.folder_root, "offlinefiles");
    }
}
