//! Data-valued serializer options.
//!
//! Function-valued hooks (module filter, id factory, run-module statement,
//! ignore-list predicate, source URL mapping) cannot be deserialized and live
//! on the serializer's own option types instead.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializerConfig {
    /// Development wrapping: adds the verbose module path to define calls.
    pub dev: bool,

    /// Emit a `paths` map for async dependencies so the runtime can fetch them.
    pub include_async_paths: bool,

    /// Root used for verbose module names and as the URL fallback root.
    pub project_root: PathBuf,

    /// Root that module URLs are relative to. Falls back to `project_root`.
    pub server_root: Option<PathBuf>,

    /// URL the bundle is served from.
    pub source_url: Option<String>,

    /// Skip polyfills and the module system prelude.
    pub modules_only: bool,

    /// Prefix applied to source map and module URLs.
    pub base_url: Option<String>,

    /// URL of the whole-bundle source map.
    pub source_map_url: Option<String>,

    /// Emit statements that require the entry point (and `run_before_main_module`).
    pub run_module: bool,

    /// Modules required before the entry point, in order.
    pub run_before_main_module: Vec<String>,

    /// Module path of the async-require runtime helper. Carried for callers
    /// that configure it; the serializers build async paths from `source_url`
    /// and never read it.
    pub async_require_module_path: String,

    /// Embed the source map as a data URL instead of referencing `source_map_url`.
    pub inline_source_map: bool,

    /// Entry-point URL of the connected hot-reload client.
    pub client_url: Option<String>,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            dev: default_dev(),
            include_async_paths: false,
            project_root: default_project_root(),
            server_root: None,
            source_url: None,
            modules_only: false,
            base_url: None,
            source_map_url: None,
            run_module: default_run_module(),
            run_before_main_module: Vec::new(),
            async_require_module_path: default_async_require_module_path(),
            inline_source_map: false,
            client_url: None,
        }
    }
}

impl SerializerConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use delta_config::SerializerConfig;
    /// use serde_json::json;
    ///
    /// let config = SerializerConfig::from_value(json!({
    ///     "dev": false,
    ///     "baseUrl": "https://cdn.example.com/app/"
    /// }))
    /// .unwrap();
    /// assert!(!config.dev);
    /// assert_eq!(config.base_url.as_deref(), Some("https://cdn.example.com/app/"));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    /// The root module URLs are computed against.
    pub fn url_root(&self) -> &PathBuf {
        self.server_root.as_ref().unwrap_or(&self.project_root)
    }
}

fn default_dev() -> bool {
    true
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_run_module() -> bool {
    true
}

fn default_async_require_module_path() -> String {
    "asyncRequire".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_applies_defaults_for_missing_fields() {
        let config = SerializerConfig::from_value(json!({ "modulesOnly": true })).unwrap();
        assert!(config.modules_only);
        assert!(config.dev);
        assert!(config.run_module);
        assert_eq!(config.project_root, PathBuf::from("."));
    }

    #[test]
    fn to_value_uses_camel_case_keys() {
        let config = SerializerConfig {
            source_map_url: Some("index.map".into()),
            ..SerializerConfig::default()
        };
        let value = config.to_value().unwrap();
        assert_eq!(value["sourceMapUrl"], json!("index.map"));
        assert_eq!(value["runBeforeMainModule"], json!([]));
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        let err = SerializerConfig::from_value(json!({ "dev": "yes" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn url_root_prefers_server_root() {
        let mut config = SerializerConfig {
            project_root: PathBuf::from("/project"),
            ..SerializerConfig::default()
        };
        assert_eq!(config.url_root(), &PathBuf::from("/project"));

        config.server_root = Some(PathBuf::from("/server"));
        assert_eq!(config.url_root(), &PathBuf::from("/server"));
    }
}
