//! Schema-level validation (no filesystem checks).

use url::Url;

use crate::config::SerializerConfig;
use crate::error::{ConfigError, Result};

impl SerializerConfig {
    /// Reject values that would produce malformed bundles or URLs.
    pub fn validate(&self) -> Result<()> {
        if self.project_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "projectRoot".to_string(),
                hint: "project root must not be empty".to_string(),
            });
        }

        if let Some(base_url) = &self.base_url {
            if !base_url.starts_with('/') && Url::parse(base_url).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "baseUrl".to_string(),
                    hint: format!("expected an absolute URL or a path starting with '/', got {base_url:?}"),
                });
            }
        }

        if let Some(client_url) = &self.client_url {
            Url::parse(client_url).map_err(|e| ConfigError::InvalidValue {
                field: "clientUrl".to_string(),
                hint: format!("{client_url:?} is not an absolute URL: {e}"),
            })?;
        }

        Ok(())
    }
}
