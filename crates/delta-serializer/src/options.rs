//! Serializer option types.
//!
//! Data-valued options come from [`SerializerConfig`]; function-valued hooks
//! are attached here with defaults that match a plain development build.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use delta_config::SerializerConfig;
use delta_graph::{CreateModuleId, Module, ModuleId};
use url::Url;

use crate::error::{Result, SerializerError};
use crate::js::WrapOptions;
use crate::process::ProcessModulesOptions;

/// Predicate over modules (`processModuleFilter`, `shouldAddToIgnoreList`).
pub type ModulePredicate = Arc<dyn Fn(&Module) -> bool + Send + Sync>;

/// Builds the statement that runs a module by id (`getRunModuleStatement`).
pub type RunModuleStatement = Arc<dyn Fn(ModuleId) -> String + Send + Sync>;

/// Maps a module to the source URL recorded in source maps (`getSourceUrl`).
pub type SourceUrlFn = Arc<dyn Fn(&Module) -> String + Send + Sync>;

/// Options for the full-bundle assembler.
#[derive(Clone)]
pub struct SerializerOptions {
    pub config: SerializerConfig,
    pub create_module_id: Arc<dyn CreateModuleId>,
    pub process_module_filter: ModulePredicate,
    pub get_run_module_statement: RunModuleStatement,
    pub should_add_to_ignore_list: ModulePredicate,
    pub get_source_url: Option<SourceUrlFn>,
}

impl SerializerOptions {
    /// Options with default hooks: every module passes the filter, modules
    /// run through `__r(id);`, nothing is ignore-listed.
    pub fn new(config: SerializerConfig, create_module_id: Arc<dyn CreateModuleId>) -> Self {
        Self {
            config,
            create_module_id,
            process_module_filter: Arc::new(|_| true),
            get_run_module_statement: Arc::new(default_run_module_statement),
            should_add_to_ignore_list: Arc::new(|_| false),
            get_source_url: None,
        }
    }

    pub fn with_process_module_filter(
        mut self,
        filter: impl Fn(&Module) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.process_module_filter = Arc::new(filter);
        self
    }

    pub fn with_run_module_statement(
        mut self,
        statement: impl Fn(ModuleId) -> String + Send + Sync + 'static,
    ) -> Self {
        self.get_run_module_statement = Arc::new(statement);
        self
    }

    pub fn with_ignore_list(
        mut self,
        predicate: impl Fn(&Module) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_add_to_ignore_list = Arc::new(predicate);
        self
    }

    pub fn with_source_url_fn(
        mut self,
        source_url: impl Fn(&Module) -> String + Send + Sync + 'static,
    ) -> Self {
        self.get_source_url = Some(Arc::new(source_url));
        self
    }

    pub(crate) fn process_modules_options(&self) -> ProcessModulesOptions<'_> {
        ProcessModulesOptions {
            filter: self.process_module_filter.as_ref(),
            wrap: WrapOptions {
                create_module_id: self.create_module_id.as_ref(),
                dev: self.config.dev,
                include_async_paths: self.config.include_async_paths,
                project_root: &self.config.project_root,
                server_root: self.config.url_root(),
                source_url: self.config.source_url.as_deref(),
            },
        }
    }
}

impl fmt::Debug for SerializerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerOptions")
            .field("config", &self.config)
            .field("get_source_url", &self.get_source_url.is_some())
            .finish_non_exhaustive()
    }
}

/// `__r(<id>);`
pub fn default_run_module_statement(module_id: ModuleId) -> String {
    format!("__r({module_id});")
}

/// Options for the hot-update assembler.
#[derive(Clone)]
pub struct HmrOptions {
    /// Entry-point URL of the connected client.
    pub client_url: Url,
    pub create_module_id: Arc<dyn CreateModuleId>,
    pub include_async_paths: bool,
    pub project_root: PathBuf,
    pub server_root: Option<PathBuf>,
    pub base_url: Option<String>,
}

impl HmrOptions {
    pub fn new(client_url: Url, project_root: impl Into<PathBuf>, create_module_id: Arc<dyn CreateModuleId>) -> Self {
        Self {
            client_url,
            create_module_id,
            include_async_paths: false,
            project_root: project_root.into(),
            server_root: None,
            base_url: None,
        }
    }

    /// Build from configuration; `clientUrl` must be set.
    pub fn from_config(config: &SerializerConfig, create_module_id: Arc<dyn CreateModuleId>) -> Result<Self> {
        let client_url = config
            .client_url
            .as_deref()
            .ok_or(SerializerError::MissingClientUrl)?;

        Ok(Self {
            client_url: Url::parse(client_url)?,
            create_module_id,
            include_async_paths: config.include_async_paths,
            project_root: config.project_root.clone(),
            server_root: config.server_root.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Root that module URLs are relative to.
    pub fn url_root(&self) -> &Path {
        self.server_root.as_deref().unwrap_or(&self.project_root)
    }
}

impl fmt::Debug for HmrOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmrOptions")
            .field("client_url", &self.client_url.as_str())
            .field("include_async_paths", &self.include_async_paths)
            .field("project_root", &self.project_root)
            .field("server_root", &self.server_root)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
