#![cfg_attr(docsrs, feature(doc_cfg))]

//! # delta-serializer
//!
//! Turns a module graph snapshot into a full JavaScript bundle, and a graph
//! delta into a hot-update payload.
//!
//! Both serializers share the same pieces: module ids from an injected
//! [`CreateModuleId`](delta_graph::CreateModuleId), define-call wrapping, and
//! URL composition. Nothing here does I/O; compiled code is expected to be in
//! each module's `output` already.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use delta_config::SerializerConfig;
//! use delta_graph::{Graph, Module, ModuleIdRegistry};
//! use delta_serializer::{SerializerOptions, base_js_bundle, bundle_to_string};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = Graph::new();
//! graph.add_entry_point("/app/index.js");
//! graph.add_module(Module::builder("/app/index.js").js_module("__d(function() {});").build());
//!
//! let config = SerializerConfig {
//!     dev: false,
//!     ..SerializerConfig::default()
//! };
//! let options = SerializerOptions::new(config, Arc::new(ModuleIdRegistry::new()));
//!
//! let bundle = base_js_bundle("/app/index.js", &[], &graph, &options)?;
//! assert_eq!(bundle_to_string(&bundle).code, "__d(function() {},0,[]);\n__r(0);");
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The serializers emit `tracing` events. Enable the `logging` feature for
//! [`logging::init_logging`] when no subscriber is installed elsewhere.

pub mod append_scripts;
pub mod base_bundle;
pub mod define_call;
pub mod error;
pub mod hmr_bundle;
pub mod inverse_deps;
pub mod js;
pub mod options;
pub mod output;
pub mod process;
pub mod source_map;
pub mod urls;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

pub use append_scripts::{AppendScriptsOptions, get_append_scripts};
pub use base_bundle::base_js_bundle;
pub use define_call::add_params_to_define_call;
pub use error::{Result, SerializerError};
pub use hmr_bundle::hmr_js_bundle;
pub use inverse_deps::{InverseDependencies, inverse_dependencies_by_id, resolve_inverse_dependencies};
pub use js::{WrapOptions, is_js_module, wrap_module};
pub use options::{
    HmrOptions, ModulePredicate, RunModuleStatement, SerializerOptions, SourceUrlFn,
    default_run_module_statement,
};
pub use output::{Bundle, BundleMetadata, BundleString, HmrModule, HmrUpdate, bundle_to_string};
pub use process::{FilterFn, ProcessModulesOptions, process_modules};
pub use source_map::{SourceMapOptions, build_source_map, inline_source_map};
pub use urls::{
    ModuleUrlOptions, async_bundle_path, module_url, prefix_with_base_url, relative_path,
    to_jsc_safe_url, to_normal_url,
};
