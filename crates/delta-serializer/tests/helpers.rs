//! Shared graph fixtures for delta-serializer tests.

#![allow(dead_code)]

use std::sync::Arc;

use delta_config::SerializerConfig;
use delta_graph::{Graph, Module, ModuleIdRegistry};
use delta_serializer::SerializerOptions;

pub const PROJECT_ROOT: &str = "/project";

/// A module at `/project/<name>` with a bare define call.
pub fn js_module(name: &str) -> Module {
    Module::builder(format!("{PROJECT_ROOT}/{name}"))
        .js_module("__d(function() {});")
        .build()
}

/// Build a graph from module names and `(from, to)` edges.
pub fn graph(names: &[&str], edges: &[(&str, &str)]) -> Graph {
    let mut graph = Graph::new();
    for name in names {
        graph.add_module(js_module(name));
    }
    for (from, to) in edges {
        graph
            .add_dependency(&project_path(from), &project_path(to))
            .unwrap();
    }
    graph
}

pub fn project_path(name: &str) -> String {
    format!("{PROJECT_ROOT}/{name}")
}

/// Production-style config rooted at [`PROJECT_ROOT`].
pub fn config() -> SerializerConfig {
    SerializerConfig {
        dev: false,
        project_root: PROJECT_ROOT.into(),
        ..SerializerConfig::default()
    }
}

pub fn options(config: SerializerConfig) -> (Arc<ModuleIdRegistry>, SerializerOptions) {
    let ids = Arc::new(ModuleIdRegistry::new());
    let options = SerializerOptions::new(config, ids.clone());
    (ids, options)
}
