//! Smoke tests for delta-graph.
//!
//! Fast, deterministic checks of the invariants the serializers rely on.

use crate::{CreateModuleId, DeltaResult, Graph, Module, ModuleIdRegistry};

fn module(path: &str) -> Module {
    Module::builder(path).js_module("__d(function() {});").build()
}

#[test]
fn test_registry_covers_every_graph_module() {
    let mut graph = Graph::new();
    for path in ["/entry.js", "/a.js", "/b.js", "/c.js"] {
        graph.add_module(module(path));
    }

    let ids = ModuleIdRegistry::new();
    for module in graph.modules() {
        ids.create_module_id(&module.path);
    }

    for module in graph.modules() {
        assert!(ids.id_of(&module.path).is_ok(), "{} has no id", module.path);
    }
}

#[test]
fn test_ids_survive_graph_rebuilds() {
    let ids = ModuleIdRegistry::new();

    let mut first = Graph::new();
    first.add_module(module("/a.js"));
    first.add_module(module("/b.js"));
    for module in first.modules() {
        ids.create_module_id(&module.path);
    }

    // Same modules, different insertion order.
    let mut second = Graph::new();
    second.add_module(module("/b.js"));
    second.add_module(module("/a.js"));
    for module in second.modules() {
        ids.create_module_id(&module.path);
    }

    assert_eq!(ids.id_of("/a.js").unwrap(), 0);
    assert_eq!(ids.id_of("/b.js").unwrap(), 1);
}

#[test]
fn test_cyclic_edges_are_recorded_both_ways() {
    let mut graph = Graph::new();
    graph.add_module(module("/a.js"));
    graph.add_module(module("/b.js"));
    graph.add_dependency("/a.js", "/b.js").unwrap();
    graph.add_dependency("/b.js", "/a.js").unwrap();

    assert!(graph.get("/a.js").unwrap().inverse_dependencies.contains("/b.js"));
    assert!(graph.get("/b.js").unwrap().inverse_dependencies.contains("/a.js"));
}

#[test]
fn test_delta_preserves_insertion_order() {
    let delta = DeltaResult::new()
        .add(module("/z.js"))
        .add(module("/a.js"))
        .delete("/y.js")
        .delete("/b.js");

    let added: Vec<_> = delta.added.keys().map(String::as_str).collect();
    let deleted: Vec<_> = delta.deleted.iter().map(String::as_str).collect();
    assert_eq!(added, vec!["/z.js", "/a.js"]);
    assert_eq!(deleted, vec!["/y.js", "/b.js"]);
}
