//! Property-based tests for the serializers using proptest.

mod helpers;

use std::collections::HashSet;

use delta_config::SerializerConfig;
use delta_graph::{CreateModuleId, Graph};
use delta_serializer::{base_js_bundle, prefix_with_base_url, resolve_inverse_dependencies};
use helpers::{config, js_module, options};
use proptest::prelude::*;

/// Random graph over `m0.js .. m{n-1}.js` with arbitrary (possibly cyclic) edges.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..=12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..=30).prop_map(move |edges| {
            let mut graph = Graph::new();
            for i in 0..n {
                graph.add_module(js_module(&format!("m{i}.js")));
            }
            for (from, to) in edges {
                graph
                    .add_dependency(&format!("/project/m{from}.js"), &format!("/project/m{to}.js"))
                    .unwrap();
            }
            graph
        })
    })
}

/// A graph plus an order in which ids were handed out before bundling.
fn graph_with_id_order() -> impl Strategy<Value = (Graph, Vec<usize>)> {
    graph_strategy().prop_flat_map(|graph| {
        let order = Just((0..graph.len()).collect::<Vec<_>>()).prop_shuffle();
        (Just(graph), order)
    })
}

fn first_path(graph: &Graph) -> String {
    graph.modules().next().map(|m| m.path.clone()).unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: bundle modules are strictly ascending by id, one per module.
    #[test]
    fn prop_bundle_modules_sorted_and_unique((graph, order) in graph_with_id_order()) {
        let (ids, options) = options(config());
        for index in order {
            ids.create_module_id(&format!("/project/m{index}.js"));
        }

        let bundle = base_js_bundle(&first_path(&graph), &[], &graph, &options).unwrap();
        prop_assert_eq!(bundle.modules.len(), graph.len());
        for pair in bundle.modules.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0);
        }
    }

    /// Property: same snapshot and options give byte-identical bundles.
    #[test]
    fn prop_bundle_is_idempotent(graph in graph_strategy()) {
        let entry = first_path(&graph);
        let (_, shared) = options(config());
        let first = base_js_bundle(&entry, &[], &graph, &shared).unwrap();
        let again = base_js_bundle(&entry, &[], &graph, &shared).unwrap();
        prop_assert_eq!(&first, &again);

        let (_, fresh) = options(config());
        let fresh = base_js_bundle(&entry, &[], &graph, &fresh).unwrap();
        prop_assert_eq!(&first, &fresh);
    }

    /// Property: modulesOnly always empties `pre`.
    #[test]
    fn prop_modules_only_empties_pre(graph in graph_strategy(), prelude in "[a-z();]{1,20}") {
        let (_, options) = options(SerializerConfig { modules_only: true, ..config() });
        let pre_modules = vec![delta_graph::Module::builder("/project/__prelude__").js_script(prelude).build()];

        let bundle = base_js_bundle(&first_path(&graph), &pre_modules, &graph, &options).unwrap();
        prop_assert_eq!(bundle.pre, "");
    }

    /// Property: the resolver terminates on cyclic graphs and visits each path once.
    #[test]
    fn prop_resolver_visits_each_path_once(graph in graph_strategy(), start in 0usize..12) {
        let path = format!("/project/m{}.js", start % graph.len());
        let resolved = resolve_inverse_dependencies(&path, &graph);

        prop_assert_eq!(resolved.keys().next().copied(), Some(path.as_str()));
        let unique: HashSet<_> = resolved.keys().collect();
        prop_assert_eq!(unique.len(), resolved.len());
        prop_assert!(resolved.len() <= graph.len());
        for (key, dependents) in &resolved {
            let module = graph.get(key).unwrap();
            prop_assert_eq!(dependents.len(), module.inverse_dependencies.len());
        }
    }

    /// Property: prefixing never produces a double slash at the join.
    #[test]
    fn prop_prefix_joins_with_one_slash(
        base in "https?://[a-z]{1,8}(/[a-z]{1,5}){0,2}/?",
        path in "/?[a-z]{1,5}(/[a-z]{1,5}){0,2}\\.map",
    ) {
        let joined = prefix_with_base_url(Some(&base), &path);
        let base_trimmed = base.trim_end_matches('/');
        let rest = joined.strip_prefix(base_trimmed).unwrap();
        prop_assert!(rest.starts_with('/'));
        prop_assert!(!rest.starts_with("//"));
        prop_assert!(rest.ends_with(path.trim_start_matches('/')));
    }
}
