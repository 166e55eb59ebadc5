//! Command implementations.
//!
//! Each command reads its JSON inputs, runs a serializer and writes the result
//! to the given writer. A fresh id registry is used per invocation.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use delta_config::SerializerConfig;
use delta_graph::{CreateModuleId, DeltaResult, Graph, Module, ModuleIdRegistry};
use delta_serializer::{HmrOptions, SerializerOptions, base_js_bundle, bundle_to_string, hmr_js_bundle};
use serde::de::DeserializeOwned;

use crate::cli::{BundleArgs, HmrArgs};

/// Load config from `config_path`, environment and defaults.
pub fn load_config(config_path: Option<&Path>) -> Result<SerializerConfig> {
    SerializerConfig::load(config_path).context("failed to load serializer config")
}

pub fn bundle_execute(args: BundleArgs, config: SerializerConfig, out: &mut impl Write) -> Result<()> {
    let graph: Graph = read_json(&args.graph)?;
    let entry = match args.entry.clone() {
        Some(entry) => entry,
        None => match graph.entry_points.first() {
            Some(entry) => entry.clone(),
            None => bail!("graph {} has no entry points; pass --entry", args.graph.display()),
        },
    };

    let mut pre_modules = Vec::new();
    for path in &args.pre {
        let modules: Vec<Module> = read_json(path)?;
        pre_modules.extend(modules);
    }

    let config = apply_bundle_flags(config, &args);
    let options = SerializerOptions::new(config, Arc::new(ModuleIdRegistry::new()));
    let bundle = base_js_bundle(&entry, &pre_modules, &graph, &options)
        .with_context(|| format!("failed to serialize bundle for {entry}"))?;

    tracing::info!(entry = %entry, modules = bundle.modules.len(), "bundle ready");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &bundle)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", bundle_to_string(&bundle).code)?;
    }
    Ok(())
}

fn apply_bundle_flags(mut config: SerializerConfig, args: &BundleArgs) -> SerializerConfig {
    if args.modules_only {
        config.modules_only = true;
    }
    if args.no_dev {
        config.dev = false;
    }
    if args.inline_source_map {
        config.inline_source_map = true;
    }
    if !args.run_before_main_module.is_empty() {
        config.run_before_main_module = args.run_before_main_module.clone();
    }
    if let Some(url) = &args.source_map_url {
        config.source_map_url = Some(url.clone());
    }
    if let Some(url) = &args.source_url {
        config.source_url = Some(url.clone());
    }
    config
}

pub fn hmr_execute(args: HmrArgs, mut config: SerializerConfig, out: &mut impl Write) -> Result<()> {
    let graph: Graph = read_json(&args.graph)?;
    let delta: DeltaResult = read_json(&args.delta)?;

    if let Some(client_url) = args.client_url {
        config.client_url = Some(client_url);
    }
    let options = HmrOptions::from_config(&config, seeded_registry(&graph, &delta))
        .context("hot updates need a client URL (--client-url or clientUrl in config)")?;

    let update = hmr_js_bundle(&delta, &graph, &options).context("failed to serialize hot update")?;
    tracing::info!(
        added = update.added.len(),
        modified = update.modified.len(),
        deleted = update.deleted.len(),
        "hot update ready"
    );

    serde_json::to_writer_pretty(&mut *out, &update)?;
    writeln!(out)?;
    Ok(())
}

/// Ids as the previous build of this session would have assigned them: graph
/// modules in graph order, then the paths the delta deletes.
fn seeded_registry(graph: &Graph, delta: &DeltaResult) -> Arc<ModuleIdRegistry> {
    let ids = Arc::new(ModuleIdRegistry::new());
    for module in graph.modules() {
        ids.create_module_id(&module.path);
    }
    for path in &delta.deleted {
        ids.create_module_id(path);
    }
    ids
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
