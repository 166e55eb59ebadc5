//! Full-bundle assembly.

use delta_graph::{CreateModuleId, Graph, Module, ModuleId};
use tracing::debug;

use crate::append_scripts::{AppendScriptsOptions, get_append_scripts};
use crate::error::{Result, SerializerError};
use crate::options::SerializerOptions;
use crate::output::Bundle;
use crate::process::{join_code, process_modules};
use crate::source_map::SourceMapOptions;
use crate::urls::prefix_with_base_url;

/// Serialize `graph` into a [`Bundle`].
///
/// Every graph module gets an id before anything is ordered. `pre` holds the
/// processed `pre_modules` (none when `modulesOnly`), `modules` holds every
/// processable graph module sorted by id, and `post` holds the run statements
/// and source trailers.
#[tracing::instrument(skip_all, fields(entry_point = %entry_point, graph_modules = graph.len()))]
pub fn base_js_bundle(
    entry_point: &str,
    pre_modules: &[Module],
    graph: &Graph,
    options: &SerializerOptions,
) -> Result<Bundle> {
    let ids = options.create_module_id.as_ref();
    for module in graph.modules() {
        ids.create_module_id(&module.path);
    }

    let config = &options.config;
    let process_options = options.process_modules_options();

    let pre_modules: &[Module] = if config.modules_only { &[] } else { pre_modules };
    let pre = join_code(process_modules(pre_modules, &process_options)?);

    let sorted = sort_by_id(graph, ids)?;

    let source_map_url = config
        .source_map_url
        .as_deref()
        .map(|url| prefix_with_base_url(config.base_url.as_deref(), url));

    let all_modules: Vec<&Module> = pre_modules.iter().chain(sorted.iter().copied()).collect();
    let append_scripts = get_append_scripts(
        entry_point,
        &all_modules,
        &AppendScriptsOptions {
            create_module_id: ids,
            get_run_module_statement: &options.get_run_module_statement,
            run_module: config.run_module,
            run_before_main_module: &config.run_before_main_module,
            inline_source_map: config.inline_source_map,
            source_map_url: source_map_url.as_deref(),
            source_url: config.source_url.as_deref(),
            process_module_filter: &options.process_module_filter,
            source_map: SourceMapOptions {
                should_add_to_ignore_list: &options.should_add_to_ignore_list,
                get_source_url: options.get_source_url.as_ref(),
            },
        },
    )?;
    let post = join_code(process_modules(&append_scripts, &process_options)?);

    let modules = process_modules(sorted.iter().copied(), &process_options)?
        .into_iter()
        .map(|(module, code)| Ok((ids.id_of(&module.path)?, code)))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        pre_bytes = pre.len(),
        post_bytes = post.len(),
        modules = modules.len(),
        "assembled bundle"
    );

    Ok(Bundle { pre, post, modules })
}

/// Graph modules in ascending id order.
///
/// Fails if a module has no id or if two modules share one.
fn sort_by_id<'g>(graph: &'g Graph, ids: &dyn CreateModuleId) -> Result<Vec<&'g Module>> {
    let mut keyed = graph
        .modules()
        .map(|module| Ok((ids.id_of(&module.path)?, module)))
        .collect::<Result<Vec<(ModuleId, &Module)>>>()?;
    keyed.sort_by_key(|(id, _)| *id);

    if let Some(pair) = keyed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(SerializerError::DuplicateModuleId {
            id: pair[0].0,
            first: pair[0].1.path.clone(),
            second: pair[1].1.path.clone(),
        });
    }

    Ok(keyed.into_iter().map(|(_, module)| module).collect())
}
