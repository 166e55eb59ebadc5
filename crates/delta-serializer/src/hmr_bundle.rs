//! Hot-update assembly.

use delta_graph::{DeltaResult, Graph, Module};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::define_call::add_params_to_define_call;
use crate::error::Result;
use crate::inverse_deps::{inverse_dependencies_by_id, resolve_inverse_dependencies};
use crate::js::{WrapOptions, is_js_module, wrap_module};
use crate::options::HmrOptions;
use crate::output::{HmrModule, HmrUpdate};
use crate::urls::{ModuleUrlOptions, module_url, to_jsc_safe_url};

/// Serialize a graph delta into an [`HmrUpdate`].
///
/// Added and modified modules are wrapped in development mode and carry the
/// inverse dependencies a client needs to re-run dependents. Deleted paths are
/// sent as the ids they were assigned; a deleted path with no id is an error.
/// Output order follows the delta's order.
#[tracing::instrument(
    skip_all,
    fields(
        added = delta.added.len(),
        modified = delta.modified.len(),
        deleted = delta.deleted.len(),
    )
)]
pub fn hmr_js_bundle(delta: &DeltaResult, graph: &Graph, options: &HmrOptions) -> Result<HmrUpdate> {
    if !delta.is_partitioned() {
        warn!(
            paths = ?delta.overlapping_paths(),
            "delta lists a path in more than one of added, modified, deleted"
        );
    }

    let update = HmrUpdate {
        added: generate_modules(delta.added.values(), graph, options)?,
        modified: generate_modules(delta.modified.values(), graph, options)?,
        deleted: delta
            .deleted
            .iter()
            .map(|path| options.create_module_id.id_of(path))
            .collect::<std::result::Result<_, _>>()?,
    };

    debug!(
        added = update.added.len(),
        modified = update.modified.len(),
        deleted = update.deleted.len(),
        "assembled hot update"
    );

    Ok(update)
}

fn generate_modules<'m>(
    modules: impl Iterator<Item = &'m Module>,
    graph: &Graph,
    options: &HmrOptions,
) -> Result<Vec<HmrModule>> {
    let url_options = ModuleUrlOptions {
        client_url: &options.client_url,
        root: options.url_root(),
        base_url: options.base_url.as_deref(),
    };

    modules
        .filter(|module| is_js_module(module))
        .map(|module| {
            trace!(path = %module.path, "preparing hot module");
            let source_mapping_url = module_url(&module.path, "map", &url_options);
            let source_url = to_jsc_safe_url(&module_url(&module.path, "bundle", &url_options));
            let code = format!(
                "{}\n//# sourceMappingURL={source_mapping_url}\n//# sourceURL={source_url}\n",
                prepare_module(module, graph, options)?
            );

            Ok(HmrModule {
                module: (options.create_module_id.create_module_id(&module.path), code),
                source_mapping_url,
                source_url,
            })
        })
        .collect()
}

/// Wrap `module` for hot replacement and attach its inverse-dependency map.
fn prepare_module(module: &Module, graph: &Graph, options: &HmrOptions) -> Result<String> {
    let ids = options.create_module_id.as_ref();
    let code = wrap_module(
        module,
        &WrapOptions {
            create_module_id: ids,
            dev: true,
            include_async_paths: options.include_async_paths,
            project_root: &options.project_root,
            server_root: options.url_root(),
            source_url: Some(options.client_url.as_str()),
        },
    )?;

    let inverse = resolve_inverse_dependencies(&module.path, graph);
    let by_id: Map<String, Value> = inverse_dependencies_by_id(&inverse, ids)
        .into_iter()
        .map(|(id, dependents)| (id.to_string(), Value::from(dependents)))
        .collect();

    Ok(add_params_to_define_call(&code, &[Value::Object(by_id)]))
}
