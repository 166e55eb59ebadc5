//! Wrapping compiled module bodies into loadable define calls.

use std::collections::BTreeMap;
use std::path::Path;

use delta_graph::{CreateModuleId, Module, ModuleId};
use serde_json::{Map, Value};

use crate::define_call::add_params_to_define_call;
use crate::error::{Result, SerializerError};
use crate::urls::{async_bundle_path, relative_path};

/// Options for [`wrap_module`].
#[derive(Clone, Copy)]
pub struct WrapOptions<'a> {
    pub create_module_id: &'a dyn CreateModuleId,
    /// Adds the module path relative to `project_root` as a debugging param.
    pub dev: bool,
    pub include_async_paths: bool,
    pub project_root: &'a Path,
    pub server_root: &'a Path,
    /// URL of the bundle being built; required for async paths.
    pub source_url: Option<&'a str>,
}

/// Returns true if the module has JavaScript output and can be wrapped.
pub fn is_js_module(module: &Module) -> bool {
    module.is_js_module()
}

/// Turn a module's compiled output into a loadable definition.
///
/// Scripts are returned verbatim. Modules get their id, dependency map and
/// (in dev) verbose name appended to the `__d(...)` call.
pub fn wrap_module(module: &Module, options: &WrapOptions<'_>) -> Result<String> {
    let output = module
        .js_output()
        .ok_or_else(|| SerializerError::MissingJsOutput {
            path: module.path.clone(),
        })?;

    if output.kind.is_script() {
        return Ok(output.data.code.clone());
    }

    let params = module_params(module, options)?;
    Ok(add_params_to_define_call(&output.data.code, &params))
}

fn module_params(module: &Module, options: &WrapOptions<'_>) -> Result<Vec<Value>> {
    let ids = options.create_module_id;
    let module_id = ids.create_module_id(&module.path);

    let mut paths: BTreeMap<ModuleId, String> = BTreeMap::new();
    let mut dependency_map = Vec::with_capacity(module.dependencies.len());
    for dependency in module.dependencies.values() {
        let Some(absolute_path) = dependency.absolute_path.as_deref() else {
            dependency_map.push(Value::Null);
            continue;
        };

        let id = ids.create_module_id(absolute_path);
        if options.include_async_paths && dependency.is_async() {
            let source_url = options.source_url.ok_or(SerializerError::MissingSourceUrl)?;
            paths.insert(id, async_bundle_path(options.server_root, absolute_path, source_url)?);
        }
        dependency_map.push(Value::from(id));
    }

    let dependency_map = if paths.is_empty() {
        Value::Array(dependency_map)
    } else {
        // Array spread into an object: index keys first, then `paths`.
        let mut object = Map::with_capacity(dependency_map.len() + 1);
        for (index, id) in dependency_map.into_iter().enumerate() {
            object.insert(index.to_string(), id);
        }
        let paths = paths
            .into_iter()
            .map(|(id, path)| (id.to_string(), Value::String(path)))
            .collect();
        object.insert("paths".to_string(), Value::Object(paths));
        Value::Object(object)
    };

    let mut params = vec![Value::from(module_id), dependency_map];
    if options.dev {
        params.push(Value::String(relative_path(
            options.project_root,
            Path::new(&module.path),
        )));
    }
    Ok(params)
}
