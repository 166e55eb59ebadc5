//! The module code processor shared by both output shapes.

use delta_graph::Module;

use crate::error::Result;
use crate::js::{WrapOptions, is_js_module, wrap_module};

/// Module predicate, e.g. the user's `processModuleFilter`.
pub type FilterFn = dyn Fn(&Module) -> bool + Send + Sync;

#[derive(Clone, Copy)]
pub struct ProcessModulesOptions<'a> {
    pub filter: &'a FilterFn,
    pub wrap: WrapOptions<'a>,
}

/// Filter and wrap `modules`, keeping their relative order.
///
/// Non-JavaScript modules are dropped before the user filter runs.
pub fn process_modules<'m, I>(modules: I, options: &ProcessModulesOptions<'_>) -> Result<Vec<(&'m Module, String)>>
where
    I: IntoIterator<Item = &'m Module>,
{
    modules
        .into_iter()
        .filter(|module| is_js_module(module) && (options.filter)(module))
        .map(|module| {
            tracing::trace!(path = %module.path, "wrapping module");
            Ok((module, wrap_module(module, &options.wrap)?))
        })
        .collect()
}

/// Join the code of processed modules with single newlines.
pub(crate) fn join_code(processed: Vec<(&Module, String)>) -> String {
    processed
        .into_iter()
        .map(|(_, code)| code)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use delta_graph::{ModuleIdRegistry, ModuleOutput, OutputKind};
    use std::path::Path;

    fn wrap_options(ids: &ModuleIdRegistry) -> WrapOptions<'_> {
        WrapOptions {
            create_module_id: ids,
            dev: false,
            include_async_paths: false,
            project_root: Path::new("/"),
            server_root: Path::new("/"),
            source_url: None,
        }
    }

    #[test]
    fn keeps_input_order_and_applies_filter() {
        let ids = ModuleIdRegistry::new();
        let modules = vec![
            Module::builder("/c.js").js_module("__d(c);").build(),
            Module::builder("/skip.js").js_module("__d(s);").build(),
            Module::builder("/img.png")
                .output(ModuleOutput::new(OutputKind::Other("asset".into()), ""))
                .build(),
            Module::builder("/a.js").js_module("__d(a);").build(),
        ];
        let filter = |module: &Module| module.path != "/skip.js";
        let options = ProcessModulesOptions {
            filter: &filter,
            wrap: wrap_options(&ids),
        };

        let processed = process_modules(&modules, &options).unwrap();
        let paths: Vec<_> = processed.iter().map(|(m, _)| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/c.js", "/a.js"]);
        assert_eq!(processed[0].1, "__d(c,0,[]);");
        assert_eq!(processed[1].1, "__d(a,1,[]);");
    }

    #[test]
    fn join_code_uses_single_newlines() {
        let ids = ModuleIdRegistry::new();
        let modules = vec![
            Module::builder("/p1.js").js_script("one();").build(),
            Module::builder("/p2.js").js_script("two();").build(),
        ];
        let accept = |_: &Module| true;
        let options = ProcessModulesOptions {
            filter: &accept,
            wrap: wrap_options(&ids),
        };

        let code = join_code(process_modules(&modules, &options).unwrap());
        assert_eq!(code, "one();\ntwo();");
        assert_eq!(join_code(Vec::new()), "");
    }
}
