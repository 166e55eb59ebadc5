//! Epilogue scripts appended after the module definitions.
//!
//! Each script is a virtual `js/script/virtual` module so it flows through the
//! same processing as real modules.

use delta_graph::{CreateModuleId, Module, ModuleOutput, OutputKind};

use crate::error::Result;
use crate::js::is_js_module;
use crate::options::{ModulePredicate, RunModuleStatement};
use crate::source_map::{SourceMapOptions, inline_source_map};

pub struct AppendScriptsOptions<'a> {
    pub create_module_id: &'a dyn CreateModuleId,
    pub get_run_module_statement: &'a RunModuleStatement,
    pub run_module: bool,
    pub run_before_main_module: &'a [String],
    pub inline_source_map: bool,
    pub source_map_url: Option<&'a str>,
    pub source_url: Option<&'a str>,
    pub process_module_filter: &'a ModulePredicate,
    pub source_map: SourceMapOptions<'a>,
}

/// Build the run statements and source trailers for a bundle.
///
/// Run statements are emitted for `run_before_main_module` followed by
/// `entry_point`, skipping paths that are not among `modules`.
pub fn get_append_scripts(
    entry_point: &str,
    modules: &[&Module],
    options: &AppendScriptsOptions<'_>,
) -> Result<Vec<Module>> {
    let mut scripts = Vec::new();

    if options.run_module {
        let run_paths = options
            .run_before_main_module
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(entry_point));
        for path in run_paths {
            if modules.iter().any(|module| module.path == path) {
                let id = options.create_module_id.create_module_id(path);
                let code = (options.get_run_module_statement)(id);
                scripts.push(virtual_script(format!("require-{path}"), code));
            }
        }
    }

    let source_mapping_url = if options.inline_source_map {
        let mapped: Vec<&Module> = modules
            .iter()
            .copied()
            .filter(|module| is_js_module(module) && (options.process_module_filter)(*module))
            .collect();
        Some(inline_source_map(&mapped, &options.source_map)?)
    } else {
        options.source_map_url.map(str::to_string)
    };
    if let Some(url) = source_mapping_url {
        scripts.push(virtual_script("source-map", format!("//# sourceMappingURL={url}")));
    }

    if let Some(source_url) = options.source_url {
        scripts.push(virtual_script("source-url", format!("//# sourceURL={source_url}")));
    }

    Ok(scripts)
}

fn virtual_script(path: impl Into<String>, code: String) -> Module {
    Module::builder(path)
        .output(ModuleOutput::new(OutputKind::JsScriptVirtual, code))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::default_run_module_statement;
    use delta_graph::ModuleIdRegistry;
    use std::sync::Arc;

    struct Fixture {
        ids: ModuleIdRegistry,
        run: RunModuleStatement,
        accept: ModulePredicate,
        ignore: ModulePredicate,
        before: Vec<String>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ids: ModuleIdRegistry::new(),
                run: Arc::new(default_run_module_statement),
                accept: Arc::new(|_| true),
                ignore: Arc::new(|_| false),
                before: vec!["/init.js".to_string(), "/missing.js".to_string()],
            }
        }

        fn options(&self) -> AppendScriptsOptions<'_> {
            AppendScriptsOptions {
                create_module_id: &self.ids,
                get_run_module_statement: &self.run,
                run_module: true,
                run_before_main_module: &self.before,
                inline_source_map: false,
                source_map_url: None,
                source_url: None,
                process_module_filter: &self.accept,
                source_map: SourceMapOptions {
                    should_add_to_ignore_list: &self.ignore,
                    get_source_url: None,
                },
            }
        }
    }

    fn modules() -> Vec<Module> {
        vec![
            Module::builder("/entry.js").js_module("__d(e);").build(),
            Module::builder("/init.js").js_module("__d(i);").build(),
        ]
    }

    fn codes(scripts: &[Module]) -> Vec<(&str, &str)> {
        scripts
            .iter()
            .map(|script| (script.path.as_str(), script.output[0].data.code.as_str()))
            .collect()
    }

    #[test]
    fn runs_present_modules_before_entry() {
        let fixture = Fixture::new();
        fixture.ids.create_module_id("/entry.js");
        fixture.ids.create_module_id("/init.js");
        let modules = modules();
        let refs: Vec<&Module> = modules.iter().collect();

        let scripts = get_append_scripts("/entry.js", &refs, &fixture.options()).unwrap();
        assert_eq!(
            codes(&scripts),
            vec![("require-/init.js", "__r(1);"), ("require-/entry.js", "__r(0);")]
        );
        assert!(scripts.iter().all(|s| s.output[0].kind == OutputKind::JsScriptVirtual));
    }

    #[test]
    fn run_module_false_skips_run_statements() {
        let fixture = Fixture::new();
        let modules = modules();
        let refs: Vec<&Module> = modules.iter().collect();
        let options = AppendScriptsOptions {
            run_module: false,
            source_map_url: Some("http://host/index.map"),
            source_url: Some("http://host/index.bundle"),
            ..fixture.options()
        };

        let scripts = get_append_scripts("/entry.js", &refs, &options).unwrap();
        assert_eq!(
            codes(&scripts),
            vec![
                ("source-map", "//# sourceMappingURL=http://host/index.map"),
                ("source-url", "//# sourceURL=http://host/index.bundle"),
            ]
        );
    }

    #[test]
    fn inline_source_map_wins_over_url() {
        let fixture = Fixture::new();
        let modules = modules();
        let refs: Vec<&Module> = modules.iter().collect();
        let options = AppendScriptsOptions {
            run_module: false,
            inline_source_map: true,
            source_map_url: Some("http://host/index.map"),
            ..fixture.options()
        };

        let scripts = get_append_scripts("/entry.js", &refs, &options).unwrap();
        assert_eq!(scripts.len(), 1);
        assert!(
            scripts[0].output[0]
                .data
                .code
                .starts_with("//# sourceMappingURL=data:application/json;charset=utf-8;base64,")
        );
    }
}
