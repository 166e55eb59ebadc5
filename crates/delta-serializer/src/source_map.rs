//! Inline source maps for whole bundles.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use delta_graph::{MappingSegment, Module};
use sourcemap::SourceMapBuilder;

use crate::error::Result;
use crate::options::{ModulePredicate, SourceUrlFn};

const DATA_URL_PREFIX: &str = "data:application/json;charset=utf-8;base64,";

/// Source indices debuggers should skip, in the key Chrome DevTools reads.
const IGNORE_LIST_KEY: &str = "x_google_ignoreList";

pub struct SourceMapOptions<'a> {
    pub should_add_to_ignore_list: &'a ModulePredicate,
    pub get_source_url: Option<&'a SourceUrlFn>,
}

/// Build a source map covering `modules` laid out back to back.
///
/// Each module starts on the line after the previous one ends, at the offset
/// given by its output's `line_count`. Returns the serialized JSON.
pub fn build_source_map(modules: &[&Module], options: &SourceMapOptions<'_>) -> Result<String> {
    let mut builder = SourceMapBuilder::new(None);
    let mut line_offset: u32 = 0;
    let mut ignore_list: Vec<u32> = Vec::new();

    for module in modules {
        let Some(output) = module.js_output() else {
            continue;
        };

        let source_url = match options.get_source_url {
            Some(get_source_url) => get_source_url(module),
            None => module.path.clone(),
        };
        let source_id = builder.add_source(&source_url);
        builder.set_source_contents(source_id, Some(&module.source));
        if (options.should_add_to_ignore_list)(module) {
            ignore_list.push(source_id);
        }

        for segment in &output.data.map {
            match segment {
                MappingSegment::Generated(line, column) => {
                    builder.add_raw(line_offset + line.saturating_sub(1), *column, 0, 0, None, None, false);
                }
                MappingSegment::Original(line, column, original_line, original_column) => {
                    builder.add_raw(
                        line_offset + line.saturating_sub(1),
                        *column,
                        original_line.saturating_sub(1),
                        *original_column,
                        Some(source_id),
                        None,
                        false,
                    );
                }
                MappingSegment::Named(line, column, original_line, original_column, name) => {
                    let name_id = builder.add_name(name);
                    builder.add_raw(
                        line_offset + line.saturating_sub(1),
                        *column,
                        original_line.saturating_sub(1),
                        *original_column,
                        Some(source_id),
                        Some(name_id),
                        false,
                    );
                }
            }
        }

        line_offset += u32::try_from(output.data.line_count).unwrap_or(u32::MAX);
    }

    let mut bytes = Vec::new();
    builder.into_sourcemap().to_writer(&mut bytes)?;

    let mut map: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(&bytes)?;
    if !ignore_list.is_empty() {
        map.insert(IGNORE_LIST_KEY.to_string(), serde_json::Value::from(ignore_list));
    }
    Ok(serde_json::to_string(&map)?)
}

/// Base64 data URL embedding the source map of `modules`.
pub fn inline_source_map(modules: &[&Module], options: &SourceMapOptions<'_>) -> Result<String> {
    let json = build_source_map(modules, options)?;
    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(json)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use delta_graph::{ModuleOutput, OutputKind};
    use std::sync::Arc;

    fn mapped(path: &str, code: &str, map: Vec<MappingSegment>) -> Module {
        Module::builder(path)
            .output(ModuleOutput::new(OutputKind::JsModule, code).with_map(map))
            .source(format!("// source of {path}"))
            .build()
    }

    fn decode(json: &str) -> sourcemap::SourceMap {
        sourcemap::SourceMap::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn offsets_modules_by_line_count() {
        let a = mapped("/a.js", "line1\nline2", vec![MappingSegment::Original(1, 0, 1, 0)]);
        let b = mapped("/b.js", "only", vec![MappingSegment::Named(1, 4, 3, 2, "foo".into())]);
        let ignore: ModulePredicate = Arc::new(|_| false);
        let options = SourceMapOptions {
            should_add_to_ignore_list: &ignore,
            get_source_url: None,
        };

        let map = decode(&build_source_map(&[&a, &b], &options).unwrap());
        assert_eq!(map.get_source(0), Some("/a.js"));
        assert_eq!(map.get_source(1), Some("/b.js"));

        let token = map.lookup_token(2, 4).unwrap();
        assert_eq!(token.get_source(), Some("/b.js"));
        assert_eq!(token.get_src_line(), 2);
        assert_eq!(token.get_name(), Some("foo"));
    }

    #[test]
    fn custom_source_url_and_contents() {
        let a = mapped("/project/a.js", "x", vec![MappingSegment::Original(1, 0, 1, 0)]);
        let ignore: ModulePredicate = Arc::new(|_| false);
        let source_url: SourceUrlFn = Arc::new(|module| format!("app://{}", module.path));
        let options = SourceMapOptions {
            should_add_to_ignore_list: &ignore,
            get_source_url: Some(&source_url),
        };

        let map = decode(&build_source_map(&[&a], &options).unwrap());
        assert_eq!(map.get_source(0), Some("app:///project/a.js"));
        assert_eq!(map.get_source_contents(0), Some("// source of /project/a.js"));
    }

    #[test]
    fn ignore_listed_modules_are_recorded() {
        let a = mapped("/a.js", "x", vec![]);
        let vendor = mapped("/node_modules/v.js", "y", vec![]);
        let ignore: ModulePredicate = Arc::new(|module| module.path.contains("node_modules"));
        let options = SourceMapOptions {
            should_add_to_ignore_list: &ignore,
            get_source_url: None,
        };

        let json = build_source_map(&[&a, &vendor], &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["x_google_ignoreList"], serde_json::json!([1]));
        assert_eq!(value["sources"], serde_json::json!(["/a.js", "/node_modules/v.js"]));
    }

    #[test]
    fn no_ignore_list_key_when_nothing_is_ignored() {
        let a = mapped("/a.js", "x", vec![]);
        let ignore: ModulePredicate = Arc::new(|_| false);
        let options = SourceMapOptions {
            should_add_to_ignore_list: &ignore,
            get_source_url: None,
        };

        let json = build_source_map(&[&a], &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("x_google_ignoreList").is_none());
    }

    #[test]
    fn inline_map_is_a_base64_data_url() {
        let a = mapped("/a.js", "x", vec![]);
        let ignore: ModulePredicate = Arc::new(|_| false);
        let options = SourceMapOptions {
            should_add_to_ignore_list: &ignore,
            get_source_url: None,
        };

        let url = inline_source_map(&[&a], &options).unwrap();
        let encoded = url.strip_prefix(DATA_URL_PREFIX).unwrap();
        let json = STANDARD.decode(encoded).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["version"], 3);
        assert_eq!(value["sources"], serde_json::json!(["/a.js"]));
    }
}
