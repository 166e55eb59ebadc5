//! URL composition for source maps, source URLs and split bundles.
//!
//! Everything here is a pure function of its inputs: no clock, no I/O.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::{Position, Url};

use crate::error::Result;

/// Query parameter stripped from per-module URLs.
const EXCLUDE_SOURCE_PARAM: &str = "excludeSource";

/// Characters escaped in URL paths. `/` and `.` pass through so `..`
/// segments survive.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Marker that replaces `?` in JSC-safe URLs.
const JSC_QUERY_MARKER: &str = "//&";

/// Join `url` onto `base_url` with exactly one slash between them.
///
/// One trailing slash is removed from the base and one leading slash from the
/// URL. An unset or empty base returns `url` unchanged.
pub fn prefix_with_base_url(base_url: Option<&str>, url: &str) -> String {
    match base_url {
        Some(base) if !base.is_empty() => {
            let base = base.strip_suffix('/').unwrap_or(base);
            let url = url.strip_prefix('/').unwrap_or(url);
            format!("{base}/{url}")
        }
        _ => url.to_string(),
    }
}

/// `path` relative to `root`, with forward slashes.
///
/// Falls back to `path` itself when no relative form exists (e.g. a relative
/// path against an absolute root).
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    to_slash(&relative)
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// A sibling of `module_path` sharing its base name, with `extension`.
fn sibling_with_extension(module_path: &str, extension: &str) -> PathBuf {
    Path::new(module_path).with_extension(extension)
}

/// Inputs for [`module_url`].
#[derive(Debug, Clone, Copy)]
pub struct ModuleUrlOptions<'a> {
    /// URL of the client's entry bundle. Scheme, host and query are reused.
    pub client_url: &'a Url,
    /// Root that the module path is made relative to.
    pub root: &'a Path,
    pub base_url: Option<&'a str>,
}

/// URL of a resource next to `module_path` (e.g. its `.map` or `.bundle`).
///
/// The path is the module's sibling file relative to `root`, `..` segments
/// included; the query comes from the client URL minus `excludeSource`, with
/// the remaining pairs kept as the client encoded them. With a base URL the
/// resulting path and query are joined onto it instead of the client's origin.
pub fn module_url(module_path: &str, extension: &str, options: &ModuleUrlOptions<'_>) -> String {
    let relative = relative_path(options.root, &sibling_with_extension(module_path, extension));
    let relative = relative.strip_prefix('/').unwrap_or(&relative);

    let mut path_and_query = format!("/{}", utf8_percent_encode(relative, PATH));
    let query = options.client_url.query().map(without_exclude_source).unwrap_or_default();
    if !query.is_empty() {
        path_and_query.push('?');
        path_and_query.push_str(&query);
    }
    if let Some(fragment) = options.client_url.fragment() {
        path_and_query.push('#');
        path_and_query.push_str(fragment);
    }

    match options.base_url {
        Some(base) if !base.is_empty() => prefix_with_base_url(Some(base), &path_and_query),
        _ => format!("{}{path_and_query}", &options.client_url[..Position::BeforePath]),
    }
}

/// `query` without its `excludeSource` pairs. Other pairs are untouched.
fn without_exclude_source(query: &str) -> String {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            url::form_urlencoded::parse(pair.as_bytes())
                .next()
                .is_none_or(|(key, _)| key != EXCLUDE_SOURCE_PARAM)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Rewrite the query delimiter `?` to `//&` so engines that strip query
/// strings from source URLs keep the parameters. URLs without a query are
/// returned unchanged.
pub fn to_jsc_safe_url(url: &str) -> String {
    let (without_hash, hash) = match url.find('#') {
        Some(index) => url.split_at(index),
        None => (url, ""),
    };

    match without_hash.find('?') {
        Some(index) => format!(
            "{}{}{}{}",
            &without_hash[..index],
            JSC_QUERY_MARKER,
            &without_hash[index + 1..],
            hash
        ),
        None => url.to_string(),
    }
}

/// Inverse of [`to_jsc_safe_url`].
pub fn to_normal_url(url: &str) -> String {
    match url.find(JSC_QUERY_MARKER) {
        Some(index) if !url[..index].contains('?') => format!(
            "{}?{}",
            &url[..index],
            &url[index + JSC_QUERY_MARKER.len()..]
        ),
        _ => url.to_string(),
    }
}

/// Server-relative URL of the split bundle for an async dependency.
///
/// Parameters are carried over from the main bundle's URL, with
/// `modulesOnly=true` and `runModule=false` forced.
pub fn async_bundle_path(server_root: &Path, dependency_path: &str, source_url: &str) -> Result<String> {
    let source_url = Url::parse(&to_normal_url(source_url))?;

    let mut pairs: Vec<(String, String)> = source_url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    set_param(&mut pairs, "modulesOnly", "true");
    set_param(&mut pairs, "runModule", "false");

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    let bundle_path = relative_path(server_root, &sibling_with_extension(dependency_path, "bundle"));

    Ok(format!("/{bundle_path}?{query}"))
}

// URLSearchParams.set: replace the first occurrence, drop the rest, or append.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || index == first;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}
