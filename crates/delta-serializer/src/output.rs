//! Output records and bundle stringification.

use delta_graph::ModuleId;
use serde::{Deserialize, Serialize};

/// A full bundle: prelude, module definitions sorted by id, epilogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub pre: String,
    pub post: String,
    pub modules: Vec<(ModuleId, String)>,
}

/// One added or modified module in a hot update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmrModule {
    pub module: (ModuleId, String),
    #[serde(rename = "sourceMappingURL")]
    pub source_mapping_url: String,
    #[serde(rename = "sourceURL")]
    pub source_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmrUpdate {
    pub added: Vec<HmrModule>,
    pub modified: Vec<HmrModule>,
    pub deleted: Vec<ModuleId>,
}

impl HmrUpdate {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }
}

/// Lengths of each bundle section, in UTF-16 code units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub pre: usize,
    pub post: usize,
    pub modules: Vec<(ModuleId, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleString {
    pub code: String,
    pub metadata: BundleMetadata,
}

/// Concatenate a bundle into executable code.
///
/// Sections are newline-terminated; empty module bodies are skipped but still
/// listed in the metadata. The final newline is dropped when `post` is empty.
pub fn bundle_to_string(bundle: &Bundle) -> BundleString {
    let mut code = String::new();
    if !bundle.pre.is_empty() {
        code.push_str(&bundle.pre);
        code.push('\n');
    }

    let mut sorted: Vec<&(ModuleId, String)> = bundle.modules.iter().collect();
    sorted.sort_by_key(|(id, _)| *id);

    let mut modules = Vec::with_capacity(sorted.len());
    for (id, module_code) in sorted {
        if !module_code.is_empty() {
            code.push_str(module_code);
            code.push('\n');
        }
        modules.push((*id, utf16_len(module_code)));
    }

    if bundle.post.is_empty() {
        code.pop();
    } else {
        code.push_str(&bundle.post);
    }

    BundleString {
        code,
        metadata: BundleMetadata {
            pre: utf16_len(&bundle.pre),
            post: utf16_len(&bundle.post),
            modules,
        },
    }
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
