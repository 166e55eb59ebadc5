use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A single compiled unit in the graph, identified by its absolute path.
///
/// Modules are owned by the [`Graph`](crate::Graph). The serializer only reads
/// them: `output` is produced by the transform pipeline and
/// `inverse_dependencies` is maintained by whoever mutates the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub path: String,
    /// Dependencies keyed by the specifier used in the source, in import order.
    #[serde(default)]
    pub dependencies: IndexMap<String, Dependency>,
    /// Paths of the modules that import this one.
    #[serde(default)]
    pub inverse_dependencies: IndexSet<String>,
    #[serde(default)]
    pub output: Vec<ModuleOutput>,
    /// Original source text, used for `sourcesContent` in inline source maps.
    #[serde(default)]
    pub source: String,
}

impl Module {
    /// Create a new module builder with sensible defaults.
    pub fn builder(path: impl Into<String>) -> ModuleBuilder {
        ModuleBuilder {
            module: Self {
                path: path.into(),
                dependencies: IndexMap::new(),
                inverse_dependencies: IndexSet::new(),
                output: Vec::new(),
                source: String::new(),
            },
        }
    }

    /// Returns true if any output of this module is JavaScript.
    ///
    /// Non-code assets (images, fonts) carry other output kinds and are never
    /// wrapped or sent as hot updates.
    pub fn is_js_module(&self) -> bool {
        self.output.iter().any(|output| output.kind.is_js())
    }

    /// The JavaScript output of this module, if any.
    pub fn js_output(&self) -> Option<&ModuleOutput> {
        self.output.iter().find(|output| output.kind.is_js())
    }
}

/// Builder for `Module` to avoid long argument lists in constructors.
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn dependency(mut self, name: impl Into<String>, dependency: Dependency) -> Self {
        self.module.dependencies.insert(name.into(), dependency);
        self
    }

    pub fn output(mut self, output: ModuleOutput) -> Self {
        self.module.output.push(output);
        self
    }

    /// Shorthand for a single `js/module` output.
    pub fn js_module(self, code: impl Into<String>) -> Self {
        self.output(ModuleOutput::new(OutputKind::JsModule, code))
    }

    /// Shorthand for a single `js/script` output (polyfills, prelude).
    pub fn js_script(self, code: impl Into<String>) -> Self {
        self.output(ModuleOutput::new(OutputKind::JsScript, code))
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.module.source = source.into();
        self
    }

    pub fn build(self) -> Module {
        self.module
    }
}

/// An edge from a module to something it imports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Resolved path of the imported module. `None` for optional dependencies
    /// that failed to resolve.
    #[serde(default)]
    pub absolute_path: Option<String>,
    #[serde(default)]
    pub async_type: Option<AsyncType>,
}

impl Dependency {
    pub fn resolved(path: impl Into<String>) -> Self {
        Self {
            absolute_path: Some(path.into()),
            async_type: None,
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_async_type(mut self, async_type: AsyncType) -> Self {
        self.async_type = Some(async_type);
        self
    }

    pub fn is_async(&self) -> bool {
        self.async_type.is_some()
    }
}

/// How a dependency is loaded when it is not a plain synchronous import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncType {
    Async,
    Prefetch,
    Weak,
}

/// One output of the transform pipeline for a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOutput {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    pub data: OutputData,
}

impl ModuleOutput {
    pub fn new(kind: OutputKind, code: impl Into<String>) -> Self {
        let code = code.into();
        let line_count = count_lines(&code);
        Self {
            kind,
            data: OutputData {
                code,
                line_count,
                map: Vec::new(),
            },
        }
    }

    pub fn with_map(mut self, map: Vec<MappingSegment>) -> Self {
        self.data.map = map;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputData {
    pub code: String,
    pub line_count: usize,
    /// Raw mappings from generated to original positions.
    #[serde(default)]
    pub map: Vec<MappingSegment>,
}

/// A raw source map segment as emitted by the transformer.
///
/// Lines are 1-based and columns 0-based, matching the transformer's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingSegment {
    /// `[generatedLine, generatedColumn]`
    Generated(u32, u32),
    /// `[generatedLine, generatedColumn, originalLine, originalColumn]`
    Original(u32, u32, u32, u32),
    /// `[generatedLine, generatedColumn, originalLine, originalColumn, name]`
    Named(u32, u32, u32, u32, String),
}

/// Output kind tag, serialized as the transformer's `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputKind {
    /// `js/module`
    JsModule,
    /// `js/script`
    JsScript,
    /// `js/script/virtual`
    JsScriptVirtual,
    /// `js/module/asset`
    JsModuleAsset,
    /// Anything else, e.g. `asset` or `css`.
    Other(String),
}

impl OutputKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::JsModule => "js/module",
            Self::JsScript => "js/script",
            Self::JsScriptVirtual => "js/script/virtual",
            Self::JsModuleAsset => "js/module/asset",
            Self::Other(kind) => kind,
        }
    }

    /// Returns true for every `js/*` kind.
    pub fn is_js(&self) -> bool {
        self.as_str().starts_with("js/")
    }

    /// Scripts run as-is and are never wrapped in a define call.
    pub fn is_script(&self) -> bool {
        self.as_str().starts_with("js/script")
    }
}

impl From<String> for OutputKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "js/module" => Self::JsModule,
            "js/script" => Self::JsScript,
            "js/script/virtual" => Self::JsScriptVirtual,
            "js/module/asset" => Self::JsModuleAsset,
            _ => Self::Other(kind),
        }
    }
}

impl From<OutputKind> for String {
    fn from(kind: OutputKind) -> Self {
        match kind {
            OutputKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// Count lines the way JavaScript engines do (`\r\n`, `\r`, `\n`, U+2028, U+2029).
pub fn count_lines(code: &str) -> usize {
    let mut lines = 1;
    let mut chars = code.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines += 1;
            }
            '\n' | '\u{2028}' | '\u{2029}' => lines += 1,
            _ => {}
        }
    }
    lines
}
