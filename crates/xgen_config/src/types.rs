//! Configuration types deserialized from `xgen.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `xgen.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// Native-image compiler executable settings.
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Compilation target (framework, runtime identifier, shared framework).
    #[serde(default)]
    pub target: TargetConfig,
    /// Inputs: dependency-graph snapshot and published application directory.
    #[serde(default)]
    pub input: InputConfig,
    /// Output tree and caching behaviour.
    #[serde(default)]
    pub output: OutputConfig,
    /// Traversal settings.
    #[serde(default)]
    pub run: RunConfig,
}

/// Location of the external native-image compiler.
#[derive(Debug, Default, Deserialize)]
pub struct CompilerConfig {
    /// Path to the compiler executable.
    #[serde(default)]
    pub path: String,
    /// Path to the native symbol reader library used when emitting symbols.
    #[serde(default)]
    pub symbol_reader: Option<String>,
}

/// The compilation target.
///
/// Setting `shared_framework_dir` makes the target portable.
#[derive(Debug, Default, Deserialize)]
pub struct TargetConfig {
    /// Target framework moniker (e.g. `netcoreapp1.0`).
    #[serde(default)]
    pub framework: String,
    /// Runtime identifier (e.g. `linux-x64`).
    #[serde(default)]
    pub rid: String,
    /// Shared framework directory for framework-dependent targets.
    #[serde(default)]
    pub shared_framework_dir: Option<String>,
}

/// Input locations, relative to the project directory unless absolute.
#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    /// Dependency-graph snapshot (JSON).
    #[serde(default)]
    pub graph: String,
    /// Published application directory holding the input assemblies.
    #[serde(default)]
    pub app_dir: String,
}

/// Output tree configuration.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Root of the output tree.
    #[serde(default)]
    pub dir: String,
    /// Output layout strategy.
    #[serde(default)]
    pub mode: OutputMode,
    /// Emit debug-symbol files next to compiled images.
    #[serde(default)]
    pub generate_symbols: bool,
    /// Overwrite a conflicting manifest hash instead of failing.
    #[serde(default)]
    pub overwrite_on_conflict: bool,
}

/// How compiled outputs are laid out.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Shared optimization cache keyed by architecture, name, and version,
    /// with a hash manifest per library (default).
    #[default]
    Cache,
    /// Flat application-local output, no manifests.
    App,
}

/// Traversal configuration.
#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    /// What to do when a library's cache bookkeeping fails.
    #[serde(default)]
    pub on_failure: OnFailure,
    /// Process libraries in parallel.
    #[serde(default)]
    pub parallel: bool,
}

/// Policy applied when a library's completion step fails.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnFailure {
    /// Stop the run at the first failing library (default).
    #[default]
    Abort,
    /// Record the failure and continue with the remaining libraries.
    Continue,
}
