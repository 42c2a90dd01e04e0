//! Plan resolution: turning a parsed configuration into concrete run inputs.

use std::path::{Path, PathBuf};

use xgen_common::{Framework, TargetDescriptor};

use crate::types::{OnFailure, OutputMode, ProjectConfig};

/// A fully resolved compilation run.
///
/// Relative paths from `xgen.toml` are resolved against the project
/// directory, and the target section is turned into a [`TargetDescriptor`].
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// The compilation target.
    pub target: TargetDescriptor,
    /// Native-image compiler executable.
    pub compiler: PathBuf,
    /// Native symbol reader library, if configured.
    pub symbol_reader: Option<PathBuf>,
    /// Dependency-graph snapshot.
    pub graph: PathBuf,
    /// Published application directory.
    pub app_dir: PathBuf,
    /// Root of the output tree.
    pub output_dir: PathBuf,
    /// Output layout strategy.
    pub mode: OutputMode,
    /// Emit debug-symbol files.
    pub generate_symbols: bool,
    /// Overwrite conflicting manifest hashes.
    pub overwrite_on_conflict: bool,
    /// Failure policy for completion steps.
    pub on_failure: OnFailure,
    /// Process libraries in parallel.
    pub parallel: bool,
}

/// Resolves a validated configuration into a [`RunPlan`].
///
/// A configured `shared_framework_dir` produces a portable target; otherwise
/// the target is self-contained.
pub fn resolve_plan(config: &ProjectConfig, project_dir: &Path) -> RunPlan {
    let framework = Framework::new(config.target.framework.as_str());
    let target = match &config.target.shared_framework_dir {
        Some(dir) => TargetDescriptor::portable(
            framework,
            config.target.rid.as_str(),
            resolve_path(project_dir, dir),
        ),
        None => TargetDescriptor::self_contained(framework, config.target.rid.as_str()),
    };

    RunPlan {
        target,
        compiler: resolve_path(project_dir, &config.compiler.path),
        symbol_reader: config
            .compiler
            .symbol_reader
            .as_deref()
            .map(|p| resolve_path(project_dir, p)),
        graph: resolve_path(project_dir, &config.input.graph),
        app_dir: resolve_path(project_dir, &config.input.app_dir),
        output_dir: resolve_path(project_dir, &config.output.dir),
        mode: config.output.mode,
        generate_symbols: config.output.generate_symbols,
        overwrite_on_conflict: config.output.overwrite_on_conflict,
        on_failure: config.run.on_failure,
        parallel: config.run.parallel,
    }
}

fn resolve_path(project_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
