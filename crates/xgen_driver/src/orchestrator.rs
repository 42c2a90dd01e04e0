//! Dependency-graph traversal and compiler invocation.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use xgen_common::{RuntimeLibrary, TargetDescriptor};
use xgen_deps::DependencyGraph;

use crate::compiler::{CompileRequest, NativeCompiler, SymbolRequest};
use crate::error::DriverError;
use crate::report::{AssetReport, AssetStatus, LibraryReport, RunReport};
use crate::strategy::CrossGenStrategy;

/// What the traversal does when a library's completion step fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Record the error in the report and continue with the next library.
    Continue,
}

/// Drives a native-image compilation pass over a dependency graph.
///
/// For each library the strategy selects, every asset is located in the
/// application directory and compiled once into the directory the strategy
/// chooses; the strategy's completion hook then runs exactly once. Per-asset
/// failures (output directory or compiler) are recorded and never stop the
/// run.
pub struct Orchestrator<C> {
    compiler: C,
    target: TargetDescriptor,
    app_dir: PathBuf,
    generate_symbols: bool,
    on_failure: FailurePolicy,
    parallel: bool,
}

impl<C: NativeCompiler> Orchestrator<C> {
    /// Creates an orchestrator compiling assets found in `app_dir` for `target`.
    pub fn new(compiler: C, target: TargetDescriptor, app_dir: &Path) -> Self {
        Self {
            compiler,
            target,
            app_dir: app_dir.to_path_buf(),
            generate_symbols: false,
            on_failure: FailurePolicy::default(),
            parallel: false,
        }
    }

    /// Emits a debug-symbol file next to every compiled image.
    pub fn with_symbols(mut self, generate_symbols: bool) -> Self {
        self.generate_symbols = generate_symbols;
        self
    }

    /// Sets the completion failure policy.
    pub fn with_failure_policy(mut self, on_failure: FailurePolicy) -> Self {
        self.on_failure = on_failure;
        self
    }

    /// Processes libraries in parallel.
    ///
    /// Assets of one library are still compiled in order, and its completion
    /// hook still runs after all of them.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the compiler.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Returns the compilation target.
    pub fn target(&self) -> &TargetDescriptor {
        &self.target
    }

    /// Runs the pass over `graph`, returning one report entry per library in
    /// graph order.
    pub fn run<S>(&self, graph: &DependencyGraph, strategy: &S) -> Result<RunReport, DriverError>
    where
        S: CrossGenStrategy + ?Sized,
    {
        tracing::info!(
            compile_target = %self.target,
            libraries = graph.libraries().len(),
            "starting native-image compilation"
        );

        let libraries = if self.parallel {
            graph
                .libraries()
                .par_iter()
                .map(|lib| self.process_library(lib, strategy))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            graph
                .libraries()
                .iter()
                .map(|lib| self.process_library(lib, strategy))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(RunReport { libraries })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(library = %lib.id()))]
    fn process_library<S>(
        &self,
        lib: &RuntimeLibrary,
        strategy: &S,
    ) -> Result<LibraryReport, DriverError>
    where
        S: CrossGenStrategy + ?Sized,
    {
        if !strategy.should_process(lib) {
            tracing::debug!("skipped by strategy");
            return Ok(LibraryReport::skipped(&lib.name, &lib.version));
        }

        let mut report = LibraryReport::skipped(&lib.name, &lib.version);
        report.processed = true;
        for asset in &lib.assets {
            report.assets.push(self.process_asset(lib, asset, strategy));
        }

        match strategy.on_complete(lib) {
            Ok(outcome) => report.manifest = outcome,
            Err(e) if self.on_failure == FailurePolicy::Continue => {
                tracing::error!(error = %e, "completion step failed");
                report.cache_error = Some(e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
        Ok(report)
    }

    fn process_asset<S>(
        &self,
        lib: &RuntimeLibrary,
        asset: &str,
        strategy: &S,
    ) -> AssetReport
    where
        S: CrossGenStrategy + ?Sized,
    {
        let report = |status| AssetReport {
            asset: asset.to_string(),
            status,
        };

        let Some(source) = self.locate_source(asset) else {
            tracing::warn!(asset, app_dir = %self.app_dir.display(), "input assembly not found");
            return report(AssetStatus::Missing);
        };
        let Some(file_name) = source.file_name() else {
            return report(AssetStatus::Missing);
        };

        let output_dir = strategy.output_dir_for(&source, lib, asset);
        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            tracing::warn!(
                asset,
                output_dir = %output_dir.display(),
                error = %e,
                "cannot create output directory"
            );
            return report(AssetStatus::Failed {
                message: format!(
                    "failed to create output directory {}: {e}",
                    output_dir.display()
                ),
            });
        }
        let output = output_dir.join(file_name);
        let references = self.reference_dirs();

        let request = CompileRequest {
            input: source.clone(),
            output: output.clone(),
            references: references.clone(),
        };
        if let Err(e) = self.compiler.compile(&request) {
            tracing::warn!(asset, error = %e, "compilation failed");
            return report(AssetStatus::Failed {
                message: e.to_string(),
            });
        }
        tracing::debug!(asset, output = %output.display(), "compiled");

        if self.generate_symbols {
            let request = SymbolRequest {
                image: output.clone(),
                output_dir,
                references,
            };
            if let Err(e) = self.compiler.emit_symbols(&request) {
                tracing::warn!(asset, error = %e, "symbol emission failed");
                return report(AssetStatus::SymbolsFailed {
                    output,
                    message: e.to_string(),
                });
            }
        }

        report(AssetStatus::Compiled { output })
    }

    /// Finds the input file for `asset`: first by file name directly in the
    /// application directory, then at its package-relative path.
    fn locate_source(&self, asset: &str) -> Option<PathBuf> {
        let components: Vec<&str> = asset.split('/').filter(|c| !c.is_empty()).collect();
        let file_name = components.last()?;

        let flat = self.app_dir.join(file_name);
        if flat.is_file() {
            return Some(flat);
        }
        let nested = components
            .iter()
            .fold(self.app_dir.clone(), |dir, c| dir.join(c));
        nested.is_file().then_some(nested)
    }

    /// Reference directories: the application directory, plus the shared
    /// framework for portable targets.
    fn reference_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.app_dir.clone()];
        if let Some(shared) = self.target.shared_framework_dir() {
            dirs.push(shared.to_path_buf());
        }
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilerError;
    use xgen_common::Framework;

    struct NoopCompiler;

    impl NativeCompiler for NoopCompiler {
        fn compile(&self, _request: &CompileRequest) -> Result<(), CompilerError> {
            Ok(())
        }

        fn emit_symbols(&self, _request: &SymbolRequest) -> Result<(), CompilerError> {
            Ok(())
        }
    }

    fn orchestrator(app_dir: &Path, target: TargetDescriptor) -> Orchestrator<NoopCompiler> {
        Orchestrator::new(NoopCompiler, target, app_dir)
    }

    fn self_contained() -> TargetDescriptor {
        TargetDescriptor::self_contained(Framework::new("netcoreapp1.0"), "linux-x64")
    }

    #[test]
    fn locate_prefers_flat_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Foo.dll"), b"il").unwrap();
        std::fs::create_dir_all(dir.path().join("lib/net45")).unwrap();
        std::fs::write(dir.path().join("lib/net45/Foo.dll"), b"il").unwrap();

        let o = orchestrator(dir.path(), self_contained());
        assert_eq!(
            o.locate_source("lib/net45/Foo.dll"),
            Some(dir.path().join("Foo.dll"))
        );
    }

    #[test]
    fn locate_falls_back_to_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("runtimes/unix/lib")).unwrap();
        std::fs::write(dir.path().join("runtimes/unix/lib/Foo.dll"), b"il").unwrap();

        let o = orchestrator(dir.path(), self_contained());
        assert_eq!(
            o.locate_source("runtimes/unix/lib/Foo.dll"),
            Some(dir.path().join("runtimes/unix/lib/Foo.dll"))
        );
    }

    #[test]
    fn locate_missing() {
        let dir = tempfile::tempdir().unwrap();
        let o = orchestrator(dir.path(), self_contained());
        assert!(o.locate_source("lib/net45/Foo.dll").is_none());
        assert!(o.locate_source("").is_none());
    }

    #[test]
    fn references_for_self_contained() {
        let o = orchestrator(Path::new("/app"), self_contained());
        assert_eq!(o.reference_dirs(), vec![PathBuf::from("/app")]);
    }

    #[test]
    fn references_for_portable_include_shared_framework() {
        let target =
            TargetDescriptor::portable(Framework::new("netcoreapp1.0"), "linux-x64", "/shared");
        let o = orchestrator(Path::new("/app"), target);
        assert_eq!(
            o.reference_dirs(),
            vec![PathBuf::from("/app"), PathBuf::from("/shared")]
        );
    }

    #[test]
    fn builder_defaults() {
        let o = orchestrator(Path::new("/app"), self_contained());
        assert!(!o.generate_symbols);
        assert!(!o.parallel);
        assert_eq!(o.on_failure, FailurePolicy::Abort);
        assert_eq!(o.target().rid(), "linux-x64");
    }
}
