//! `xgen compile` — native-image compilation of a dependency graph.
//!
//! 1. Find project root and load `xgen.toml`
//! 2. Apply command-line overrides to the run plan
//! 3. Load the dependency-graph snapshot
//! 4. Run the orchestrator with the cache or app-local strategy
//! 5. Render the run report

use std::path::PathBuf;

use xgen_cache::ManifestOutcome;
use xgen_config::{OnFailure, OutputMode, RunPlan};
use xgen_driver::{
    AppLocalStrategy, AssetStatus, ExternalCompiler, FailurePolicy, LibraryReport,
    OptimizationCacheStrategy, Orchestrator, RunReport,
};

use crate::project::{load_graph, load_plan};
use crate::{CliOutputMode, CompileArgs, GlobalArgs, ReportFormat};

/// Runs the `xgen compile` command.
///
/// Returns exit code 0 if every asset compiled and every manifest reconciled,
/// 1 otherwise.
pub fn run(args: &CompileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut plan = load_plan(global)?;
    apply_overrides(&mut plan, args);
    tracing::debug!(?plan, "resolved run plan");

    let graph = load_graph(&plan)?;

    if !global.quiet {
        eprintln!(
            "   Compiling {} libraries ({} serviceable) for {}",
            graph.libraries().len(),
            graph.serviceable_count(),
            plan.target
        );
        eprintln!("      Output {}", plan.output_dir.display());
    }

    let compiler = ExternalCompiler::new(&plan.compiler).with_symbol_reader(plan.symbol_reader.clone());
    let orchestrator = Orchestrator::new(compiler, plan.target.clone(), &plan.app_dir)
        .with_symbols(plan.generate_symbols)
        .with_failure_policy(failure_policy(plan.on_failure))
        .with_parallel(plan.parallel);

    let report = match plan.mode {
        OutputMode::Cache => {
            let strategy = OptimizationCacheStrategy::new(
                &plan.output_dir,
                &plan.target,
                plan.overwrite_on_conflict,
            );
            orchestrator.run(&graph, &strategy)?
        }
        OutputMode::App => orchestrator.run(&graph, &AppLocalStrategy::new(&plan.output_dir))?,
    };

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                render_text(&report);
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.has_failures() { 1 } else { 0 })
}

/// Applies command-line flags on top of the configured plan.
///
/// Boolean flags can only switch behaviour on; they never turn off what the
/// configuration enables.
pub fn apply_overrides(plan: &mut RunPlan, args: &CompileArgs) {
    if let Some(ref output) = args.output {
        plan.output_dir = PathBuf::from(output);
    }
    if let Some(mode) = args.mode {
        plan.mode = match mode {
            CliOutputMode::Cache => OutputMode::Cache,
            CliOutputMode::App => OutputMode::App,
        };
    }
    plan.generate_symbols |= args.symbols;
    plan.overwrite_on_conflict |= args.overwrite_on_conflict;
    plan.parallel |= args.parallel;
    if args.keep_going {
        plan.on_failure = OnFailure::Continue;
    }
}

fn failure_policy(on_failure: OnFailure) -> FailurePolicy {
    match on_failure {
        OnFailure::Abort => FailurePolicy::Abort,
        OnFailure::Continue => FailurePolicy::Continue,
    }
}

fn render_text(report: &RunReport) {
    for lib in report.libraries.iter().filter(|l| l.processed) {
        eprintln!("{}", library_line(lib));
        for asset in &lib.assets {
            match &asset.status {
                AssetStatus::Compiled { .. } => {}
                AssetStatus::SymbolsFailed { message, .. } => {
                    eprintln!("warning: {}: symbols not emitted: {message}", asset.asset)
                }
                AssetStatus::Missing => {
                    eprintln!("warning: {}: input assembly not found", asset.asset)
                }
                AssetStatus::Failed { message } => eprintln!("error: {}: {message}", asset.asset),
            }
        }
        if let Some(ref e) = lib.cache_error {
            eprintln!("error: {e}");
        }
    }
    eprintln!(
        "   Result: {} compiled, {} failed, {} missing, {} libraries skipped",
        report.compiled_count(),
        report.failed_count(),
        report.missing_count(),
        report.skipped_count()
    );
}

fn library_line(lib: &LibraryReport) -> String {
    let manifest = match lib.manifest {
        Some(ManifestOutcome::Created) => ", manifest created",
        Some(ManifestOutcome::Unchanged) => ", manifest unchanged",
        Some(ManifestOutcome::Overwritten) => ", manifest overwritten",
        None => "",
    };
    format!(
        "    Compiled {} {} ({} asset(s){manifest})",
        lib.name,
        lib.version,
        lib.assets.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use xgen_common::{Framework, TargetDescriptor};

    fn plan() -> RunPlan {
        RunPlan {
            target: TargetDescriptor::self_contained(Framework::new("netcoreapp1.0"), "linux-x64"),
            compiler: PathBuf::from("/opt/crossgen"),
            symbol_reader: None,
            graph: PathBuf::from("/proj/app.deps.json"),
            app_dir: PathBuf::from("/proj/publish"),
            output_dir: PathBuf::from("/proj/cache"),
            mode: OutputMode::Cache,
            generate_symbols: false,
            overwrite_on_conflict: false,
            on_failure: OnFailure::Abort,
            parallel: false,
        }
    }

    fn args(argv: &[&str]) -> CompileArgs {
        let mut full = vec!["xgen", "compile"];
        full.extend_from_slice(argv);
        match crate::Cli::parse_from(full).command {
            crate::Command::Compile(args) => args,
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn no_flags_keep_plan() {
        let mut p = plan();
        apply_overrides(&mut p, &args(&[]));
        assert_eq!(p.output_dir, PathBuf::from("/proj/cache"));
        assert_eq!(p.mode, OutputMode::Cache);
        assert!(!p.generate_symbols);
        assert_eq!(p.on_failure, OnFailure::Abort);
    }

    #[test]
    fn flags_override_plan() {
        let mut p = plan();
        apply_overrides(
            &mut p,
            &args(&[
                "--output",
                "/tmp/out",
                "--mode",
                "app",
                "--symbols",
                "--overwrite-on-conflict",
                "--keep-going",
                "--parallel",
            ]),
        );
        assert_eq!(p.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(p.mode, OutputMode::App);
        assert!(p.generate_symbols);
        assert!(p.overwrite_on_conflict);
        assert_eq!(p.on_failure, OnFailure::Continue);
        assert!(p.parallel);
    }

    #[test]
    fn flags_do_not_disable_config() {
        let mut p = plan();
        p.overwrite_on_conflict = true;
        apply_overrides(&mut p, &args(&[]));
        assert!(p.overwrite_on_conflict);
    }

    #[test]
    fn failure_policy_mapping() {
        assert_eq!(failure_policy(OnFailure::Abort), FailurePolicy::Abort);
        assert_eq!(failure_policy(OnFailure::Continue), FailurePolicy::Continue);
    }

    #[test]
    fn library_line_mentions_manifest() {
        let lib = LibraryReport {
            name: "Foo".to_string(),
            version: "1.2.3".to_string(),
            processed: true,
            assets: vec![],
            manifest: Some(ManifestOutcome::Overwritten),
            cache_error: None,
        };
        assert_eq!(
            library_line(&lib),
            "    Compiled Foo 1.2.3 (0 asset(s), manifest overwritten)"
        );
    }
}
