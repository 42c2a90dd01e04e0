//! Shared project helpers for CLI commands.
//!
//! Locates the project directory, loads `xgen.toml`, and resolves it into a
//! run plan.

use std::path::{Path, PathBuf};

use xgen_config::{RunPlan, CONFIG_FILE};
use xgen_deps::DependencyGraph;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `xgen.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `xgen.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Loads the project configuration and resolves it into a [`RunPlan`].
///
/// A `--config` file is read as given, whatever its name; relative paths in it
/// resolve against its directory.
pub fn load_plan(global: &GlobalArgs) -> Result<RunPlan, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = match global.config.as_deref().map(Path::new) {
        Some(file) if file.is_file() => xgen_config::load_config_file(file)?,
        _ => xgen_config::load_config(&project_dir)?,
    };
    Ok(xgen_config::resolve_plan(&config, &project_dir))
}

/// Loads the plan's dependency graph, warning when it was resolved for a
/// different runtime identifier than the configured target.
pub fn load_graph(plan: &RunPlan) -> Result<DependencyGraph, Box<dyn std::error::Error>> {
    let graph = xgen_deps::load_graph(&plan.graph)?;
    if let Some(resolved) = graph.rid_mismatch(plan.target.rid()) {
        tracing::warn!(
            graph = %plan.graph.display(),
            resolved,
            configured = plan.target.rid(),
            "dependency graph was resolved for a different runtime identifier"
        );
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[compiler]
path = "crossgen"

[target]
framework = "netcoreapp1.0"
rid = "linux-x64"

[input]
graph = "app.deps.json"
app_dir = "publish"

[output]
dir = "cache"
"#;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
        }
    }

    #[test]
    fn find_root_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_root(&nested).unwrap(), dir.path());
    }

    #[test]
    fn find_root_fails_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_project_root(dir.path()).unwrap_err();
        assert!(err.to_string().contains("could not find xgen.toml"));
    }

    #[test]
    fn config_flag_pointing_at_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, CONFIG).unwrap();
        let root = resolve_project_root(&global(Some(file.display().to_string()))).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn config_flag_loads_file_with_other_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        let custom = dir.path().join("arm.toml");
        std::fs::write(&custom, CONFIG.replace("linux-x64", "linux-arm64")).unwrap();

        let plan = load_plan(&global(Some(custom.display().to_string()))).unwrap();
        assert_eq!(plan.target.rid(), "linux-arm64");
        assert_eq!(plan.graph, dir.path().join("app.deps.json"));
    }

    #[test]
    fn load_graph_tolerates_rid_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        std::fs::write(
            dir.path().join("app.deps.json"),
            r#"{ "target": { "framework": "netcoreapp1.0", "rid": "win-x64" },
                 "libraries": [ { "name": "Foo", "version": "1.0.0" } ] }"#,
        )
        .unwrap();

        let plan = load_plan(&global(Some(dir.path().display().to_string()))).unwrap();
        let graph = load_graph(&plan).unwrap();
        assert_eq!(graph.rid_mismatch(plan.target.rid()), Some("win-x64"));
        assert_eq!(graph.libraries().len(), 1);
    }

    #[test]
    fn load_plan_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        let plan = load_plan(&global(Some(dir.path().display().to_string()))).unwrap();
        assert_eq!(plan.graph, dir.path().join("app.deps.json"));
        assert_eq!(plan.output_dir, dir.path().join("cache"));
        assert_eq!(plan.target.arch_segment(), "x64");
    }
}
