//! `xgen verify` — read-only drift check of the optimization cache.
//!
//! Compares the hash manifest of every serviceable library in the dependency
//! graph with the library's package hash. Nothing is written.

use std::path::PathBuf;

use serde::Serialize;
use xgen_cache::{LibraryLayout, ManifestStatus, ManifestValidator};
use xgen_config::OutputMode;
use xgen_deps::DependencyGraph;

use crate::project::{load_graph, load_plan};
use crate::{GlobalArgs, ReportFormat, VerifyArgs};

/// Verification result for one library.
#[derive(Debug, Serialize)]
pub struct VerifyEntry {
    /// Library name.
    pub name: String,
    /// Library version.
    pub version: String,
    /// Manifest status, if the library's hash could be checked.
    #[serde(flatten)]
    pub status: Option<ManifestStatus>,
    /// Why the check failed (e.g. unsupported hash).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyEntry {
    fn is_problem(&self) -> bool {
        self.error.is_some() || matches!(self.status, Some(ManifestStatus::Drifted { .. }))
    }
}

/// Runs the `xgen verify` command.
///
/// Returns exit code 0 if no manifest drifted, 1 otherwise.
pub fn run(args: &VerifyArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut plan = load_plan(global)?;
    if let Some(ref output) = args.output {
        plan.output_dir = PathBuf::from(output);
    }
    if plan.mode != OutputMode::Cache {
        return Err("verify requires output.mode = \"cache\"".into());
    }

    let graph = load_graph(&plan)?;
    let validator = ManifestValidator::new(LibraryLayout::new(&plan.output_dir, &plan.target), false);
    let entries = verify_graph(&graph, &validator);

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                for entry in &entries {
                    eprintln!("{}", entry_line(entry));
                }
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    let problems = entries.iter().filter(|e| e.is_problem()).count();
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Result: {} libraries checked, {} problem(s)",
            entries.len(),
            problems
        );
    }
    Ok(if problems > 0 { 1 } else { 0 })
}

/// Inspects the manifest of every serviceable library in graph order.
pub fn verify_graph(graph: &DependencyGraph, validator: &ManifestValidator) -> Vec<VerifyEntry> {
    graph
        .libraries()
        .iter()
        .filter(|lib| lib.serviceable)
        .map(|lib| {
            let (status, error) = match validator.inspect(lib) {
                Ok(status) => (Some(status), None),
                Err(e) => (None, Some(e.to_string())),
            };
            VerifyEntry {
                name: lib.name.clone(),
                version: lib.version.clone(),
                status,
                error,
            }
        })
        .collect()
}

fn entry_line(entry: &VerifyEntry) -> String {
    let what = match (&entry.status, &entry.error) {
        (_, Some(e)) => format!("error: {e}"),
        (Some(ManifestStatus::Current), _) => "current".to_string(),
        (Some(ManifestStatus::Missing), _) => "not cached".to_string(),
        (Some(ManifestStatus::Drifted { recorded }), _) => format!("drifted (recorded {recorded})"),
        (None, None) => "unknown".to_string(),
    };
    format!("{:>12} {} {}", what, entry.name, entry.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use xgen_common::{Framework, RuntimeLibrary, TargetDescriptor};

    fn lib(name: &str, hash: &str, serviceable: bool) -> RuntimeLibrary {
        RuntimeLibrary {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            hash: hash.to_string(),
            serviceable,
            assets: vec![],
        }
    }

    fn validator(root: &Path) -> ManifestValidator {
        let target = TargetDescriptor::self_contained(Framework::new("netcoreapp1.0"), "linux-x64");
        ManifestValidator::new(LibraryLayout::new(root, &target), false)
    }

    #[test]
    fn statuses_for_each_serviceable_library() {
        let dir = tempfile::tempdir().unwrap();
        let v = validator(dir.path());
        v.reconcile(&lib("Current", "sha512-abc", true)).unwrap();
        v.reconcile(&lib("Drifted", "sha512-old", true)).unwrap();

        let graph = DependencyGraph::new(vec![
            lib("Current", "sha512-abc", true),
            lib("Drifted", "sha512-new", true),
            lib("Missing", "sha512-xyz", true),
            lib("Bad", "md5-xyz", true),
            lib("Ignored", "sha512-abc", false),
        ]);
        let entries = verify_graph(&graph, &v);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Current", "Drifted", "Missing", "Bad"]);
        assert_eq!(entries[0].status, Some(ManifestStatus::Current));
        assert_eq!(
            entries[1].status,
            Some(ManifestStatus::Drifted {
                recorded: "old".to_string()
            })
        );
        assert_eq!(entries[2].status, Some(ManifestStatus::Missing));
        assert!(entries[3].error.as_deref().unwrap().contains("md5-xyz"));

        let problems: Vec<bool> = entries.iter().map(VerifyEntry::is_problem).collect();
        assert_eq!(problems, vec![false, true, false, true]);
    }

    #[test]
    fn verify_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let graph = DependencyGraph::new(vec![lib("Foo", "sha512-abc", true)]);
        verify_graph(&graph, &validator(dir.path()));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn entry_lines() {
        let entry = VerifyEntry {
            name: "Foo".to_string(),
            version: "1.0.0".to_string(),
            status: Some(ManifestStatus::Drifted {
                recorded: "old".to_string(),
            }),
            error: None,
        };
        assert_eq!(entry_line(&entry), "drifted (recorded old) Foo 1.0.0");
    }

    #[test]
    fn json_entry_shape() {
        let entry = VerifyEntry {
            name: "Foo".to_string(),
            version: "1.0.0".to_string(),
            status: Some(ManifestStatus::Current),
            error: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "current");
        assert!(json.get("error").is_none());
    }
}
