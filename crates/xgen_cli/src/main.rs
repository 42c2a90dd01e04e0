//! xgen CLI — ahead-of-time native-image compilation with a shared
//! optimization cache.
//!
//! Provides `xgen compile` to compile the serviceable libraries of a resolved
//! dependency graph into the cache (or flat into an application directory),
//! and `xgen verify` to check cached hash manifests for drift.

#![warn(missing_docs)]

mod compile;
mod logging;
mod project;
mod verify;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// xgen — cache-validated native-image compilation.
#[derive(Parser, Debug)]
#[command(name = "xgen", version, about = "Native-image compilation orchestrator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a configuration file, or a project directory containing `xgen.toml`.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the libraries of the dependency graph.
    Compile(CompileArgs),
    /// Check cached hash manifests against the dependency graph.
    Verify(VerifyArgs),
}

/// Arguments for the `xgen compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Override the output directory.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the output layout.
    #[arg(long, value_enum)]
    pub mode: Option<CliOutputMode>,

    /// Emit debug-symbol files next to compiled images.
    #[arg(long)]
    pub symbols: bool,

    /// Overwrite conflicting manifest hashes instead of failing.
    #[arg(long)]
    pub overwrite_on_conflict: bool,

    /// Record cache failures and continue with the remaining libraries.
    #[arg(long)]
    pub keep_going: bool,

    /// Process libraries in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Output format for the run report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `xgen verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Override the output directory to inspect.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format for the verification report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Output layout selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliOutputMode {
    /// Shared optimization cache with hash manifests.
    Cache,
    /// Flat application-local output.
    App,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file or project directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    logging::init_tracing(&global);

    let result = match cli.command {
        Command::Compile(ref args) => compile::run(args, &global),
        Command::Verify(ref args) => verify::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_compile_default() {
        let cli = Cli::parse_from(["xgen", "compile"]);
        match cli.command {
            Command::Compile(ref args) => {
                assert!(args.output.is_none());
                assert!(args.mode.is_none());
                assert!(!args.symbols);
                assert!(!args.overwrite_on_conflict);
                assert!(!args.keep_going);
                assert!(!args.parallel);
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_compile_with_args() {
        let cli = Cli::parse_from([
            "xgen",
            "compile",
            "--output",
            "/var/cache/xgen",
            "--mode",
            "app",
            "--symbols",
            "--overwrite-on-conflict",
            "--keep-going",
            "--parallel",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Compile(ref args) => {
                assert_eq!(args.output.as_deref(), Some("/var/cache/xgen"));
                assert_eq!(args.mode, Some(CliOutputMode::App));
                assert!(args.symbols);
                assert!(args.overwrite_on_conflict);
                assert!(args.keep_going);
                assert!(args.parallel);
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_verify_default() {
        let cli = Cli::parse_from(["xgen", "verify"]);
        match cli.command {
            Command::Verify(ref args) => {
                assert!(args.output.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Verify command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["xgen", "--quiet", "--color", "never", "verify"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["xgen", "compile", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["xgen", "--config", "/proj/xgen.toml", "compile"]);
        assert_eq!(cli.config.as_deref(), Some("/proj/xgen.toml"));
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["xgen", "compile", "--mode", "flat"]).is_err());
    }
}
