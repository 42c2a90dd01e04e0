//! Native-image compilation orchestration.
//!
//! The [`Orchestrator`] walks a resolved dependency graph and invokes an
//! external native-image compiler for every asset of every library a
//! [`CrossGenStrategy`] selects. The strategy decides which libraries are
//! compiled, where each asset's output goes, and what happens once a
//! library is done; [`OptimizationCacheStrategy`] layers the shared
//! optimization cache and its hash manifests over the traversal, while
//! [`AppLocalStrategy`] writes every image flat into one directory.

#![warn(missing_docs)]

pub mod app;
pub mod cache_strategy;
pub mod compiler;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod strategy;

pub use app::AppLocalStrategy;
pub use cache_strategy::OptimizationCacheStrategy;
pub use compiler::{CompileRequest, CompilerError, ExternalCompiler, NativeCompiler, SymbolRequest};
pub use error::DriverError;
pub use orchestrator::{FailurePolicy, Orchestrator};
pub use report::{AssetReport, AssetStatus, LibraryReport, RunReport};
pub use strategy::CrossGenStrategy;
