//! The native-image compiler seam and its external-process implementation.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// One native-image compilation of an input assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Input assembly.
    pub input: PathBuf,
    /// Path of the compiled image to produce.
    pub output: PathBuf,
    /// Directories the compiler resolves references from.
    pub references: Vec<PathBuf>,
}

/// Debug-symbol emission for an already compiled image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRequest {
    /// The compiled image.
    pub image: PathBuf,
    /// Directory that receives the symbol file.
    pub output_dir: PathBuf,
    /// Directories the compiler resolves references from.
    pub references: Vec<PathBuf>,
}

/// Errors from a compiler invocation.
#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    /// The compiler process could not be started.
    #[error("failed to run native-image compiler {program}: {source}")]
    Spawn {
        /// The compiler executable.
        program: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The compiler exited unsuccessfully.
    #[error("native-image compiler {program} failed{}", exit_suffix(.code))]
    Failed {
        /// The compiler executable.
        program: PathBuf,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!(" (exit code {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

/// A native-image compiler.
///
/// Invocations are blocking; success means the image (or symbol file) was
/// written.
pub trait NativeCompiler: Sync {
    /// Compiles one input assembly.
    fn compile(&self, request: &CompileRequest) -> Result<(), CompilerError>;

    /// Emits a debug-symbol file for a compiled image.
    fn emit_symbols(&self, request: &SymbolRequest) -> Result<(), CompilerError>;
}

/// Runs an external compiler executable.
///
/// Standard output is forwarded to `tracing` at debug level; standard error
/// is logged as warnings when the compiler fails.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    program: PathBuf,
    symbol_reader: Option<PathBuf>,
}

impl ExternalCompiler {
    /// Creates a compiler that runs `program`.
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            symbol_reader: None,
        }
    }

    /// Sets the native symbol reader passed when emitting symbols.
    pub fn with_symbol_reader(mut self, symbol_reader: Option<PathBuf>) -> Self {
        self.symbol_reader = symbol_reader;
        self
    }

    /// Builds the command line for a compilation.
    pub fn compile_command(&self, request: &CompileRequest) -> Command {
        let mut cmd = self.base_command(&request.references);
        cmd.arg("-out").arg(&request.output).arg(&request.input);
        cmd
    }

    /// Builds the command line for symbol emission.
    pub fn symbols_command(&self, request: &SymbolRequest) -> Command {
        let mut cmd = self.base_command(&request.references);
        cmd.arg("-createpdb").arg(&request.output_dir);
        if let Some(reader) = &self.symbol_reader {
            cmd.arg("-diasymreaderpath").arg(reader);
        }
        cmd.arg(&request.image);
        cmd
    }

    fn base_command(&self, references: &[PathBuf]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-nologo");
        for dir in references {
            cmd.arg("-r").arg(dir);
        }
        cmd
    }

    fn execute(&self, mut cmd: Command) -> Result<(), CompilerError> {
        tracing::debug!(command = ?cmd, "invoking native-image compiler");
        let output = cmd.output().map_err(|e| CompilerError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;
        self.route_output(&output)
    }

    fn route_output(&self, output: &Output) -> Result<(), CompilerError> {
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::debug!(target: "xgen::compiler", "{line}");
        }
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        for line in stderr.lines() {
            tracing::warn!(target: "xgen::compiler", "{line}");
        }
        Err(CompilerError::Failed {
            program: self.program.clone(),
            code: output.status.code(),
            stderr,
        })
    }
}

impl NativeCompiler for ExternalCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<(), CompilerError> {
        self.execute(self.compile_command(request))
    }

    fn emit_symbols(&self, request: &SymbolRequest) -> Result<(), CompilerError> {
        self.execute(self.symbols_command(request))
    }
}
