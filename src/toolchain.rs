//! External programs: the compiler producing RTL dumps and the Graphviz
//! renderer

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use log::debug;
use tempfile::TempDir;

use crate::constants::tools::{C_COMPILER, CXX_COMPILER, DUMP_FLAG, RENDERER};
use crate::error::RtlGraphError;
use crate::input_discovery::Language;

fn tool_error(tool: &str, reason: impl Into<String>) -> RtlGraphError {
    RtlGraphError::ExternalTool {
        tool: tool.to_string(),
        reason: reason.into(),
    }
}

fn check_status(tool: &str, output: &Output) -> Result<(), RtlGraphError> {
    if output.status.success() {
        return Ok(());
    }
    Err(tool_error(
        tool,
        format!(
            "{}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ),
    ))
}

/// Compiles sources with `-fdump-rtl-expand` into a private temporary
/// directory; the dumps live as long as the compiler does
pub struct Compiler {
    program: Option<String>,
    workdir: TempDir,
    compiled: usize,
}

impl Compiler {
    /// `program` overrides the per-language default (`gcc` or `g++`)
    pub fn new(program: Option<String>) -> Result<Self, RtlGraphError> {
        Ok(Self {
            program,
            workdir: TempDir::new()?,
            compiled: 0,
        })
    }

    pub fn program_for(&self, language: Language) -> &str {
        match (&self.program, language) {
            (Some(program), _) => program,
            (None, Language::C) => C_COMPILER,
            (None, Language::Cxx) => CXX_COMPILER,
        }
    }

    /// Compile one source and return the dumps it produced, sorted by path
    pub fn compile(
        &mut self,
        source: &Path,
        language: Language,
    ) -> Result<Vec<PathBuf>, RtlGraphError> {
        let source = fs::canonicalize(source).map_err(|e| RtlGraphError::FileReadError {
            path: source.to_path_buf(),
            source: e,
        })?;
        let stem = source
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        // One directory per source so equally named files don't collide
        self.compiled += 1;
        let outdir = self.workdir.path().join(self.compiled.to_string());
        fs::create_dir_all(&outdir)?;

        let program = self.program_for(language).to_string();
        debug!(program = program.as_str(), source:? = source; "Compiling source");

        let output = Command::new(&program)
            .current_dir(&outdir)
            .arg(DUMP_FLAG)
            .arg("-c")
            .arg(&source)
            .arg("-o")
            .arg(outdir.join(format!("{stem}.o")))
            .output()
            .map_err(|e| tool_error(&program, e.to_string()))?;
        check_status(&program, &output)?;

        let mut dumps: Vec<PathBuf> = fs::read_dir(&outdir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "expand"))
            .collect();
        dumps.sort();

        if dumps.is_empty() {
            return Err(tool_error(
                &program,
                format!("no RTL dump produced for '{}'", source.display()),
            ));
        }
        Ok(dumps)
    }
}

/// Lays out a DOT document with Graphviz
#[derive(Debug, Clone)]
pub struct Renderer {
    program: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RENDERER)
    }
}

impl Renderer {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    /// Pipe `dot` source through the renderer and return its output
    pub fn render(&self, dot: &str, format: &str) -> Result<Vec<u8>, RtlGraphError> {
        debug!(program = self.program.as_str(), format; "Rendering graph");

        let mut child = Command::new(&self.program)
            .arg(format!("-T{format}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| tool_error(&self.program, e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(dot.as_bytes())
                .map_err(|e| tool_error(&self.program, e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| tool_error(&self.program, e.to_string()))?;
        check_status(&self.program, &output)?;
        Ok(output.stdout)
    }
}
