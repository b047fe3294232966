use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::RtlGraphError;
use crate::progress::ProgressReporter;

const DUMP_EXTENSION: &str = "expand";
const C_EXTENSIONS: &[&str] = &["c"];
const CXX_EXTENSIONS: &[&str] = &["cc", "cpp", "cxx", "C"];

/// Language of a source input, which picks the default compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cxx,
}

/// One input resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// An RTL dump read as is
    Dump(PathBuf),
    /// A source file that has to be compiled first
    Source { path: PathBuf, language: Language },
}

impl Input {
    pub fn path(&self) -> &Path {
        match self {
            Input::Dump(path) | Input::Source { path, .. } => path,
        }
    }

    /// Classify a file by name; `None` for anything that is neither a dump
    /// nor a known source file
    pub fn classify(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension == DUMP_EXTENSION {
            Some(Input::Dump(path.to_path_buf()))
        } else if C_EXTENSIONS.contains(&extension) {
            Some(Input::Source {
                path: path.to_path_buf(),
                language: Language::C,
            })
        } else if CXX_EXTENSIONS.contains(&extension) {
            Some(Input::Source {
                path: path.to_path_buf(),
                language: Language::Cxx,
            })
        } else {
            None
        }
    }
}

pub struct InputDiscovery {
    seen: HashSet<PathBuf>,
}

impl Default for InputDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDiscovery {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Resolve every command-line input into dumps and sources, keeping the
    /// order they were given in; directories contribute their dumps in
    /// sorted path order
    pub fn discover_all(
        &mut self,
        inputs: &[String],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<Input>, RtlGraphError> {
        let mut found = Vec::new();

        for input in inputs {
            if is_glob(input) {
                self.discover_glob(input, &mut found, progress)?;
            } else {
                self.discover_path(Path::new(input), &mut found, progress)?;
            }
        }

        if found.is_empty() {
            return Err(RtlGraphError::ConfigurationError {
                message: format!("No RTL dumps or sources found in: {}", inputs.join(", ")),
            });
        }

        debug!(count = found.len(); "Discovered inputs");
        Ok(found)
    }

    fn discover_glob(
        &mut self,
        pattern: &str,
        found: &mut Vec<Input>,
        progress: Option<&ProgressReporter>,
    ) -> Result<(), RtlGraphError> {
        let paths = glob::glob(pattern).map_err(|e| RtlGraphError::ConfigurationError {
            message: format!("Invalid glob pattern '{pattern}': {e}"),
        })?;

        let mut matched = 0;
        for path in paths.flatten() {
            matched += 1;
            if path.is_dir() {
                self.discover_directory(&path, found, progress);
            } else if let Some(input) = Input::classify(&path) {
                self.push(input, found);
            } else {
                debug!(path:? = path; "Skipping unsupported glob match");
            }
        }

        if matched == 0 {
            warn!(pattern; "Glob pattern matched nothing");
        }
        Ok(())
    }

    fn discover_path(
        &mut self,
        path: &Path,
        found: &mut Vec<Input>,
        progress: Option<&ProgressReporter>,
    ) -> Result<(), RtlGraphError> {
        if !path.exists() {
            return Err(RtlGraphError::FileReadError {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            });
        }

        if path.is_dir() {
            self.discover_directory(path, found, progress);
            return Ok(());
        }

        match Input::classify(path) {
            Some(input) => {
                self.push(input, found);
                Ok(())
            }
            None => Err(RtlGraphError::ConfigurationError {
                message: format!(
                    "'{}' is neither an RTL dump (*.expand) nor a C/C++ source",
                    path.display()
                ),
            }),
        }
    }

    fn discover_directory(
        &mut self,
        dir: &Path,
        found: &mut Vec<Input>,
        progress: Option<&ProgressReporter>,
    ) {
        let dumps: Vec<PathBuf> = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == DUMP_EXTENSION))
            .collect();

        if dumps.is_empty() {
            warn!(dir:? = dir; "Directory contains no RTL dumps");
        }

        for dump in dumps {
            if let Some(p) = progress {
                p.status("Found", &dump.display().to_string());
            }
            self.push(Input::Dump(dump), found);
        }
    }

    fn push(&mut self, input: Input, found: &mut Vec<Input>) {
        if self.seen.insert(input.path().to_path_buf()) {
            found.push(input);
        } else {
            debug!(path:? = input.path(); "Skipping repeated input");
        }
    }
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
