use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RtlGraphError;

/// `.233r.expand` or a bare `.expand`
static DUMP_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\.\d+[a-z]?)?\.expand$").expect("Dump suffix pattern should be valid")
});

/// The dump of one compiled source file
#[derive(Debug, Clone)]
pub struct DumpModule {
    name: String,
    lines: Vec<String>,
}

impl DumpModule {
    pub fn new(name: &str, lines: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            lines,
        }
    }

    pub fn from_text(name: &str, text: &str) -> Self {
        Self::new(name, text.lines().map(str::to_string).collect())
    }

    pub fn from_path(path: &Path) -> Result<Self, RtlGraphError> {
        let text = std::fs::read_to_string(path).map_err(|e| RtlGraphError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_text(&path.display().to_string(), &text))
    }

    /// Dump file name as given
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// File name of the compiled source, e.g. `main.c` for
    /// `build/main.c.233r.expand`
    pub fn source_name(&self) -> String {
        let file_name = Path::new(&self.name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone());
        DUMP_SUFFIX.replace(&file_name, "").into_owned()
    }
}
