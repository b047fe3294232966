use std::collections::BTreeMap;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::error::{ConfigParseError, RtlGraphError};

/// Parser settings read from a TOML file
///
/// ```toml
/// ignore = "^_GLOBAL__sub_|std::"
/// seeds = ["malloc", "free", "exit"]
/// demangle = true
///
/// [translate]
/// realloc = "malloc"
/// ```
///
/// Keys left out keep their built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub ignore: Option<String>,
    pub seeds: Option<Vec<String>>,
    pub translate: Option<BTreeMap<String, String>>,
    pub demangle: Option<bool>,
}

impl ConfigFile {
    pub fn parse_file(path: &Path) -> Result<Self, RtlGraphError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RtlGraphError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::parse_str(&content, &path.display().to_string())
    }

    pub fn parse_str(content: &str, file: &str) -> Result<Self, RtlGraphError> {
        toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            RtlGraphError::ConfigParseError(Box::new(ConfigParseError {
                file: file.to_string(),
                source_code: NamedSource::new(file, content.to_string()),
                span,
                source: e,
            }))
        })
    }

    /// Translation table as ordered pairs
    pub fn translations(&self) -> Option<Vec<(String, String)>> {
        self.translate.as_ref().map(|table| {
            table
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect()
        })
    }
}
