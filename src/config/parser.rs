//! Dump parser configuration

use std::collections::HashSet;

use regex::Regex;

use crate::common::ConfigBuilder;
use crate::constants::parser::{DEFAULT_IGNORE_PATTERN, DEFAULT_SEEDS, DEFAULT_TRANSLATIONS};
use crate::error::RtlGraphError;
use crate::toml_parser::ConfigFile;

/// Configuration supplied to [`DumpParser`](crate::parser::DumpParser)
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Functions whose (demangled) name matches are left out of the graph
    pub ignore_pattern: Regex,
    /// Library functions that are always part of the graph
    pub seeds: Vec<String>,
    /// Referenced names rewritten before an edge is created
    pub translations: Vec<(String, String)>,
    /// Run symbols through the demangler
    pub demangle: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            ignore_pattern: Regex::new(DEFAULT_IGNORE_PATTERN)
                .expect("Default ignore pattern should be valid"),
            seeds: DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect(),
            translations: DEFAULT_TRANSLATIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            demangle: true,
        }
    }
}

impl ParserConfig {
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::new()
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_pattern.is_match(name)
    }

    pub fn is_seed(&self, name: &str) -> bool {
        self.seeds.iter().any(|seed| seed == name)
    }

    /// Apply the translation table, returning `name` when no entry matches
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.translations
            .iter()
            .find(|(from, _)| from == name)
            .map(|(_, to)| to.as_str())
            .unwrap_or(name)
    }
}

/// Builder for [`ParserConfig`]; unset fields keep the defaults
#[derive(Default)]
pub struct ParserConfigBuilder {
    ignore_pattern: Option<String>,
    seeds: Option<Vec<String>>,
    translations: Option<Vec<(String, String)>>,
    demangle: Option<bool>,
}

impl ParserConfigBuilder {
    pub fn new() -> Self {
        Self {
            ignore_pattern: None,
            seeds: None,
            translations: None,
            demangle: None,
        }
    }

    pub fn with_ignore_pattern(mut self, pattern: &str) -> Self {
        self.ignore_pattern = Some(pattern.to_string());
        self
    }

    pub fn with_seeds(mut self, seeds: Vec<String>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    pub fn with_translations(mut self, translations: Vec<(String, String)>) -> Self {
        self.translations = Some(translations);
        self
    }

    pub fn with_demangle(mut self, demangle: bool) -> Self {
        self.demangle = Some(demangle);
        self
    }

    /// Take every key present in a config file
    pub fn with_config_file(mut self, file: ConfigFile) -> Self {
        let translations = file.translations();
        if let Some(ignore) = file.ignore {
            self.ignore_pattern = Some(ignore);
        }
        if let Some(seeds) = file.seeds {
            self.seeds = Some(seeds);
        }
        if let Some(translations) = translations {
            self.translations = Some(translations);
        }
        if let Some(demangle) = file.demangle {
            self.demangle = Some(demangle);
        }
        self
    }
}

impl ConfigBuilder for ParserConfigBuilder {
    type Config = ParserConfig;

    fn build(self) -> Result<Self::Config, RtlGraphError> {
        let defaults = ParserConfig::default();

        let ignore_pattern = match self.ignore_pattern {
            Some(pattern) => {
                Regex::new(&pattern).map_err(|source| RtlGraphError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?
            }
            None => defaults.ignore_pattern,
        };

        let seeds = self.seeds.unwrap_or(defaults.seeds);
        if let Some(blank) = seeds.iter().find(|seed| seed.trim().is_empty()) {
            return Err(RtlGraphError::ConfigurationError {
                message: format!("Seed function names must not be blank: {blank:?}"),
            });
        }

        let mut unique = HashSet::new();
        if let Some(duplicate) = seeds.iter().find(|seed| !unique.insert(seed.as_str())) {
            return Err(RtlGraphError::ConfigurationError {
                message: format!("Seed function '{duplicate}' is listed more than once"),
            });
        }

        Ok(ParserConfig {
            ignore_pattern,
            seeds,
            translations: self.translations.unwrap_or(defaults.translations),
            demangle: self.demangle.unwrap_or(defaults.demangle),
        })
    }
}
