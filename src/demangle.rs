//! Symbol demangling through an external tool

use std::collections::HashMap;
use std::process::Command;

use log::{debug, trace};

use crate::constants::tools::DEMANGLER;
use crate::error::RtlGraphError;

/// Turns an assembler symbol into a display name
pub trait Demangler {
    fn demangle(&self, symbol: &str) -> Result<String, RtlGraphError>;
}

/// Demangles Itanium C++ symbols with `c++filt`
#[derive(Debug, Clone)]
pub struct CxxFilt {
    program: String,
}

impl Default for CxxFilt {
    fn default() -> Self {
        Self::new(DEMANGLER)
    }
}

impl CxxFilt {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Demangler for CxxFilt {
    fn demangle(&self, symbol: &str) -> Result<String, RtlGraphError> {
        // Only Itanium-mangled names change
        if !symbol.starts_with("_Z") {
            return Ok(symbol.to_string());
        }

        let output = Command::new(&self.program)
            .arg(symbol)
            .output()
            .map_err(|e| RtlGraphError::ExternalTool {
                tool: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(RtlGraphError::ExternalTool {
                tool: self.program.clone(),
                reason: format!(
                    "{} while demangling '{symbol}': {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        trace!(symbol, name = name.as_str(); "Demangled symbol");
        Ok(name)
    }
}

/// Leaves every symbol untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Demangler for Identity {
    fn demangle(&self, symbol: &str) -> Result<String, RtlGraphError> {
        Ok(symbol.to_string())
    }
}

/// Memoizes a [`Demangler`] for the lifetime of a parser
///
/// Each distinct symbol reaches the demangler at most once.
pub struct DemangleCache {
    demangler: Box<dyn Demangler>,
    names: HashMap<String, String>,
}

impl DemangleCache {
    pub fn new(demangler: Box<dyn Demangler>) -> Self {
        Self {
            demangler,
            names: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, symbol: &str) -> Result<String, RtlGraphError> {
        if let Some(name) = self.names.get(symbol) {
            return Ok(name.clone());
        }

        let name = self.demangler.demangle(symbol)?;
        self.names.insert(symbol.to_string(), name.clone());
        debug!(symbol, cached = self.names.len(); "Cached demangled name");
        Ok(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
