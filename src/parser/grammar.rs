//! Line grammar of GCC RTL `expand` dumps

use std::sync::LazyLock;

use regex::Regex;

/// `;; Function A::f (_ZN1A1fEv, funcdef_no=1, ...)`
static FUNCTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^;; Function .*?\((?P<symbol>[^\s,()]+)(?:,|\))")
        .expect("Function header pattern should be valid")
});

/// `;; Function main`, as written by GCC 3
static LEGACY_FUNCTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^;; Function (?P<symbol>\S+)\s*$")
        .expect("Legacy function header pattern should be valid")
});

/// `(symbol_ref:DI ("puts") [flags 0x41] ...)`
static SYMBOL_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\(symbol_ref[^(]*\("(?P<symbol>[^"]+)"\)"#)
        .expect("Symbol reference pattern should be valid")
});

/// The `call` RTX; `call_insn` alone is not a call
static CALL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(call[\s(]").expect("Call marker pattern should be valid"));

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((?:insn|call_insn|jump_insn)[\s/]")
        .expect("Instruction pattern should be valid")
});

/// A symbol mentioned on a dump line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRef<'a> {
    pub symbol: &'a str,
    /// The same line carries a call marker
    pub call: bool,
}

/// Classification of a single dump line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpLine<'a> {
    /// Start of a function definition, with its assembler name
    FunctionHeader(&'a str),
    /// An instruction, possibly referencing a symbol on the same line
    Instruction { reference: Option<SymbolRef<'a>> },
    /// A symbol reference on a continuation line
    Reference(SymbolRef<'a>),
    Other,
}

impl<'a> DumpLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with(";; Function ") {
            let captures = FUNCTION_HEADER
                .captures(line)
                .or_else(|| LEGACY_FUNCTION_HEADER.captures(line));
            if let Some(symbol) = captures.and_then(|c| c.name("symbol")) {
                return DumpLine::FunctionHeader(symbol.as_str());
            }
            return DumpLine::Other;
        }

        let reference = SYMBOL_REF
            .captures(line)
            .and_then(|c| c.name("symbol"))
            .map(|symbol| SymbolRef {
                symbol: symbol.as_str(),
                call: CALL_MARKER.is_match(line),
            });

        if INSTRUCTION.is_match(line) {
            DumpLine::Instruction { reference }
        } else if let Some(reference) = reference {
            DumpLine::Reference(reference)
        } else {
            DumpLine::Other
        }
    }

    pub fn is_instruction(&self) -> bool {
        matches!(self, DumpLine::Instruction { .. })
    }

    /// The referenced symbol, whether or not the line is an instruction
    pub fn reference(&self) -> Option<SymbolRef<'a>> {
        match self {
            DumpLine::Instruction { reference } => *reference,
            DumpLine::Reference(reference) => Some(*reference),
            _ => None,
        }
    }
}
