//! Error types for the AC circuit analyzer.
//!
//! The schematic model and the metrics engine are total: they never fail.
//! [`CircuitError`] covers the outer surfaces built on top of them, namely
//! schematic script parsing and replay, integrity checks, the CLI report
//! writer and the WASM bindings.

use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all fallible operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Script Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown component kind keyword
    #[error("Unknown component kind '{kind}' at line {line}")]
    UnknownComponentKind { kind: String, line: usize },

    /// Invalid numeric value in a script statement
    #[error("Invalid value '{text}' at line {line}")]
    InvalidValue { text: String, line: usize },

    // ============ Script Replay Errors ============
    /// Script refers to a component name that was never placed or was deleted
    #[error("Undefined component '{name}' at line {line}")]
    UndefinedComponent { name: String, line: usize },

    /// Script places a component under a name that is still in use
    #[error("Duplicate component name '{name}' at line {line}")]
    DuplicateName { name: String, line: usize },

    /// Script removes a wire that does not exist
    #[error("No wire between {from} and {to} at line {line}")]
    WireNotFound {
        from: String,
        to: String,
        line: usize,
    },

    // ============ Schematic Integrity Errors ============
    /// A schematic invariant does not hold
    #[error("Schematic integrity violation: {message}")]
    IntegrityViolation { message: String },

    // ============ I/O Errors ============
    /// Error reading a schematic script file
    #[error("Failed to read script file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report
    #[error("Report output error: {message}")]
    ReportOutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl CircuitError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an undefined component error
    pub fn undefined(name: impl Into<String>, line: usize) -> Self {
        Self::UndefinedComponent {
            name: name.into(),
            line,
        }
    }

    /// Create an integrity violation error
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            message: message.into(),
        }
    }

    /// Line number the error refers to, if it came from a script.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::LexerError { line, .. }
            | Self::ParseError { line, .. }
            | Self::UnknownComponentKind { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::UndefinedComponent { line, .. }
            | Self::DuplicateName { line, .. }
            | Self::WireNotFound { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_line() {
        let err = CircuitError::parse(7, "expected name");
        assert_eq!(err.to_string(), "Parse error at line 7: expected name");
        assert_eq!(err.line(), Some(7));

        let err = CircuitError::integrity("dangling wire w3");
        assert_eq!(err.line(), None);
    }
}
