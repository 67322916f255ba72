//! Schematic script: a line-oriented text form of editor actions.
//!
//! A script records what a user does in the editor (placing parts, drawing
//! wires, editing values, moving the drive frequency) so that a session can
//! be replayed headless, from the CLI or in tests.
//!
//! # Grammar Overview
//!
//! ```text
//! script      = { line }
//! line        = comment | directive | command | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.frequency' value
//!             | '.capacitorless' ('open' | 'bypass')
//!             | '.sweep' value value value
//! command     = kind name value value [value]       (place)
//!             | 'move' name value value
//!             | 'value' name value
//!             | 'delete' name
//!             | 'wire' terminal terminal
//!             | 'unwire' terminal terminal
//!             | 'clear'
//! terminal    = name '.' ('left' | 'right' | 'l' | 'r')
//!
//! kind        = 'R' | 'L' | 'C' | 'V' | 'GND' | long forms
//! value       = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+] [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'M' | 'G'
//! name        = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Component Kinds
//!
//! | Keyword | Kind | Default value |
//! |---------|------|---------------|
//! | `R`, `RES`, `RESISTOR` | Resistor | 220 Ω |
//! | `L`, `IND`, `INDUCTOR` | Inductor | 100 mH |
//! | `C`, `CAP`, `CAPACITOR` | Capacitor | 10 µF |
//! | `V`, `SRC`, `SOURCE` | Voltage source | 10 V |
//! | `GND`, `GROUND` | Ground | - |
//!
//! # Example
//!
//! ```text
//! # Series RLC driven at 60 Hz
//! .frequency 60
//!
//! V   vin  0   0   10
//! R   r1   100 0   220
//! L   l1   200 0   100m
//! C   c1   300 0   10u
//! GND g    0   100
//!
//! wire vin.right r1.left
//! wire r1.right  l1.left
//! wire l1.right  c1.left
//! wire c1.right  g.left
//! ```

mod ast;
mod lexer;
mod parser;
mod replay;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;
pub use replay::{replay, Bindings};

use crate::analysis::Analyzer;
use crate::error::Result;

/// Parse a script string into an AST.
pub fn parse(input: &str) -> Result<ScriptAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a script and replay it onto a fresh analyzer.
pub fn run_script(input: &str) -> Result<(Analyzer, Bindings)> {
    let ast = parse(input)?;
    let mut analyzer = Analyzer::new();
    let names = replay(&ast, &mut analyzer)?;
    Ok((analyzer, names))
}

/// Parse a script file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<ScriptAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::CircuitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
