//! Parser for the schematic script.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::analysis::{CapacitorlessPolicy, SweepRange};
use crate::circuit::Terminal;
use crate::components::ComponentKind;
use crate::error::{CircuitError, Result};

/// Parser for schematic scripts.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire script.
    pub fn parse(&mut self) -> Result<ScriptAst> {
        let mut ast = ScriptAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            let line = self.current.line;
            let action = match self.current.kind {
                TokenKind::Directive => self.parse_directive()?,
                TokenKind::Identifier => self.parse_command()?,
                _ => {
                    return Err(CircuitError::parse(
                        line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            };
            ast.statements.push(Statement { action, line });

            // Each statement owns exactly one line
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(CircuitError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(CircuitError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn expect_name(&mut self) -> Result<String> {
        Ok(self.expect(TokenKind::Identifier)?.text)
    }

    fn expect_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text).ok_or(CircuitError::InvalidValue {
            text: tok.text,
            line: tok.line,
        })
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn parse_directive(&mut self) -> Result<Action> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".frequency" | ".freq" => Ok(Action::SetFrequency(self.expect_number()?)),
            ".capacitorless" => {
                let name = self.expect_name()?;
                let policy = CapacitorlessPolicy::from_name(&name).ok_or_else(|| {
                    CircuitError::parse(line, format!("unknown capacitorless policy: {}", name))
                })?;
                Ok(Action::SetCapacitorless(policy))
            }
            ".sweep" => {
                let start = self.expect_number()?;
                let stop = self.expect_number()?;
                let step = self.expect_number()?;
                Ok(Action::SetSweep(SweepRange::new(start, stop, step)))
            }
            _ => Err(CircuitError::parse(
                line,
                format!("unknown directive: {}", directive),
            )),
        }
    }

    fn parse_command(&mut self) -> Result<Action> {
        let keyword = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match keyword.to_ascii_lowercase().as_str() {
            "move" => {
                let name = self.expect_name()?;
                let x = self.expect_number()?;
                let y = self.expect_number()?;
                Ok(Action::Move { name, x, y })
            }
            "value" => {
                let name = self.expect_name()?;
                let value = self.expect_number()?;
                Ok(Action::SetValue { name, value })
            }
            "delete" => Ok(Action::Delete {
                name: self.expect_name()?,
            }),
            "wire" => {
                let from = self.parse_terminal_ref()?;
                let to = self.parse_terminal_ref()?;
                Ok(Action::Connect { from, to })
            }
            "unwire" => {
                let from = self.parse_terminal_ref()?;
                let to = self.parse_terminal_ref()?;
                Ok(Action::Disconnect { from, to })
            }
            "clear" => Ok(Action::Clear),
            _ => {
                let kind = ComponentKind::from_keyword(&keyword).ok_or(
                    CircuitError::UnknownComponentKind {
                        kind: keyword.clone(),
                        line,
                    },
                )?;
                self.parse_place(kind)
            }
        }
    }

    fn parse_place(&mut self, kind: ComponentKind) -> Result<Action> {
        let name = self.expect_name()?;
        let x = self.expect_number()?;
        let y = self.expect_number()?;
        let value = if self.at_line_end() {
            None
        } else {
            Some(self.expect_number()?)
        };
        Ok(Action::Place {
            kind,
            name,
            x,
            y,
            value,
        })
    }

    fn parse_terminal_ref(&mut self) -> Result<TerminalRef> {
        let name = self.expect_name()?;
        self.expect(TokenKind::Dot)?;
        let tok = self.expect(TokenKind::Identifier)?;
        let terminal = Terminal::from_name(&tok.text).ok_or_else(|| {
            CircuitError::parse(tok.line, format!("unknown terminal: {}", tok.text))
        })?;
        Ok(TerminalRef { name, terminal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<ScriptAst> {
        super::super::parse(input)
    }

    #[test]
    fn test_parse_place() {
        let ast = parse("R rload 40 60 220\nC ctank 0 0").unwrap();
        assert_eq!(ast.statements.len(), 2);
        assert_eq!(
            ast.statements[0].action,
            Action::Place {
                kind: ComponentKind::Resistor,
                name: "rload".to_string(),
                x: 40.0,
                y: 60.0,
                value: Some(220.0),
            }
        );
        assert_eq!(ast.statements[1].line, 2);
        assert!(matches!(
            ast.statements[1].action,
            Action::Place {
                kind: ComponentKind::Capacitor,
                value: None,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_directives() {
        let ast = parse(".frequency 1k\n.capacitorless bypass\n.sweep 10 500 5").unwrap();
        assert_eq!(ast.statements[0].action, Action::SetFrequency(1000.0));
        assert_eq!(
            ast.statements[1].action,
            Action::SetCapacitorless(CapacitorlessPolicy::Bypass)
        );
        assert_eq!(
            ast.statements[2].action,
            Action::SetSweep(SweepRange::new(10.0, 500.0, 5.0))
        );
    }

    #[test]
    fn test_parse_wire_commands() {
        let ast = parse("wire a.right b.left\nunwire b.l a.r").unwrap();
        assert_eq!(
            ast.statements[0].action,
            Action::Connect {
                from: TerminalRef {
                    name: "a".to_string(),
                    terminal: Terminal::Right
                },
                to: TerminalRef {
                    name: "b".to_string(),
                    terminal: Terminal::Left
                },
            }
        );
        assert!(matches!(ast.statements[1].action, Action::Disconnect { .. }));
    }

    #[test]
    fn test_parse_edit_commands() {
        let ast = parse("move r1 20 -40\nvalue r1 4.7k\ndelete r1\nclear").unwrap();
        assert_eq!(
            ast.statements[0].action,
            Action::Move {
                name: "r1".to_string(),
                x: 20.0,
                y: -40.0
            }
        );
        assert_eq!(
            ast.statements[1].action,
            Action::SetValue {
                name: "r1".to_string(),
                value: 4700.0
            }
        );
        assert_eq!(ast.statements[3].action, Action::Clear);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# RLC loop\n\nR r1 0 0 1k ; load\nL l1 40 0 100m # coil\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.statements.len(), 2);
        assert_eq!(ast.statements[1].line, 4);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse("Q q1 0 0"),
            Err(CircuitError::UnknownComponentKind { line: 1, .. })
        ));
        assert!(matches!(
            parse("R r1 0"),
            Err(CircuitError::ParseError { line: 1, .. })
        ));
        assert!(matches!(
            parse("\nwire a.top b.left"),
            Err(CircuitError::ParseError { line: 2, .. })
        ));
        assert!(matches!(
            parse(".tempo 120"),
            Err(CircuitError::ParseError { line: 1, .. })
        ));
        assert!(matches!(
            parse("R r1 0 0 1 2"),
            Err(CircuitError::ParseError { line: 1, .. })
        ));
        assert!(matches!(
            parse("value r1 1e400"),
            Err(CircuitError::InvalidValue { line: 1, .. })
        ));
    }
}
