//! Recursive-descent parser for facts, rules, asks, retracts and directives.

use thiserror::Error;

use super::ast::{Command, Directive};
use super::lexer::{LexError, Lexer, Token};
use crate::syntax::{Atom, Statement, Term};

/// Parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// Parser state.
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        let (line, column) = (lexer.token_line, lexer.token_column);
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let old = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        self.line = self.lexer.token_line;
        self.column = self.lexer.token_column;
        Ok(old)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!("expected {:?}, found {:?}", expected, self.current)))
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.current == Token::Eof {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing input: {:?}", self.current)))
        }
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}

/// Parse a source file into commands.
pub fn parse_file(source: &str) -> Result<Vec<Command>, ParseError> {
    let mut parser = Parser::new(source)?;
    let mut commands = Vec::new();

    while parser.current != Token::Eof {
        commands.push(parse_command_inner(&mut parser)?);
    }

    Ok(commands)
}

/// Parse exactly one command (a REPL line).
pub fn parse_command(source: &str) -> Result<Command, ParseError> {
    let mut parser = Parser::new(source)?;
    let command = parse_command_inner(&mut parser)?;
    parser.expect_end()?;
    Ok(command)
}

/// Parse exactly one bare statement, e.g. `(isa cube block)`.
pub fn parse_statement(source: &str) -> Result<Statement, ParseError> {
    let mut parser = Parser::new(source)?;
    let stmt = parse_statement_inner(&mut parser)?;
    parser.expect_end()?;
    Ok(stmt)
}

fn parse_command_inner(parser: &mut Parser) -> Result<Command, ParseError> {
    match &parser.current {
        Token::Colon => parse_directive(parser),
        Token::Query => {
            parser.advance()?;
            Ok(Command::Ask(parse_statement_inner(parser)?))
        }
        Token::Identifier(keyword) => {
            let keyword = keyword.clone();
            parser.advance()?;
            parser.expect(Token::Colon)?;
            match keyword.as_str() {
                "fact" => Ok(Command::Fact(parse_statement_inner(parser)?)),
                "rule" => parse_rule(parser),
                "ask" => Ok(Command::Ask(parse_statement_inner(parser)?)),
                "retract" => Ok(Command::Retract(parse_statement_inner(parser)?)),
                _ => Err(parser.error(format!("unknown command: {}", keyword))),
            }
        }
        other => Err(parser.error(format!("expected a command, found {:?}", other))),
    }
}

fn parse_directive(parser: &mut Parser) -> Result<Command, ParseError> {
    parser.expect(Token::Colon)?;

    let name = match &parser.current {
        Token::Identifier(name) => name.clone(),
        _ => return Err(parser.error("expected directive name after ':'".to_string())),
    };
    parser.advance()?;

    let directive = match name.as_str() {
        "load" => match &parser.current {
            Token::StringLit(path) => {
                let path = path.clone();
                parser.advance()?;
                Directive::Load(path)
            }
            _ => return Err(parser.error("expected string literal after :load".to_string())),
        },
        "set" => {
            let key = parse_word(parser, "expected setting name after :set")?;
            let value = parse_word(parser, "expected setting value after setting name")?;
            Directive::Set(key, value)
        }
        "show" => Directive::Show,
        "dump" => Directive::Dump,
        "help" => Directive::Help,
        "quit" => Directive::Quit,
        _ => return Err(parser.error(format!("unknown directive: {}", name))),
    };
    Ok(Command::Directive(directive))
}

fn parse_word(parser: &mut Parser, message: &str) -> Result<String, ParseError> {
    match &parser.current {
        Token::Identifier(word) => {
            let word = word.clone();
            parser.advance()?;
            Ok(word)
        }
        _ => Err(parser.error(message.to_string())),
    }
}

/// `((p ?x) (q ?x)) -> (r ?x)`; a single antecedent may drop the outer parens.
fn parse_rule(parser: &mut Parser) -> Result<Command, ParseError> {
    let lhs = match &parser.current {
        Token::Not => vec![parse_statement_inner(parser)?],
        Token::LParen => {
            parser.advance()?;
            if let Token::Identifier(_) = parser.current {
                vec![parse_statement_body(parser, true)?]
            } else {
                let mut lhs = Vec::new();
                while parser.current != Token::RParen {
                    lhs.push(parse_statement_inner(parser)?);
                }
                parser.advance()?;
                if lhs.is_empty() {
                    return Err(parser.error("rule needs at least one antecedent".to_string()));
                }
                lhs
            }
        }
        other => {
            return Err(parser.error(format!("expected rule antecedents, found {:?}", other)))
        }
    };
    parser.expect(Token::Implies)?;
    let rhs = parse_statement_inner(parser)?;
    Ok(Command::Rule { lhs, rhs })
}

fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    let positive = if parser.current == Token::Not {
        parser.advance()?;
        false
    } else {
        true
    };
    parser.expect(Token::LParen)?;
    parse_statement_body(parser, positive)
}

/// Parse `pred term* )` after the opening paren.
fn parse_statement_body(parser: &mut Parser, positive: bool) -> Result<Statement, ParseError> {
    let predicate = parse_word(parser, "expected predicate name")?;
    let mut args = Vec::new();
    while parser.current != Token::RParen {
        args.push(parse_term(parser)?);
    }
    parser.advance()?;
    let atom = Atom::new(predicate, args);
    Ok(if positive {
        Statement::positive(atom)
    } else {
        Statement::negative(atom)
    })
}

fn parse_term(parser: &mut Parser) -> Result<Term, ParseError> {
    match parser.advance()? {
        Token::Variable(name) => Ok(Term::var(name)),
        Token::Identifier(name) => Ok(Term::constant(name)),
        Token::LParen => {
            let name = parse_word(parser, "expected function symbol")?;
            let mut args = Vec::new();
            while parser.current != Token::RParen {
                args.push(parse_term(parser)?);
            }
            parser.advance()?;
            Ok(Term::app(name, args))
        }
        Token::Eof => Err(parser.error("unexpected end of input in statement".to_string())),
        other => Err(parser.error(format!("expected a term, found {:?}", other))),
    }
}
