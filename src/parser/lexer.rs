//! Lexer for the knowledge-base surface syntax.

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Identifiers
    Identifier(String), // constants, predicates, keywords
    Variable(String),   // ?name, stored without the '?'

    // Delimiters
    LParen, // (
    RParen, // )

    // Operators
    Not,     // ~ or ¬
    Implies, // -> or →

    // Query shorthand
    Query, // ?-

    // Keyword / directive separator
    Colon, // :

    // String literal
    StringLit(String),

    // End of input
    Eof,
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    /// Location of the start of the most recently lexed token.
    pub token_line: usize,
    pub token_column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        self.token_line = self.line;
        self.token_column = self.column;

        let remaining = &self.input[self.position..];
        let Some(ch) = remaining.chars().next() else {
            return Ok(Token::Eof);
        };

        match ch {
            '(' => {
                self.advance(1);
                return Ok(Token::LParen);
            }
            ')' => {
                self.advance(1);
                return Ok(Token::RParen);
            }
            ':' => {
                self.advance(1);
                return Ok(Token::Colon);
            }
            '~' => {
                self.advance(1);
                return Ok(Token::Not);
            }
            '¬' | '→' => {
                self.advance(ch.len_utf8());
                return Ok(if ch == '¬' { Token::Not } else { Token::Implies });
            }
            '-' if remaining.starts_with("->") => {
                self.advance(2);
                return Ok(Token::Implies);
            }
            '?' if remaining.starts_with("?-") => {
                self.advance(2);
                return Ok(Token::Query);
            }
            '?' => {
                self.advance(1);
                let name = self.take_symbol();
                if name.is_empty() {
                    return Err(self.error("expected variable name after '?'"));
                }
                return Ok(Token::Variable(name));
            }
            '"' => {
                return self.lex_string();
            }
            _ => {}
        }

        if is_symbol_char(ch) {
            return Ok(Token::Identifier(self.take_symbol()));
        }

        Err(self.error(&format!("unexpected character: '{}'", ch)))
    }

    fn error(&self, message: &str) -> LexError {
        LexError {
            message: message.to_string(),
            line: self.token_line,
            column: self.token_column,
        }
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.input[self.position..self.position + bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += bytes;
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            let remaining = &self.input[self.position..];
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else if ch == '#' || remaining.starts_with("//") {
                while let Some(c) = self.peek_char() {
                    self.advance(c.len_utf8());
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn take_symbol(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if is_symbol_char(ch) {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
        self.input[start..self.position].to_string()
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        // Skip opening quote
        self.advance(1);
        let start = self.position;

        while let Some(ch) = self.peek_char() {
            if ch == '"' {
                let content = self.input[start..self.position].to_string();
                self.advance(1);
                return Ok(Token::StringLit(content));
            } else if ch == '\n' {
                break;
            }
            self.advance(ch.len_utf8());
        }

        Err(self.error("unterminated string literal"))
    }
}

fn is_symbol_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.' || ch == '\''
}

/// Lexer error.
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
