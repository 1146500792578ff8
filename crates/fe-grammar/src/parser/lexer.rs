//! Lexer for the Fe language
//!
//! The lexer turns Fe source into a stream of tokens. Comments are kept as
//! tokens so the highlighter can see them; the parser treats them as extras.

use super::token::{Token, TokenKind};
use crate::ast::nodes::{IntSuffix, Span};

/// Lexer for tokenizing Fe source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
}

/// Start of the token currently being lexed
#[derive(Clone, Copy)]
struct Mark {
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer from source code
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let mark = self.mark();

        if self.is_at_end() {
            return self.finish(TokenKind::Eof, mark);
        }

        let ch = self.current_char();

        if ch == '/' {
            match self.peek_char() {
                Some('/') => return self.lex_line_comment(mark),
                Some('*') => return self.lex_block_comment(mark),
                _ => {}
            }
        }

        if ch == '"' {
            return self.lex_string(mark);
        }

        if ch.is_ascii_digit() {
            return self.lex_number(mark);
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            return self.lex_identifier_or_keyword(mark);
        }

        self.lex_punctuation(mark)
    }

    /// Tokenize all input, comments included
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Build a token spanning from `mark` to the current position
    fn finish(&self, kind: TokenKind, mark: Mark) -> Token {
        let text: String = self.input[mark.position..self.position].iter().collect();
        let span = Span::new(mark.offset, self.offset, mark.line, mark.column);
        Token::new(kind, text, span)
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn peek_char(&self) -> Option<char> {
        self.char_at(1)
    }

    fn char_at(&self, ahead: usize) -> Option<char> {
        self.input.get(self.position + ahead).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, ch)| self.char_at(i) == Some(ch))
    }

    fn advance(&mut self) -> char {
        let ch = self.current_char();
        self.position += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        ch
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn lex_line_comment(&mut self, mark: Mark) -> Token {
        while !self.is_at_end() && !matches!(self.current_char(), '\n' | '\r') {
            self.advance();
        }
        self.finish(TokenKind::Comment, mark)
    }

    fn lex_block_comment(&mut self, mark: Mark) -> Token {
        self.advance_by(2); // Skip "/*"

        while !self.is_at_end() {
            if self.starts_with("*/") {
                self.advance_by(2);
                return self.finish(TokenKind::Comment, mark);
            }
            self.advance();
        }

        self.finish(
            TokenKind::Error("Unterminated block comment".to_string()),
            mark,
        )
    }

    fn lex_string(&mut self, mark: Mark) -> Token {
        self.advance(); // Skip opening quote

        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.advance();

            match ch {
                '"' => return self.finish(TokenKind::StringLit(value), mark),
                '\\' => {
                    if self.is_at_end() {
                        break;
                    }
                    let escaped = self.current_char();
                    if matches!(escaped, '\n' | '\r') {
                        return self.finish(
                            TokenKind::Error("Invalid escape sequence in string literal".to_string()),
                            mark,
                        );
                    }
                    self.advance();
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        other => other,
                    });
                }
                other => value.push(other),
            }
        }

        self.finish(
            TokenKind::Error("Unterminated string literal".to_string()),
            mark,
        )
    }

    fn lex_number(&mut self, mark: Mark) -> Token {
        let is_hex = self.starts_with("0x")
            && self.char_at(2).is_some_and(|ch| ch.is_ascii_hexdigit());

        let mut digits = String::new();
        let radix = if is_hex {
            self.advance_by(2); // Skip "0x"
            while !self.is_at_end() && self.current_char().is_ascii_hexdigit() {
                digits.push(self.advance());
            }
            16
        } else {
            while !self.is_at_end() && self.current_char().is_ascii_digit() {
                digits.push(self.advance());
            }
            10
        };

        let suffix = [("u128", IntSuffix::U128), ("u64", IntSuffix::U64), ("u8", IntSuffix::U8)]
            .into_iter()
            .find(|(text, _)| self.starts_with(text));
        if let Some((text, _)) = suffix {
            self.advance_by(text.len());
        }
        let suffix = suffix.map(|(_, suffix)| suffix);

        // Fe literals may be wider than u128, e.g. 256-bit constants
        let value = u128::from_str_radix(&digits, radix).ok();
        self.finish(TokenKind::NumberLit { value, suffix }, mark)
    }

    fn lex_identifier_or_keyword(&mut self, mark: Mark) -> Token {
        let mut ident = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(self.advance());
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Ident(ident));
        self.finish(kind, mark)
    }

    fn lex_punctuation(&mut self, mark: Mark) -> Token {
        let two_char = [
            ("::", TokenKind::ColonColon),
            ("->", TokenKind::Arrow),
            ("=>", TokenKind::FatArrow),
        ]
        .into_iter()
        .find(|(text, _)| self.starts_with(text));

        if let Some((_, kind)) = two_char {
            self.advance_by(2);
            return self.finish(kind, mark);
        }

        let ch = self.advance();
        let kind = match ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Eq,
            '&' => TokenKind::Amp,
            _ => TokenKind::Error(format!("Unexpected character: {}", ch)),
        };

        self.finish(kind, mark)
    }
}
