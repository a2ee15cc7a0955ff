use crate::source::{CharSource, ReaderSource, TextSource};
use crate::token::{Span, Token, TokenKind, TokenType};
use crate::LexerError;
use std::io::BufRead;

/// Browsr document lexer.
///
/// Pull-based: holds exactly one current token plus one pending unread
/// character, and computes the next token only when `advance` is called.
/// Switches between two modes:
/// - outside a tag, input is split into whitespace-separated text runs
///   and `<name` / `</name` tag openers
/// - inside a tag, input is split into attribute names, `=`, quoted
///   strings and the closing `>`
pub struct Lexer<S> {
    source: S,
    pending: Option<char>,
    exhausted: bool,
    inside_tag: bool,
    token: Token,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<TextSource<'a>> {
    /// Create a lexer over an in-memory document.
    pub fn for_text(text: &'a str) -> Result<Self, LexerError> {
        Self::new(TextSource::new(text))
    }
}

impl<R: BufRead> Lexer<ReaderSource<R>> {
    /// Create a lexer over a UTF-8 byte stream.
    pub fn for_reader(reader: R) -> Result<Self, LexerError> {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Lexer<S> {
    /// Create a lexer and compute its first token.
    pub fn new(source: S) -> Result<Self, LexerError> {
        let mut lexer = Self {
            source,
            pending: None,
            exhausted: false,
            inside_tag: false,
            token: Token::new(TokenKind::Eof, Span::new(0, 0, 1, 1)),
            pos: 0,
            line: 1,
            column: 1,
        };
        lexer.advance()?;
        Ok(lexer)
    }

    /// The current token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn token_type(&self) -> TokenType {
        self.token.kind.token_type()
    }

    /// Payload of the current token; empty for `CloseTag`, `Equals` and `Eof`.
    pub fn value(&self) -> &str {
        self.token.kind.value()
    }

    /// Discard the current token and scan the next one.
    ///
    /// Once end of input is reached every further call yields `Eof` again.
    pub fn advance(&mut self) -> Result<(), LexerError> {
        self.token = if self.inside_tag {
            self.scan_in_tag()?
        } else {
            self.scan_content()?
        };
        log::trace!(
            "token {} at {}:{}",
            self.token.kind,
            self.token.span.line,
            self.token.span.column
        );
        Ok(())
    }

    /// Give back the current token and advance past it.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        let token = self.token.clone();
        self.advance()?;
        Ok(token)
    }

    // --- Scanners ---

    /// Scan a token outside of a tag: text run, tag opener or EOF.
    fn scan_content(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace()?;
        let (start, line, column) = self.mark();

        let kind = match self.peek()? {
            None => TokenKind::Eof,
            Some('<') => {
                self.bump();
                self.inside_tag = true;
                let closing = self.peek()? == Some('/');
                if closing {
                    self.bump();
                }
                let name = self.take_while(|c| !c.is_whitespace() && c != '>')?;
                if closing {
                    TokenKind::OpenEndTag(name)
                } else {
                    TokenKind::OpenStartTag(name)
                }
            }
            Some(_) => TokenKind::Text(self.take_while(|c| !c.is_whitespace() && c != '<')?),
        };

        Ok(Token::new(kind, Span::new(start, self.pos, line, column)))
    }

    /// Scan a token inside a tag: `>`, `=`, quoted string, attribute name or EOF.
    fn scan_in_tag(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace()?;
        let (start, line, column) = self.mark();

        let kind = match self.peek()? {
            None => TokenKind::Eof,
            Some('>') => {
                self.bump();
                self.inside_tag = false;
                TokenKind::CloseTag
            }
            Some('=') => {
                self.bump();
                TokenKind::Equals
            }
            Some('"') => self.scan_quoted_string(line, column)?,
            Some(_) => TokenKind::Identifier(
                self.take_while(|c| !c.is_whitespace() && c != '=' && c != '>')?,
            ),
        };

        Ok(Token::new(kind, Span::new(start, self.pos, line, column)))
    }

    /// Scan `"..."` verbatim. There are no escape sequences.
    fn scan_quoted_string(&mut self, line: usize, column: usize) -> Result<TokenKind, LexerError> {
        self.bump(); // consume opening quote

        let value = self.take_while(|c| c != '"')?;

        if self.peek()?.is_none() {
            return Err(LexerError::Syntax {
                message: "Unterminated quoted string".into(),
                line,
                column,
            });
        }

        self.bump(); // consume closing quote
        Ok(TokenKind::QuotedString(value))
    }

    // --- Helpers ---

    fn skip_whitespace(&mut self) -> Result<(), LexerError> {
        while self.peek()?.is_some_and(char::is_whitespace) {
            self.bump();
        }
        Ok(())
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> Result<String, LexerError> {
        let mut out = String::new();
        while let Some(c) = self.peek()? {
            if !accept(c) {
                break;
            }
            out.push(c);
            self.bump();
        }
        Ok(out)
    }

    /// Look at the pending character, pulling one from the source if needed.
    fn peek(&mut self) -> Result<Option<char>, LexerError> {
        if self.pending.is_none() && !self.exhausted {
            self.pending = self.source.next_char()?;
            self.exhausted = self.pending.is_none();
        }
        Ok(self.pending)
    }

    /// Consume the pending character. Callers must `peek` first.
    fn bump(&mut self) {
        if let Some(c) = self.pending.take() {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn mark(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.column)
    }
}

impl Lexer<TextSource<'_>> {
    /// Tokenize an entire document into a vector of tokens, ending with `Eof`.
    pub fn tokenize(text: &str) -> Result<Vec<Token>, LexerError> {
        let mut lexer = Lexer::for_text(text)?;
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
