//! Span tokenizer for annotated SQL scripts.

/// A contiguous span of input produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of span.
    pub kind: TokenKind,
    /// Verbatim text of the span.
    pub text: String,
    /// Byte offset of the span start in the input.
    pub offset: usize,
    /// Byte length of the span.
    pub length: usize,
}

/// The different kinds of spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Executable SQL text. String literals are emitted as CODE spans of
    /// their own, so code around an embedded string produces several
    /// adjacent CODE tokens.
    Code,
    /// A `--` line comment, without its line terminator.
    Comment,
    /// A single `;` statement separator.
    Semicolon,
}

/// Scanner state while walking the input.
enum State {
    /// Plain SQL text.
    Code,
    /// Inside a single-quoted string literal.
    InString,
    /// Inside a `--` line comment.
    InComment,
}

/// Split `input` into CODE, COMMENT and SEMICOLON spans.
///
/// Spans are contiguous and non-overlapping: concatenating the `text` of
/// every token in order reproduces `input` exactly. Inside a string literal
/// a doubled `''` is an escaped quote; `--` and `;` have no lexical meaning
/// there. An unterminated string or comment is closed by end of input.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).run()
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    span_start: usize,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            span_start: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        let bytes = self.input.as_bytes();
        let mut state = State::Code;

        while self.pos < bytes.len() {
            match state {
                State::Code => match bytes[self.pos] {
                    b';' => {
                        self.flush(TokenKind::Code);
                        self.pos += 1;
                        self.flush(TokenKind::Semicolon);
                    }
                    b'\'' => {
                        self.flush(TokenKind::Code);
                        self.pos += 1;
                        state = State::InString;
                    }
                    b'-' if bytes.get(self.pos + 1) == Some(&b'-') => {
                        self.flush(TokenKind::Code);
                        self.pos += 2;
                        state = State::InComment;
                    }
                    _ => self.pos += 1,
                },
                State::InString => match bytes[self.pos] {
                    // Doubled quote is an escaped quote, stay in the string.
                    b'\'' if bytes.get(self.pos + 1) == Some(&b'\'') => self.pos += 2,
                    b'\'' => {
                        self.pos += 1;
                        self.flush(TokenKind::Code);
                        state = State::Code;
                    }
                    _ => self.pos += 1,
                },
                State::InComment => match bytes[self.pos] {
                    // The terminator is not part of the comment; it opens
                    // the next CODE span.
                    b'\n' | b'\r' => {
                        self.flush(TokenKind::Comment);
                        state = State::Code;
                    }
                    _ => self.pos += 1,
                },
            }
        }

        match state {
            State::Code | State::InString => self.flush(TokenKind::Code),
            State::InComment => self.flush(TokenKind::Comment),
        }

        self.tokens
    }

    /// Emit the pending span as a token of `kind`, if it is non-empty.
    fn flush(&mut self, kind: TokenKind) {
        if self.pos > self.span_start {
            self.tokens.push(Token {
                kind,
                text: self.input[self.span_start..self.pos].to_string(),
                offset: self.span_start,
                length: self.pos - self.span_start,
            });
        }
        self.span_start = self.pos;
    }
}
