//! Statement assembly from tokenizer spans.

use super::tokenizer::{TokenKind, tokenize};

/// One SQL statement with its optional table-name annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Target table name taken from the statement's first `--` comment, with
    /// the comment marker stripped and the remainder trimmed.
    pub table_name: Option<String>,
    /// Trimmed statement text.
    pub text: String,
}

impl Query {
    /// Create a statement from an optional table name and its text.
    pub fn new(table_name: Option<String>, text: impl Into<String>) -> Self {
        Self {
            table_name,
            text: text.into(),
        }
    }
}

/// Parse annotated SQL text into its statements.
///
/// CODE spans accumulate into the statement text; the first COMMENT span
/// before a statement's terminating semicolon (or end of input) supplies the
/// table name; SEMICOLON spans split statements. Statements whose trimmed
/// text is empty are dropped, so bare `;` separators and comment-only
/// fragments disappear.
#[must_use]
pub fn parse_queries(text: &str) -> Vec<Query> {
    let mut parser = Parser::default();

    for token in tokenize(text) {
        match token.kind {
            TokenKind::Code => parser.text.push_str(&token.text),
            TokenKind::Comment => {
                if parser.first_comment.is_none() {
                    parser.first_comment = Some(token.text);
                }
            }
            TokenKind::Semicolon => parser.push_query(),
        }
    }

    // A trailing statement without `;` is still a statement.
    parser.push_query();
    parser.queries
}

#[derive(Default)]
struct Parser {
    queries: Vec<Query>,
    text: String,
    first_comment: Option<String>,
}

impl Parser {
    /// Finalize the pending statement and reset the accumulation state.
    fn push_query(&mut self) {
        let text = self.text.trim();

        if !text.is_empty() {
            // Comment tokens always start with the two marker characters.
            let table_name = self
                .first_comment
                .as_deref()
                .map(|comment| comment[2..].trim().to_string());

            self.queries.push(Query::new(table_name, text));
        }

        self.text.clear();
        self.first_comment = None;
    }
}
