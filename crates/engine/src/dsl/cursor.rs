use crate::dsl::error::ParseError;

/// Forward-only cursor over the raw query text.
///
/// Positions are byte offsets; characters are decoded as UTF-8 so paths with
/// non-ASCII names survive `consume_while` intact.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    size: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            size: input.len(),
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder of the input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos.min(self.size)..]
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.size
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume one character. Callers are expected to check `eof()` first.
    pub fn advance(&mut self) -> Result<char, ParseError> {
        let c = self.peek().ok_or(ParseError::UnexpectedEnd(self.pos))?;
        self.pos += c.len_utf8();
        Ok(c)
    }

    pub fn consume_while<F>(&mut self, mut pred: F) -> String
    where
        F: FnMut(char) -> bool,
    {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.pos += c.len_utf8();
        }
        out
    }

    pub fn consume_whitespace(&mut self) {
        while !self.eof() && is_whitespace(self.peek()) {
            self.pos += 1;
        }
    }

    /// Case-sensitive prefix test on the remaining input. False at EOF.
    #[inline]
    pub fn starts_with(&self, literal: &str) -> bool {
        !literal.is_empty() && self.rest().starts_with(literal)
    }

    /// Skip `literal` if the remaining input starts with it.
    pub fn consume_literal(&mut self, literal: &str) -> bool {
        if self.starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }
}

/// A missing character counts as whitespace so scans terminate at EOF.
#[inline]
pub fn is_whitespace(c: Option<char>) -> bool {
    matches!(c, None | Some(' ' | '\n' | '\r' | '\t'))
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
