use log::debug;

use crate::dsl::ast::{
    Command, Condition, KEYWORD_FROM, KEYWORD_ON, KEYWORD_WHERE, Operator, Query,
};
use crate::dsl::cursor::{Cursor, is_whitespace};
use crate::dsl::error::ParseError;
use crate::dsl::fields::FieldName;

/// Inputs shorter than this are rejected before parsing.
const MIN_INPUT_LEN: usize = 2;

/// Recursive-descent parser over a single forward-only cursor.
///
/// Every clause is introduced by a fixed keyword, so prefix matching on the
/// cursor is enough and no token buffer is needed.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        if input.len() < MIN_INPUT_LEN {
            return Err(ParseError::EmptyInput);
        }
        Ok(Self {
            cursor: Cursor::new(input),
        })
    }

    pub fn parse(mut self) -> Result<Query, ParseError> {
        self.cursor.consume_whitespace();
        if self.cursor.eof() {
            return Err(ParseError::EmptyQuery);
        }

        let command = self.parse_command()?;
        let fields = self.parse_fields()?;
        let paths = self.parse_paths()?;
        let conditions = self.parse_conditions()?;

        debug!(
            "[parser] {} fields, {} paths, {} conditions",
            fields.len(),
            paths.len(),
            conditions.len()
        );

        Ok(Query::new(command, fields, paths, conditions))
    }

    /// Keyword followed by whitespace or EOF.
    fn at_keyword(&self, keyword: &str) -> bool {
        self.cursor
            .rest()
            .strip_prefix(keyword)
            .is_some_and(|after| is_whitespace(after.chars().next()))
    }

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        let token = self.cursor.consume_while(|c| !is_whitespace(Some(c)));
        Command::lookup(&token).ok_or(ParseError::UnknownCommand(token))
    }

    fn parse_fields(&mut self) -> Result<Vec<FieldName>, ParseError> {
        let mut fields = Vec::new();
        loop {
            self.cursor.consume_whitespace();
            if self.cursor.eof() || self.at_keyword(KEYWORD_FROM) {
                break;
            }
            if self.cursor.peek() == Some(',') {
                self.cursor.advance()?;
                continue;
            }
            fields.push(self.parse_field_name()?);
        }

        if fields.is_empty() {
            return Err(ParseError::NoFields);
        }
        Ok(fields)
    }

    fn parse_field_name(&mut self) -> Result<FieldName, ParseError> {
        match self.cursor.peek() {
            Some('"') => {
                let name = self.consume_quoted('"')?;
                FieldName::lookup(&name).ok_or(ParseError::UnknownField(name))
            }
            Some('*') => {
                self.cursor.advance()?;
                Ok(FieldName::All)
            }
            _ => {
                let name = self.cursor.consume_while(is_field_char);
                FieldName::lookup(&name).ok_or(ParseError::UnknownField(name))
            }
        }
    }

    fn parse_paths(&mut self) -> Result<Vec<String>, ParseError> {
        if !self.at_keyword(KEYWORD_FROM) {
            return Err(ParseError::MissingFrom);
        }
        self.cursor.consume_literal(KEYWORD_FROM);

        let mut paths = Vec::new();
        loop {
            self.cursor.consume_whitespace();
            if self.cursor.eof() || self.at_keyword(KEYWORD_WHERE) || self.at_keyword(KEYWORD_ON) {
                break;
            }
            let path = match self.cursor.peek() {
                Some(',') => {
                    self.cursor.advance()?;
                    continue;
                }
                Some(q @ ('"' | '\'')) => self.consume_quoted(q)?,
                _ => self
                    .cursor
                    .consume_while(|c| c != ',' && !is_whitespace(Some(c))),
            };
            paths.push(path);
        }

        if paths.is_empty() {
            return Err(ParseError::MissingFrom);
        }
        Ok(paths)
    }

    /// Zero or one condition. Anything after the first condition is rejected
    /// rather than silently ignored.
    fn parse_conditions(&mut self) -> Result<Vec<Condition>, ParseError> {
        self.cursor.consume_whitespace();
        if self.cursor.eof() {
            return Ok(Vec::new());
        }
        if self.at_keyword(KEYWORD_ON) {
            return Err(ParseError::UnsupportedClause(KEYWORD_ON.to_string()));
        }

        self.cursor.consume_literal(KEYWORD_WHERE);
        self.cursor.consume_whitespace();
        if self.cursor.eof() {
            return Err(ParseError::MissingCondition);
        }

        let condition = self.parse_condition()?;

        self.cursor.consume_whitespace();
        if !self.cursor.eof() {
            return Err(ParseError::TrailingInput(self.cursor.rest().to_string()));
        }
        Ok(vec![condition])
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let field = self.parse_field_name()?;
        if !field.is_filterable() {
            return Err(ParseError::NotFilterable(field.keyword().to_string()));
        }

        self.cursor.consume_whitespace();
        let op = self.parse_operator()?;

        self.cursor.consume_whitespace();
        let value = match self.cursor.peek() {
            Some(q @ ('\'' | '"')) => self.consume_quoted(q)?,
            Some(_) => self.cursor.consume_while(|c| !is_whitespace(Some(c))),
            None => return Err(ParseError::MissingValue(op.symbol().to_string())),
        };

        Ok(Condition::new(field, op, value))
    }

    fn parse_operator(&mut self) -> Result<Operator, ParseError> {
        let token = match self.cursor.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                self.cursor.consume_while(|c| c.is_ascii_alphabetic())
            }
            _ => self.cursor.consume_while(is_operator_char),
        };
        Operator::lookup(&token).ok_or(ParseError::UnknownOperator(token))
    }

    /// Consume a quoted literal without escape handling. The cursor must be
    /// on the opening quote.
    fn consume_quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance()?;
        let content = self.cursor.consume_while(|c| c != quote);
        if self.cursor.eof() {
            return Err(ParseError::UnterminatedQuote(start));
        }
        self.cursor.advance()?;
        Ok(content)
    }
}

#[inline]
fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>')
}

#[inline]
fn is_field_char(c: char) -> bool {
    !is_whitespace(Some(c)) && !is_operator_char(c) && c != ',' && c != '"'
}

/// Public entry point
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    Parser::new(input)?.parse()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
