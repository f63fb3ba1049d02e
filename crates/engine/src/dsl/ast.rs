use std::fmt;

use crate::dsl::fields::FieldName;

pub(crate) const KEYWORD_FROM: &str = "FROM";
pub(crate) const KEYWORD_WHERE: &str = "WHERE";
pub(crate) const KEYWORD_ON: &str = "ON";

/// Query verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select,
}

/// Registered commands, matched case-sensitively.
pub const COMMANDS: &[(&str, Command)] = &[("SELECT", Command::Select)];

impl Command {
    pub fn lookup(token: &str) -> Option<Command> {
        COMMANDS
            .iter()
            .find(|(kw, _)| *kw == token)
            .map(|&(_, cmd)| cmd)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Command::Select => "SELECT",
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    /// Bare `!`. Accepted by the grammar, has no evaluation semantics.
    Bang,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

/// Operator spellings. `=<` is an older spelling of `<=`.
pub const OPERATORS: &[(&str, Operator)] = &[
    ("=", Operator::Eq),
    ("!", Operator::Bang),
    ("!=", Operator::Ne),
    ("<", Operator::Lt),
    ("<=", Operator::Le),
    ("=<", Operator::Le),
    (">", Operator::Gt),
    (">=", Operator::Ge),
    ("LIKE", Operator::Like),
];

impl Operator {
    pub fn lookup(token: &str) -> Option<Operator> {
        OPERATORS
            .iter()
            .find(|(spelling, _)| *spelling == token)
            .map(|&(_, op)| op)
    }

    /// Canonical spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Bang => "!",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Like => "LIKE",
        }
    }

    #[inline]
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge
        )
    }
}

/// `field operator value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    field: FieldName,
    op: Operator,
    value: String,
}

impl Condition {
    pub fn new(field: FieldName, op: Operator, value: impl Into<String>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    pub fn field(&self) -> FieldName {
        self.field
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.field.keyword(),
            self.op.symbol(),
            quote_value(&self.value)
        )
    }
}

/// Parsed query plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    command: Command,
    fields: Vec<FieldName>,
    paths: Vec<String>,
    conditions: Vec<Condition>,
}

impl Query {
    pub fn new(
        command: Command,
        fields: Vec<FieldName>,
        paths: Vec<String>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            command,
            fields,
            paths,
            conditions,
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    /// Paths as written, before `~` expansion.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Multi-line diagnostic rendering. Parses back to an equal plan.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const INDENT: &str = "    ";

        let fields: Vec<&str> = self.fields.iter().map(|fd| fd.keyword()).collect();
        let paths: Vec<String> = self.paths.iter().map(|p| quote_path(p)).collect();

        writeln!(f, "{}", self.command.keyword())?;
        writeln!(f, "{INDENT}{}", fields.join(", "))?;
        writeln!(f, "{KEYWORD_FROM}")?;
        write!(f, "{INDENT}{}", paths.join(", "))?;

        if !self.conditions.is_empty() {
            write!(f, "\n{KEYWORD_WHERE}")?;
            for cond in &self.conditions {
                write!(f, "\n{INDENT}{cond}")?;
            }
        }
        Ok(())
    }
}

/// A value holding both quote characters can only have been written bare,
/// and so has no whitespace; it renders bare too.
fn quote_value(value: &str) -> String {
    let single = value.contains('\'');
    if single && value.contains('"') {
        value.to_string()
    } else if single {
        format!("\"{value}\"")
    } else {
        format!("'{value}'")
    }
}

fn quote_path(path: &str) -> String {
    let needs_quotes = path.is_empty()
        || path.starts_with(['"', '\''])
        || path == KEYWORD_WHERE
        || path == KEYWORD_ON
        || path.chars().any(|c| c == ',' || c.is_whitespace());

    if !needs_quotes {
        path.to_string()
    } else if path.contains('"') {
        format!("'{path}'")
    } else {
        format!("\"{path}\"")
    }
}
