/// Grammar and construction failures. Every variant names the offending
/// token or position so the message can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,

    #[error("empty query")]
    EmptyQuery,

    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),

    #[error("parse command: unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("parse fields: unknown field name \"{0}\"")]
    UnknownField(String),

    #[error("parse fields: no field selected")]
    NoFields,

    #[error("parse paths: missing FROM paths")]
    MissingFrom,

    #[error("parse conditions: missing condition after WHERE")]
    MissingCondition,

    #[error("parse conditions: field \"{0}\" cannot be used in a condition")]
    NotFilterable(String),

    #[error("parse conditions: unknown operator \"{0}\"")]
    UnknownOperator(String),

    #[error("parse conditions: missing value after operator \"{0}\"")]
    MissingValue(String),

    #[error("unterminated quote starting at byte {0}")]
    UnterminatedQuote(usize),

    #[error("unsupported clause \"{0}\"")]
    UnsupportedClause(String),

    #[error("unexpected input after condition: \"{0}\"")]
    TrailingInput(String),
}
