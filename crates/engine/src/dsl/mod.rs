mod ast;
mod cursor;
mod error;
mod fields;
mod parser;

pub use ast::{COMMANDS, Command, Condition, OPERATORS, Operator, Query};
pub use cursor::{Cursor, is_whitespace};
pub use error::ParseError;
pub use fields::{DEFAULT_COLUMNS, FIELD_TABLE, FieldDef, FieldName, ValueKind, expand_fields};
pub use parser::{Parser, parse_query};
