use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use log::debug;
use sqlfs_fs::{FileRecord, format_timestamp};

mod error;
mod helpers;

pub use error::EvalError;
pub use helpers::like_match;
use helpers::{ordering_satisfies, parse_date, parse_int};

use crate::dsl::{Condition, FieldName, Operator};

/// Records that passed the filter, keyed by path.
pub type ResultSet = BTreeMap<String, FileRecord>;

/// A record field projected for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(DateTime<Local>),
}

impl FieldValue {
    /// Canonical text form, the left-hand side of `=`, `!=` and `LIKE`.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Date(ts) => format_timestamp(ts),
        }
    }
}

/// Project `field` out of `record`.
pub fn project(field: FieldName, record: &FileRecord) -> Result<FieldValue, EvalError> {
    let value = match field {
        FieldName::All => return Err(EvalError::NotFilterable(field.keyword())),
        FieldName::Permission => FieldValue::Text(record.mode.render()),
        FieldName::Links => FieldValue::Integer(saturating_i64(record.links)),
        FieldName::Owner => FieldValue::Text(record.owner.clone()),
        FieldName::Group => FieldValue::Text(record.group.clone()),
        FieldName::FileSize => FieldValue::Integer(saturating_i64(record.size)),
        FieldName::LastMod => FieldValue::Date(record.modified),
        FieldName::CreatedAt => FieldValue::Date(record.created),
        FieldName::Name => FieldValue::Text(record.name.clone()),
        FieldName::Extension => FieldValue::Text(record.extension.clone()),
        FieldName::Path => FieldValue::Text(record.path.clone()),
        FieldName::Type => FieldValue::Text(record.kind.as_str().to_string()),
    };
    Ok(value)
}

/// Display text of a field; empty for `*`.
pub fn render_field(field: FieldName, record: &FileRecord) -> String {
    project(field, record)
        .map(|v| v.render())
        .unwrap_or_default()
}

/// Apply one condition to an already projected value.
pub fn compare(value: &FieldValue, cond: &Condition) -> Result<bool, EvalError> {
    let field = cond.field().keyword();
    let op = cond.op();
    let literal = cond.value();

    match op {
        Operator::Eq => Ok(value.render() == literal),
        Operator::Ne => Ok(value.render() != literal),
        Operator::Like => Ok(like_match(&value.render(), literal)),
        Operator::Bang => Err(EvalError::UnsupportedOperator(op.symbol())),
        Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => {
            let ord = match value {
                FieldValue::Integer(n) => n.cmp(&parse_int(field, op, literal)?),
                FieldValue::Date(ts) => ts.timestamp().cmp(&parse_date(field, literal)?),
                // Text fields only compare when both sides read as integers.
                FieldValue::Text(s) => parse_int(field, op, s)?.cmp(&parse_int(field, op, literal)?),
            };
            Ok(ordering_satisfies(ord, op))
        }
    }
}

/// True iff `record` satisfies every condition. Stops at the first miss.
pub fn passes(record: &FileRecord, conditions: &[Condition]) -> Result<bool, EvalError> {
    for cond in conditions {
        let value = project(cond.field(), record)?;
        if !compare(&value, cond)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Keep the records that pass all conditions. The first evaluation error
/// aborts the whole filter.
pub fn filter_records<I>(records: I, conditions: &[Condition]) -> Result<ResultSet, EvalError>
where
    I: IntoIterator<Item = FileRecord>,
{
    let mut out = ResultSet::new();
    let mut seen = 0usize;

    for record in records {
        seen += 1;
        if passes(&record, conditions)? {
            out.insert(record.path.clone(), record);
        }
    }

    debug!("[filter] {} of {seen} records passed", out.len());
    Ok(out)
}

#[inline]
fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
