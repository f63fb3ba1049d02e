use std::cmp::Ordering;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::{Operator, eval::error::EvalError};

/// Whether `ord` satisfies one of `<`, `<=`, `>`, `>=`. Never true for
/// any other operator.
#[inline]
pub fn ordering_satisfies(ord: Ordering, op: Operator) -> bool {
    op.is_ordering()
        && match op {
            Operator::Lt => ord.is_lt(),
            Operator::Le => ord.is_le(),
            Operator::Gt => ord.is_gt(),
            _ => ord.is_ge(),
        }
}

/// Base-10 signed integer, as used by the ordering operators.
pub fn parse_int(field: &'static str, op: Operator, value: &str) -> Result<i64, EvalError> {
    value
        .parse::<i64>()
        .map_err(|_| EvalError::NonNumericOperand {
            field,
            op: op.symbol(),
            value: value.to_string(),
        })
}

/// Date literal to epoch seconds, interpreted in local time.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` (midnight) or plain epoch
/// seconds.
pub fn parse_date(field: &'static str, value: &str) -> Result<i64, EvalError> {
    let invalid = || EvalError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    match naive {
        // DST gaps have no local time; folds pick the earlier instant.
        Some(ndt) => Local
            .from_local_datetime(&ndt)
            .earliest()
            .map(|dt| dt.timestamp())
            .ok_or_else(invalid),
        None => value.parse::<i64>().map_err(|_| invalid()),
    }
}

/// SQL `LIKE`: `%` matches any run of characters, `_` exactly one.
/// Case-sensitive, no escape character.
pub fn like_match(text: &str, pattern: &str) -> bool {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();

    let (mut ti, mut pi) = (0, 0);
    // Last `%` seen: (pattern index after it, text index it currently absorbs up to)
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && p[pi] == '%' {
            pi += 1;
            backtrack = Some((pi, ti));
        } else if pi < p.len() && (p[pi] == '_' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if let Some((after_pct, absorbed)) = backtrack {
            pi = after_pct;
            ti = absorbed + 1;
            backtrack = Some((after_pct, ti));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&c| c == '%')
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
