/// Failures while applying a condition to a record. Any of these aborts the
/// whole filter; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("operator \"{op}\" on {field} needs integer operands, got \"{value}\"")]
    NonNumericOperand {
        field: &'static str,
        op: &'static str,
        value: String,
    },

    #[error("invalid date \"{value}\" for {field}, expected YYYY-MM-DD, YYYY-MM-DD HH:MM:SS or epoch seconds")]
    InvalidDate { field: &'static str, value: String },

    #[error("unknown operator \"{0}\"")]
    UnsupportedOperator(&'static str),

    #[error("field \"{0}\" cannot be compared")]
    NotFilterable(&'static str),
}
