pub mod query;

pub use query::QueryArgs;
