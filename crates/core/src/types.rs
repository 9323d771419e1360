/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Monetary amounts (`NUMERIC(10,2)` columns).
pub type Money = rust_decimal::Decimal;

/// Calendar dates (`DATE` columns), serialized as `YYYY-MM-DD`.
pub type Date = chrono::NaiveDate;
