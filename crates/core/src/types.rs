/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar day of a sample (`REG_DATE`).
pub type SampleDate = chrono::NaiveDate;
