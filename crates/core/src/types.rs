/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A UTC calendar date. Streak bookkeeping compares these, never seeds.
pub type CalendarDay = chrono::NaiveDate;

/// Absolute or incremental quest score.
pub type Score = i64;
