/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Raw integer reading for a single measurement channel.
pub type Reading = i32;
