/// Primary key type shared by every table (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Timestamps are always UTC; local time never enters the system.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
