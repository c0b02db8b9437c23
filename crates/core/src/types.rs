/// Catalog item identifiers are free-form strings (`"top1"`, `"ken-hair1"`).
pub type ItemId = String;

/// Styling sessions are keyed by random v4 UUIDs.
pub type SessionId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
