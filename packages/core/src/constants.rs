// ABOUTME: Shared constants for channels and identifier prefixes
// ABOUTME: Keeps well-known channel names and id prefixes in one place

/// Company-wide chat channel
pub const GENERAL_CHANNEL: &str = "general";

/// Read-mostly announcements channel
pub const ANNOUNCEMENTS_CHANNEL: &str = "announcements";

// Identifier prefixes used when the store generates ids
pub const PROJECT_ID_PREFIX: &str = "proj";
pub const TASK_ID_PREFIX: &str = "task";
pub const COMMENT_ID_PREFIX: &str = "cmt";
pub const MESSAGE_ID_PREFIX: &str = "msg";
pub const DOCUMENT_ID_PREFIX: &str = "doc";
pub const NOTIFICATION_ID_PREFIX: &str = "ntf";
pub const CHANGE_REQUEST_ID_PREFIX: &str = "cr";
pub const TRANSACTION_ID_PREFIX: &str = "tx";
pub const MILESTONE_ID_PREFIX: &str = "ms";

/// Length of the random part of generated ids
pub const GENERATED_ID_LENGTH: usize = 10;
