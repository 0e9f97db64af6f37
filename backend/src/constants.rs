// =============================================================================
// Meet Backend Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

// =============================================================================
// ELIGIBILITY
// =============================================================================

/// Minimum age for holding or browsing a Meet card
pub const MIN_MEET_AGE: i64 = 18;

/// Minimum number of intent tags on a card
pub const MIN_INTENT_TAGS: usize = 1;

/// Maximum number of intent tags on a card
pub const MAX_INTENT_TAGS: usize = 5;

/// Maximum character count for a card bio
pub const BIO_CHAR_LIMIT: usize = 280;

// =============================================================================
// BROWSE / INBOX
// =============================================================================

/// Cards returned by browse when no limit is given
pub const BROWSE_TAKE_COUNT: i64 = 25;

/// Upper bound for the browse `limit` query parameter
pub const BROWSE_MAX_TAKE_COUNT: i64 = 50;

/// Outgoing requests shown in the inbox
pub const INBOX_OUTGOING_TAKE_COUNT: i64 = 20;

/// Notifications shown in the inbox
pub const INBOX_NOTIFICATIONS_TAKE_COUNT: i64 = 20;

// =============================================================================
// MODERATION
// =============================================================================

/// Minimum characters for a report reason
pub const REPORT_REASON_MIN_CHARS: usize = 4;

/// Maximum characters for a report reason
pub const REPORT_REASON_MAX_CHARS: usize = 280;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Maximum likes/passes per user per window
pub const SWIPE_RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Rate limit window duration in seconds
pub const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;

/// Rate limit bucket shared by likes and passes
pub const SWIPE_ACTION: &str = "swipe";

// =============================================================================
// IDENTITY
// =============================================================================

/// Header carrying the caller's opaque user id, set by the auth gateway
pub const USER_ID_HEADER: &str = "x-user-id";

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default database pool size
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
