pub mod meet;
pub mod rate_limit;

pub use meet::{Accepted, CardWrite, MeetService};
pub use rate_limit::RateLimiter;
