pub mod config;
pub mod extract;
pub mod identity;
pub mod logging;

pub use config::Config;
pub use extract::{JsonBody, QueryParams};
pub use identity::CallerId;
pub use logging::init_logging;
