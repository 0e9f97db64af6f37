pub mod browse;
pub mod cards;
pub mod inbox;
pub mod requests;
pub mod social;

pub use browse::browse_cards;
pub use cards::{get_card, update_card, upsert_card};
pub use inbox::get_inbox;
pub use requests::{accept_request, like_user, reject_request};
pub use social::{block_user, follow_user, pass_user, report_user, unfollow_user};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
