pub mod cards;
pub mod inbox;
pub mod matches;
pub mod notifications;
pub mod requests;
pub mod social;

pub use cards::{Card, CardPatch, CardPayload, CardSummary, Gender, LookingFor, NewCard};
pub use inbox::Inbox;
pub use matches::{Match, ordered_pair};
pub use notifications::{NewNotification, Notification, NotificationKind};
pub use requests::{LikeRequest, RequestStatus};
pub use social::Report;
