//! API endpoint implementations.

mod conversations;
mod health;
mod licenses;
mod messages;
mod updates;

pub use conversations::ConversationsApi;
pub use health::HealthApi;
pub use licenses::LicensesApi;
pub use messages::MessagesApi;
pub use updates::{ListUpdatesQuery, UpdatesApi};
