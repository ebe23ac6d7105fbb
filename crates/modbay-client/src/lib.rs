//! HTTP client SDK for the Modbay marketplace API.
//!
//! This crate provides a typed, async client for the Modbay API:
//! conversations, messaging, licensing, resource update feeds, and health.
//! Every response arrives as an [`Envelope`] carrying either the typed
//! payload or the server's error detail; transport faults are reported
//! separately as [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use modbay_client::{ConversationContent, MessageContent, ModbayClient, TokenKind};
//!
//! # async fn example() -> modbay_client::Result<()> {
//! // Create a client with a private token
//! let client = ModbayClient::new(TokenKind::Private, "secret")?;
//!
//! // Check API health
//! if client.health().is_healthy().await {
//!     println!("API is up!");
//! }
//!
//! // Start a conversation
//! let content = ConversationContent::new([42u64], "Hello", "First message");
//! match client.conversations().start(&content).await?.into_result() {
//!     Ok(conversation_id) => {
//!         // Reply into it
//!         client
//!             .messages()
//!             .reply(conversation_id, &MessageContent::new("Follow-up"))
//!             .await?;
//!     }
//!     Err(error) => eprintln!("API refused: {}", error),
//! }
//!
//! // Drain unread replies, oldest first
//! if let Some(replies) = client.messages().unread_replies(7).await?.data() {
//!     for reply in replies.iter().rev() {
//!         println!("[{}] {}", reply.author_id, reply.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Conversations**: List unread conversations, start new ones
//! - **Messages**: List unread replies, send replies
//! - **Licenses**: Fetch the member's license, issue and modify licenses
//! - **Updates**: Page through a resource's update feed
//! - **Health**: API liveness checks

pub mod api;
pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod types;

pub use auth::{AuthToken, TokenKind};
pub use client::{ClientBuilder, ModbayClient, DEFAULT_BASE_URL};
pub use envelope::{Envelope, ErrorCode, ErrorDetail};
pub use error::{Error, Result};
pub use types::*;

// Re-export API types that are commonly used with query methods
pub use api::ListUpdatesQuery;
