//! Typed Rust client for the BulkSMS EAPI HTTP gateway.
//!
//! The crate is split into a domain layer of validated types, a transport layer
//! for the gateway's form-encoded requests and pipe-delimited replies, and a
//! small client layer orchestrating the two calls the gateway offers: querying
//! the account credit balance and submitting a message.
//!
//! ```rust,no_run
//! use bulksms::{Credentials, GatewayClient, Message, RoutingGroup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bulksms::BulkSmsError> {
//!     let client = GatewayClient::new(Credentials::new("user", "secret")?);
//!     println!("credits: {}", client.get_credits().await?);
//!
//!     let mut message = Message::new("hello", ["+4915112345678"])?;
//!     message.set_routing_group(RoutingGroup::Premium);
//!     client.send(&mut message).await?;
//!     println!("{}", message.status_report());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{
    BulkSmsError, Credentials, GatewayClient, GatewayClientBuilder, GatewayError,
};
pub use config::{ConfigError, GatewayConfig};
pub use domain::{
    BatchId, KnownStatusCode, Message, MessageText, Msisdn, Password, PhoneNumber, RoutingGroup,
    SendState, SenderId, StatusCode, TestingMode, Username, ValidationError,
};
pub use transport::ReplyError;
