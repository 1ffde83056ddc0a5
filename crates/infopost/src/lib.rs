//! Iroquois infopost client.
//!
//! This crate replays the router protocol used by the Iroquois Gas
//! Transmission infopost pages to read Operationally Available Capacity
//! postings, one gas day per request.
//!
//! # Overview
//!
//! The router endpoint takes a fixed pair of encoded selectors (`class`,
//! `type`) plus an encoded JSON payload naming the gas day, the cycle and the
//! location scope. It answers with either a JSON array of records or an object
//! keyed by stringified indices.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  InfopostClient  | --> |   RouterQuery    |  (date -> encoded params)
//! +------------------+     +------------------+
//!          |                        |
//!          |                        v
//!          |               +------------------+
//!          |               |  RequestCodec    |  (base64 by default)
//!          |               +------------------+
//!          v
//! +------------------+     +------------------+
//! | RouterTransport  | --> | flatten_response |  (array / numeric-keyed object)
//! +------------------+     +------------------+
//!                                   |
//!                                   v
//!                          +------------------+
//!                          |   RawRecord[]    |  (statusCode filtered)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`InfopostClient`] - Fetches the raw records of one gas day, with retry
//! - [`InfopostConfig`] - Endpoint URLs, selectors and request settings
//! - [`RetryPolicy`] - Attempt budget and exponential backoff
//! - [`RequestCodec`] - Pluggable reversible encoding of request parameters
//! - [`RouterTransport`] - HTTP seam; [`HttpTransport`] is the reqwest implementation
//! - [`InfopostError`] - Errors, classified by [`RetryClass`]

pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod models;
pub mod response;
pub mod transport;

pub use client::InfopostClient;
pub use codec::{Base64Codec, RequestCodec};
pub use config::{InfopostConfig, RetryPolicy};
pub use errors::{InfopostError, RetryClass};
pub use models::{QueryPayload, RawRecord, RouterQuery};
pub use response::{flatten_response, is_successful, SUCCESS_STATUS_CODE};
pub use transport::{HttpTransport, RouterTransport};
