//! Client for the ledger REST API.
//!
//! The crate is a thin, stateless request/response mapper:
//!
//! * [`signing`] — Ed25519 key pairs and the canonical messages requests are
//!   signed over.
//! * [`client`] — [`LedgerClient`], one blocking HTTP call per operation
//!   (domain/asset registration, transfers, messages, history).
//! * [`outcome`] — [`Outcome`], splitting answers into success, rejection
//!   (HTTP 400) and unexpected status.
//! * [`transport`] — the [`HttpTransport`] seam and its `reqwest` backend.
//!
//! ```no_run
//! use ledger_client::{KeyPair, LedgerClient, ReqwestTransport};
//! use std::time::Duration;
//!
//! let transport = ReqwestTransport::new(Duration::from_secs(10), "example")?;
//! let client = LedgerClient::new(transport);
//! let keys = KeyPair::generate();
//! let outcome = client.register_domain("http://127.0.0.1:1204", "soramitsu", &keys)?;
//! println!("{outcome:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod logging;
pub mod models;
pub mod outcome;
pub mod signing;
pub mod transfer;
pub mod transport;

mod error;

pub use client::LedgerClient;
pub use config::ClientConfig;
pub use error::{ClientError, KeyError, TransportError};
pub use models::{Asset, Domain, History, ResponseObject};
pub use outcome::Outcome;
pub use signing::KeyPair;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
