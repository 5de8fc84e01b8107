//! # vireo-lookup
//!
//! An asynchronous DNS stub resolver built on [`vireo_proto`] and
//! [`vireo_cache`].
//!
//! A [`LookupSession`] is a long-lived object shared by many concurrent
//! callers. Each lookup expands the search path, consults the hosts file
//! for address queries, answers from the cache when it credibly can,
//! sends the rest through a [`Transport`], ingests responses back into
//! the cache, and chases CNAME/DNAME redirects under a hop budget.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vireo_cache::Cache;
//! use vireo_lookup::{LookupSession, UdpTransport};
//! use vireo_proto::{Name, RecordClass, RecordType};
//! use std::str::FromStr;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = LookupSession::builder()
//!     .transport(UdpTransport::new(vec!["192.0.2.53:53".parse()?]))
//!     .cache(Arc::new(Cache::new(RecordClass::In)))
//!     .system_hosts()
//!     .build()?;
//!
//! let name = Name::from_str("www.example.com.")?;
//! let result = session.lookup(&name, RecordType::A, RecordClass::In).await?;
//! for record in result.records() {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod errors;
pub mod hosts;
pub mod session;
pub mod transport;

pub use errors::LookupError;
pub use hosts::HostsFile;
pub use session::{LookupResult, LookupSession, LookupSessionBuilder};
pub use session::{DEFAULT_MAX_REDIRECTS, DEFAULT_NDOTS};
pub use transport::{Transport, TransportError, UdpTransport};
