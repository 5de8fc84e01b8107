//! # vireo-proto
//!
//! DNS protocol types and wire codec for the vireo stub resolver.
//!
//! The crate covers the pieces a lookup engine needs to speak RFC 1035 and
//! friends on the wire:
//!
//! - Domain names with compression-aware parsing and emission
//! - The 12-byte header, questions, resource records, and RRset grouping
//! - A record catalog spanning the classic, mail, DNSSEC, and service
//!   binding types, with an RFC 3597 fallback for everything else
//! - EDNS(0) handling via a dedicated [`Edns`] view of the OPT pseudo-RR
//! - A process-wide type registry with a mutable overlay for custom codecs
//!
//! Parsing is strict: section counts must match, RDATA must stay inside its
//! declared length, and compression pointers may only point backwards.
//! Every message the crate parses can be re-emitted bit-compatibly.
//!
//! ## Example
//!
//! ```rust
//! use vireo_proto::{Message, Name, Question, RecordClass, RecordType};
//! use std::str::FromStr;
//!
//! let name = Name::from_str("example.com.").unwrap();
//! let query = Message::query(Question::new(name, RecordType::A, RecordClass::In));
//! let wire = query.to_wire();
//! let parsed = Message::parse(&wire).unwrap();
//! assert_eq!(parsed.id(), query.id());
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod edns;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod registry;
pub mod rtype;
pub mod scan;
pub mod wire;

pub use class::{Class, RecordClass};
pub use edns::{Edns, EdnsOption};
pub use error::{Error, Result};
pub use header::Header;
pub use message::{Message, Section};
pub use name::Name;
pub use opcode::OpCode;
pub use question::Question;
pub use rcode::{Rcode, ResponseCode};
pub use rdata::RData;
pub use record::{RRset, ResourceRecord};
pub use registry::Registry;
pub use rtype::{RecordType, Type};

/// Maximum length of a single label, per RFC 1035.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum wire length of a domain name, length bytes included.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum number of labels a 255-octet name can hold.
pub const MAX_LABELS: usize = 127;

/// Plain UDP payload limit without EDNS, per RFC 1035.
pub const MAX_PLAIN_UDP_SIZE: usize = 512;

/// Default EDNS UDP payload size advertised in queries.
pub const DEFAULT_EDNS_PAYLOAD: u16 = 1232;
