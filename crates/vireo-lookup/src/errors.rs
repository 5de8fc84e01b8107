//! Lookup failure kinds.

use crate::transport::TransportError;
use thiserror::Error;
use vireo_proto::name::Name;
use vireo_proto::rtype::Type;

/// Why a lookup did not produce records.
///
/// [`LookupError::NoSuchDomain`] and [`LookupError::NoSuchRrset`] raised
/// for one search-path candidate are recovered by trying the next; every
/// other kind aborts the lookup immediately.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The name does not exist (NXDOMAIN), after search-path exhaustion.
    #[error("no such domain: {name} {rtype}")]
    NoSuchDomain {
        /// The name that does not exist.
        name: Name,
        /// The type that was asked for.
        rtype: Type,
    },

    /// The name exists without the queried type (NXRRSET), after
    /// search-path exhaustion.
    #[error("no such record set: {name} {rtype}")]
    NoSuchRrset {
        /// The name that lacks the type.
        name: Name,
        /// The type that was asked for.
        rtype: Type,
    },

    /// The server answered SERVFAIL.
    #[error("server failed")]
    ServerFailed,

    /// More CNAME/DNAME hops than the session allows.
    #[error("more than {max} redirects while chasing aliases")]
    RedirectOverflow {
        /// The configured hop budget.
        max: usize,
    },

    /// The response violates the protocol, e.g. a multi-record CNAME set.
    #[error("invalid zone data: {0}")]
    InvalidZoneData(String),

    /// Any other response code.
    #[error("lookup failed: {0}")]
    Failed(String),

    /// The transport could not produce a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session was built with unusable settings.
    #[error("invalid session configuration: {0}")]
    Config(String),
}

impl LookupError {
    /// True for the outcomes the search-path iteration recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoSuchDomain { .. } | Self::NoSuchRrset { .. })
    }
}
