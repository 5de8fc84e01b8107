//! The outcome of a cache lookup.

use vireo_proto::record::{RRset, ResourceRecord};

/// What the cache knows about a (name, type) pair.
#[derive(Debug, Clone)]
pub enum CacheResponse {
    /// Nothing credible cached; ask the resolver.
    Unknown,
    /// The name is known not to exist at all.
    NxDomain,
    /// The name exists, but not with the queried type.
    NxRrset,
    /// A terminal answer. When the cache followed aliases to get there,
    /// the CNAME sets precede the answer set, in chain order, so the
    /// caller can account for every hop.
    Successful {
        /// The chain (possibly empty) followed by the answer RRset.
        answers: Vec<RRset>,
    },
    /// The name is an alias whose target the cache knows nothing about.
    CName {
        /// The single-link chain.
        chain: Vec<RRset>,
    },
    /// An alias chain that was followed but ran out of cached links
    /// before reaching an answer.
    Partial {
        /// The links followed, in order.
        chain: Vec<RRset>,
    },
    /// An ancestor of the name carries a DNAME redirection.
    DName {
        /// The redirecting record.
        record: ResourceRecord,
    },
}

impl CacheResponse {
    /// True for [`CacheResponse::Successful`].
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Successful { .. })
    }

    /// True for [`CacheResponse::NxDomain`].
    pub fn is_nxdomain(&self) -> bool {
        matches!(self, Self::NxDomain)
    }

    /// True for [`CacheResponse::NxRrset`].
    pub fn is_nxrrset(&self) -> bool {
        matches!(self, Self::NxRrset)
    }
}
