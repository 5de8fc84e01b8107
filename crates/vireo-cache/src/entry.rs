//! Cache entry shapes.

use crate::credibility::Credibility;
use std::time::Instant;
use vireo_proto::record::RRset;
use vireo_proto::record::ResourceRecord;

/// A cached RRset with its trust rank and absolute expiry.
#[derive(Debug, Clone)]
pub struct PositiveEntry {
    pub(crate) rrset: RRset,
    pub(crate) credibility: Credibility,
    pub(crate) expires_at: Instant,
}

impl PositiveEntry {
    pub(crate) fn new(rrset: RRset, credibility: Credibility, expires_at: Instant) -> Self {
        Self {
            rrset,
            credibility,
            expires_at,
        }
    }

    /// The cached set.
    pub fn rrset(&self) -> &RRset {
        &self.rrset
    }

    /// The trust rank.
    pub fn credibility(&self) -> Credibility {
        self.credibility
    }

    /// True once `now` has reached the expiry.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Seconds left before expiry, zero once expired.
    pub fn remaining_secs(&self, now: Instant) -> u32 {
        self.expires_at
            .saturating_duration_since(now)
            .as_secs()
            .min(u64::from(u32::MAX)) as u32
    }

    /// The cached records with TTLs counted down to `now`.
    pub fn records_at(&self, now: Instant) -> Vec<ResourceRecord> {
        let remaining = self.remaining_secs(now);
        self.rrset
            .records()
            .iter()
            .map(|r| r.with_ttl(remaining.min(r.ttl())))
            .collect()
    }
}

/// What a negative entry denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeKind {
    /// The whole name does not exist; displaces every type there.
    NxDomain,
    /// The name exists but has no data of one type.
    NxRrset,
}

/// A cached denial, per RFC 2308.
#[derive(Debug, Clone)]
pub struct NegativeEntry {
    pub(crate) kind: NegativeKind,
    pub(crate) credibility: Credibility,
    pub(crate) expires_at: Instant,
}

impl NegativeEntry {
    pub(crate) fn new(kind: NegativeKind, credibility: Credibility, expires_at: Instant) -> Self {
        Self {
            kind,
            credibility,
            expires_at,
        }
    }

    /// What is denied.
    pub fn kind(&self) -> NegativeKind {
        self.kind
    }

    /// The trust rank.
    pub fn credibility(&self) -> Credibility {
        self.credibility
    }

    /// True once `now` has reached the expiry.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::str::FromStr;
    use std::time::Duration;
    use vireo_proto::Name;

    #[test]
    fn ttl_counts_down() {
        let now = Instant::now();
        let record = ResourceRecord::a(
            Name::from_str("example.com.").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        );
        let entry = PositiveEntry::new(
            RRset::new(record),
            Credibility::NonAuthAnswer,
            now + Duration::from_secs(300),
        );

        assert!(!entry.is_expired(now));
        let later = now + Duration::from_secs(100);
        let records = entry.records_at(later);
        assert_eq!(records[0].ttl(), 200);

        assert!(entry.is_expired(now + Duration::from_secs(300)));
        assert_eq!(entry.remaining_secs(now + Duration::from_secs(400)), 0);
    }
}
