//! # vireo-cache
//!
//! A shared, credibility-ranked DNS cache for stub resolution.
//!
//! One [`Cache`] serves one class. Entries are keyed by owner name; each
//! name holds per-type slots (a positive RRset or an NXRRSET marker) plus
//! an optional name-wide NXDOMAIN marker. Every entry carries a
//! [`Credibility`] rank and an absolute expiry on the monotonic clock.
//!
//! The rules, in order of authority:
//!
//! - Data never displaces data of higher credibility; at equal rank the
//!   newer write wins with the earlier of the two expiries.
//! - An NXDOMAIN marker displaces every positive entry at its name, and
//!   at most one of the two exists at any time.
//! - Nothing past its expiry is ever returned; expired entries are
//!   dropped when touched, and a soft size cap triggers a sweep that
//!   drops expired entries first and the longest-untouched names after.
//!
//! Concurrency: the map shards per name, so readers never observe a torn
//! entry and an expiry check is atomic with the read that follows it.
//! Concurrent writers to one name serialise on its shard; across names
//! they do not contend.

#![warn(missing_docs)]

pub mod credibility;
pub mod entry;
pub mod response;

pub use credibility::Credibility;
pub use entry::{NegativeEntry, NegativeKind, PositiveEntry};
pub use response::CacheResponse;

use dashmap::DashMap;
use hashbrown::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use vireo_proto::message::Section;
use vireo_proto::record::RRset;
use vireo_proto::rtype::{RecordType, Type};
use vireo_proto::{Class, Message, Name, Rcode, RecordClass, ResponseCode};

/// How many in-cache alias links one lookup will follow.
const MAX_ALIAS_LINKS: usize = 16;

/// Tuning knobs for a [`Cache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Soft cap on stored entries; exceeding it triggers a sweep.
    pub max_entries: usize,
    /// Ceiling applied to positive TTLs.
    pub max_ttl: Duration,
    /// Ceiling applied to negative TTLs (RFC 2308 suggests an hour).
    pub max_negative_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 50_000,
            max_ttl: Duration::from_secs(86_400),
            max_negative_ttl: Duration::from_secs(3_600),
        }
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Positive(PositiveEntry),
    Negative(NegativeEntry),
}

impl Slot {
    fn credibility(&self) -> Credibility {
        match self {
            Self::Positive(e) => e.credibility,
            Self::Negative(e) => e.credibility,
        }
    }

    fn expires_at(&self) -> Instant {
        match self {
            Self::Positive(e) => e.expires_at,
            Self::Negative(e) => e.expires_at,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

#[derive(Debug)]
struct NameBucket {
    nxdomain: Option<NegativeEntry>,
    slots: HashMap<u16, Slot>,
    touched: Instant,
}

impl NameBucket {
    fn new(now: Instant) -> Self {
        Self {
            nxdomain: None,
            slots: HashMap::new(),
            touched: now,
        }
    }

    /// Drops expired content, returning how many entries went away.
    fn prune(&mut self, now: Instant) -> usize {
        let before = self.slots.len() + usize::from(self.nxdomain.is_some());
        if self
            .nxdomain
            .as_ref()
            .is_some_and(|nx| nx.is_expired(now))
        {
            self.nxdomain = None;
        }
        self.slots.retain(|_, slot| !slot.is_expired(now));
        before - (self.slots.len() + usize::from(self.nxdomain.is_some()))
    }

    fn is_empty(&self) -> bool {
        self.nxdomain.is_none() && self.slots.is_empty()
    }
}

enum Probe {
    NxDomain,
    NxRrset,
    Answer(RRset),
    Alias(RRset, Name),
    Dname(vireo_proto::ResourceRecord),
    Miss,
}

/// A per-class DNS cache.
pub struct Cache {
    class: Class,
    config: CacheConfig,
    names: DashMap<Name, NameBucket>,
    entries: AtomicUsize,
}

impl Cache {
    /// An empty cache for `class` with default tuning.
    pub fn new(class: RecordClass) -> Self {
        Self::with_config(class, CacheConfig::default())
    }

    /// An empty cache with explicit tuning.
    pub fn with_config(class: RecordClass, config: CacheConfig) -> Self {
        Self {
            class: Class::Known(class),
            config,
            names: DashMap::new(),
            entries: AtomicUsize::new(0),
        }
    }

    /// The class this cache serves.
    pub fn dclass(&self) -> Class {
        self.class
    }

    /// The number of stored entries, positives and negatives combined.
    pub fn len(&self) -> usize {
        self.entries.load(Ordering::Relaxed)
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops everything.
    pub fn clear(&self) {
        self.names.clear();
        self.entries.store(0, Ordering::Relaxed);
    }

    /// Ingests a response: positive RRsets at section credibility, plus
    /// the NXDOMAIN/NXRRSET the header and answer shape imply.
    pub fn add_message(&self, response: &Message) {
        let Some(question) = response.question() else {
            return;
        };
        if question.qclass != self.class {
            return;
        }

        let now = Instant::now();
        let authoritative = response.is_authoritative();

        for section in [Section::Answer, Section::Authority, Section::Additional] {
            let credibility = Credibility::for_section(section, authoritative);
            for rrset in response.section_rrsets(section) {
                if rrset.rclass() != self.class {
                    continue;
                }
                if rrset
                    .rtype()
                    .known()
                    .is_some_and(|t| t.is_meta() || t.is_query_only())
                {
                    continue;
                }
                self.store_rrset(rrset, credibility, now);
            }
        }

        self.ingest_negative(response, authoritative, now);
        self.enforce_cap(now);
    }

    /// Answers from memory.
    ///
    /// In-cache alias links are followed up to a fixed depth; see
    /// [`CacheResponse`] for the possible outcomes. Nothing below
    /// `min_credibility` and nothing expired is returned.
    pub fn lookup_records(
        &self,
        name: &Name,
        qtype: Type,
        min_credibility: Credibility,
    ) -> CacheResponse {
        self.lookup_at(name, qtype, min_credibility, Instant::now())
    }

    fn lookup_at(
        &self,
        name: &Name,
        qtype: Type,
        min: Credibility,
        now: Instant,
    ) -> CacheResponse {
        let mut current = name.clone();
        let mut chain: Vec<RRset> = Vec::new();

        for _ in 0..MAX_ALIAS_LINKS {
            match self.probe(&current, qtype, min, now) {
                Probe::NxDomain => {
                    return if chain.is_empty() {
                        CacheResponse::NxDomain
                    } else {
                        CacheResponse::Partial { chain }
                    };
                }
                Probe::NxRrset => {
                    return if chain.is_empty() {
                        CacheResponse::NxRrset
                    } else {
                        CacheResponse::Partial { chain }
                    };
                }
                Probe::Answer(rrset) => {
                    trace!(name = %current, %qtype, "cache hit");
                    chain.push(rrset);
                    return CacheResponse::Successful { answers: chain };
                }
                Probe::Alias(rrset, target) => {
                    chain.push(rrset);
                    current = target;
                }
                Probe::Dname(record) => {
                    return if chain.is_empty() {
                        CacheResponse::DName { record }
                    } else {
                        CacheResponse::Partial { chain }
                    };
                }
                Probe::Miss => break,
            }
        }

        match chain.len() {
            0 => CacheResponse::Unknown,
            1 => CacheResponse::CName { chain },
            _ => CacheResponse::Partial { chain },
        }
    }

    fn probe(&self, name: &Name, qtype: Type, min: Credibility, now: Instant) -> Probe {
        if let Some(mut bucket) = self.names.get_mut(name) {
            let dropped = bucket.prune(now);
            self.entries.fetch_sub(dropped, Ordering::Relaxed);
            bucket.touched = now;

            if let Some(nx) = &bucket.nxdomain {
                if nx.credibility >= min {
                    return Probe::NxDomain;
                }
            }

            match bucket.slots.get(&qtype.code()) {
                Some(Slot::Positive(e)) if e.credibility >= min => {
                    return Probe::Answer(e.rrset.clone());
                }
                Some(Slot::Negative(e)) if e.credibility >= min => {
                    return Probe::NxRrset;
                }
                _ => {}
            }

            if qtype != Type::Known(RecordType::CNAME) {
                if let Some(Slot::Positive(e)) = bucket.slots.get(&RecordType::CNAME.code()) {
                    if e.credibility >= min {
                        if let Some(target) =
                            e.rrset.records()[0].rdata().cname_target().cloned()
                        {
                            return Probe::Alias(e.rrset.clone(), target);
                        }
                    }
                }
            }
        }

        // A DNAME at any ancestor redirects the whole subtree.
        let mut ancestor = name.parent();
        while let Some(anc) = ancestor {
            if anc.is_root() {
                break;
            }
            if let Some(bucket) = self.names.get(&anc) {
                if let Some(Slot::Positive(e)) = bucket.slots.get(&RecordType::DNAME.code()) {
                    if e.credibility >= min && !e.is_expired(now) {
                        return Probe::Dname(e.rrset.records()[0].clone());
                    }
                }
            }
            ancestor = anc.parent();
        }

        Probe::Miss
    }

    fn store_rrset(&self, rrset: RRset, credibility: Credibility, now: Instant) {
        let ttl = Duration::from_secs(u64::from(rrset.ttl())).min(self.config.max_ttl);
        if ttl.is_zero() {
            return;
        }
        let expires_at = now + ttl;
        let name = rrset.name().clone();
        let code = rrset.rtype().code();

        let mut bucket = self
            .names
            .entry(name)
            .or_insert_with(|| NameBucket::new(now));
        let mut delta = 0isize;

        if let Some(nx) = &bucket.nxdomain {
            if !nx.is_expired(now) && nx.credibility > credibility {
                return;
            }
            bucket.nxdomain = None;
            delta -= 1;
        }

        let entry = match bucket.slots.get(&code) {
            Some(existing) if !existing.is_expired(now) => {
                if existing.credibility() > credibility {
                    self.apply_delta(delta);
                    return;
                }
                let expires_at = if existing.credibility() == credibility {
                    existing.expires_at().min(expires_at)
                } else {
                    expires_at
                };
                PositiveEntry::new(rrset, credibility, expires_at)
            }
            _ => PositiveEntry::new(rrset, credibility, expires_at),
        };

        if bucket.slots.insert(code, Slot::Positive(entry)).is_none() {
            delta += 1;
        }
        self.apply_delta(delta);
    }

    fn ingest_negative(&self, response: &Message, authoritative: bool, now: Instant) {
        let Some(question) = response.question() else {
            return;
        };

        // Follow the answer chain: the denial applies to its tail.
        let mut current = question.qname.clone();
        let mut answered = false;
        for rrset in response.section_rrsets(Section::Answer) {
            if rrset.name() != &current {
                continue;
            }
            if rrset.rtype() == question.qtype {
                answered = true;
                break;
            }
            if let Some(target) = rrset.records()[0].rdata().cname_target() {
                current = target.clone();
            }
        }

        let kind = match response.rcode() {
            Rcode::Known(ResponseCode::NxDomain) => NegativeKind::NxDomain,
            Rcode::Known(ResponseCode::NoError) if !answered => NegativeKind::NxRrset,
            _ => return,
        };

        // RFC 2308: the negative TTL is the SOA's MINIMUM or its own TTL,
        // whichever is smaller. No SOA, no negative caching.
        let Some(ttl) = response
            .section(Section::Authority)
            .iter()
            .find_map(|r| r.rdata().as_soa().map(|soa| soa.minimum().min(r.ttl())))
        else {
            return;
        };
        let ttl = Duration::from_secs(u64::from(ttl)).min(self.config.max_negative_ttl);
        if ttl.is_zero() {
            return;
        }

        let credibility = Credibility::for_section(Section::Authority, authoritative);
        let entry = NegativeEntry::new(kind, credibility, now + ttl);
        debug!(name = %current, ?kind, "caching negative response");

        let mut bucket = self
            .names
            .entry(current)
            .or_insert_with(|| NameBucket::new(now));
        let mut delta = 0isize;

        match kind {
            NegativeKind::NxDomain => {
                if let Some(existing) = &bucket.nxdomain {
                    if !existing.is_expired(now) && existing.credibility > credibility {
                        return;
                    }
                }
                // NXDOMAIN is name-wide: no positive survives next to it.
                delta -= bucket.slots.len() as isize;
                bucket.slots.clear();
                if bucket.nxdomain.replace(entry).is_none() {
                    delta += 1;
                }
            }
            NegativeKind::NxRrset => {
                let code = question.qtype.code();
                if let Some(existing) = bucket.slots.get(&code) {
                    if !existing.is_expired(now) && existing.credibility() > credibility {
                        return;
                    }
                }
                if bucket.slots.insert(code, Slot::Negative(entry)).is_none() {
                    delta += 1;
                }
            }
        }
        self.apply_delta(delta);
    }

    fn apply_delta(&self, delta: isize) {
        match delta.cmp(&0) {
            std::cmp::Ordering::Greater => {
                self.entries.fetch_add(delta as usize, Ordering::Relaxed);
            }
            std::cmp::Ordering::Less => {
                self.entries.fetch_sub((-delta) as usize, Ordering::Relaxed);
            }
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Sweeps once the soft cap is exceeded: expired entries first, then
    /// the longest-untouched names until back under the cap.
    fn enforce_cap(&self, now: Instant) {
        if self.len() <= self.config.max_entries {
            return;
        }

        let mut remaining = 0usize;
        self.names.retain(|_, bucket| {
            bucket.prune(now);
            let keep = !bucket.is_empty();
            if keep {
                remaining += bucket.slots.len() + usize::from(bucket.nxdomain.is_some());
            }
            keep
        });
        self.entries.store(remaining, Ordering::Relaxed);

        if remaining <= self.config.max_entries {
            return;
        }

        let mut by_age: Vec<(Instant, Name)> = self
            .names
            .iter()
            .map(|kv| (kv.value().touched, kv.key().clone()))
            .collect();
        by_age.sort_by_key(|(touched, _)| *touched);

        let target = self.config.max_entries * 7 / 8;
        for (_, name) in by_age {
            if self.len() <= target {
                break;
            }
            if let Some((_, bucket)) = self.names.remove(&name) {
                let dropped = bucket.slots.len() + usize::from(bucket.nxdomain.is_some());
                self.entries.fetch_sub(dropped, Ordering::Relaxed);
            }
        }
        debug!(len = self.len(), "cache sweep finished");
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("class", &self.class)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::str::FromStr;
    use vireo_proto::header::Flags;
    use vireo_proto::rdata::{RData, Soa};
    use vireo_proto::{Question, ResourceRecord};

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn a_record(owner: &str, ttl: u32, last: u8) -> ResourceRecord {
        ResourceRecord::a(name(owner), ttl, Ipv4Addr::new(192, 0, 2, last))
    }

    fn response(qname: &str, qtype: RecordType, authoritative: bool) -> Message {
        let mut msg = Message::response_to(&Message::query(Question::new(
            name(qname),
            qtype,
            RecordClass::In,
        )));
        if authoritative {
            msg.header_mut().flags |= Flags::AA;
        }
        msg
    }

    fn soa_record(zone: &str, ttl: u32, minimum: u32) -> ResourceRecord {
        ResourceRecord::new(
            name(zone),
            Class::Known(RecordClass::In),
            ttl,
            RData::Soa(Soa::new(
                name("ns1.example.com."),
                name("hostmaster.example.com."),
                1,
                7200,
                900,
                1209600,
                minimum,
            )),
        )
    }

    #[test]
    fn positive_insert_and_hit() {
        let cache = Cache::new(RecordClass::In);
        let mut msg = response("example.com.", RecordType::A, true);
        msg.push(Section::Answer, a_record("example.com.", 300, 1));
        cache.add_message(&msg);

        let result = cache.lookup_records(
            &name("example.com."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        );
        let CacheResponse::Successful { answers } = result else {
            panic!("expected a hit");
        };
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].records().len(), 1);
    }

    #[test]
    fn miss_is_unknown() {
        let cache = Cache::new(RecordClass::In);
        assert!(matches!(
            cache.lookup_records(
                &name("example.com."),
                Type::Known(RecordType::A),
                Credibility::NORMAL
            ),
            CacheResponse::Unknown
        ));
    }

    #[test]
    fn expiry_is_honoured() {
        let cache = Cache::new(RecordClass::In);
        let mut msg = response("example.com.", RecordType::A, true);
        msg.push(Section::Answer, a_record("example.com.", 300, 1));
        cache.add_message(&msg);

        let qname = name("example.com.");
        let qtype = Type::Known(RecordType::A);
        let later = Instant::now() + Duration::from_secs(301);
        assert!(matches!(
            cache.lookup_at(&qname, qtype, Credibility::NORMAL, later),
            CacheResponse::Unknown
        ));
        // The expired entry was dropped on access.
        assert!(cache.is_empty());
    }

    #[test]
    fn credibility_floor_filters() {
        let cache = Cache::new(RecordClass::In);
        // Additional-section data ranks below NORMAL.
        let mut msg = response("example.com.", RecordType::A, false);
        msg.push(Section::Additional, a_record("ns.example.com.", 300, 1));
        cache.add_message(&msg);

        let qname = name("ns.example.com.");
        let qtype = Type::Known(RecordType::A);
        assert!(matches!(
            cache.lookup_records(&qname, qtype, Credibility::NORMAL),
            CacheResponse::Unknown
        ));
        assert!(matches!(
            cache.lookup_records(&qname, qtype, Credibility::Additional),
            CacheResponse::Successful { .. }
        ));
    }

    #[test]
    fn higher_credibility_displaces_lower_only() {
        let cache = Cache::new(RecordClass::In);

        let mut nonauth = response("example.com.", RecordType::A, false);
        nonauth.push(Section::Answer, a_record("example.com.", 300, 1));
        cache.add_message(&nonauth);

        let mut auth = response("example.com.", RecordType::A, true);
        auth.push(Section::Answer, a_record("example.com.", 300, 2));
        cache.add_message(&auth);

        // The authoritative answer is now stored.
        let CacheResponse::Successful { answers } = cache.lookup_records(
            &name("example.com."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        ) else {
            panic!("expected a hit");
        };
        assert_eq!(
            answers[0].records()[0].rdata().ip_addr().unwrap().to_string(),
            "192.0.2.2"
        );

        // A later non-authoritative answer cannot displace it.
        let mut nonauth2 = response("example.com.", RecordType::A, false);
        nonauth2.push(Section::Answer, a_record("example.com.", 300, 3));
        cache.add_message(&nonauth2);

        let CacheResponse::Successful { answers } = cache.lookup_records(
            &name("example.com."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        ) else {
            panic!("expected a hit");
        };
        assert_eq!(
            answers[0].records()[0].rdata().ip_addr().unwrap().to_string(),
            "192.0.2.2"
        );
    }

    #[test]
    fn equal_credibility_keeps_earlier_expiry() {
        let cache = Cache::new(RecordClass::In);

        let mut short = response("example.com.", RecordType::A, true);
        short.push(Section::Answer, a_record("example.com.", 60, 1));
        cache.add_message(&short);

        let mut long = response("example.com.", RecordType::A, true);
        long.push(Section::Answer, a_record("example.com.", 3600, 2));
        cache.add_message(&long);

        let qname = name("example.com.");
        let qtype = Type::Known(RecordType::A);

        // The replacement data is served...
        let CacheResponse::Successful { answers } =
            cache.lookup_records(&qname, qtype, Credibility::NORMAL)
        else {
            panic!("expected a hit");
        };
        assert_eq!(
            answers[0].records()[0].rdata().ip_addr().unwrap().to_string(),
            "192.0.2.2"
        );

        // ...but under the original, shorter expiry.
        let later = Instant::now() + Duration::from_secs(120);
        assert!(matches!(
            cache.lookup_at(&qname, qtype, Credibility::NORMAL, later),
            CacheResponse::Unknown
        ));
    }

    #[test]
    fn nxdomain_cached_and_name_wide() {
        let cache = Cache::new(RecordClass::In);

        // Seed a positive, then learn the name does not exist.
        let mut positive = response("gone.example.com.", RecordType::A, true);
        positive.push(Section::Answer, a_record("gone.example.com.", 300, 1));
        cache.add_message(&positive);

        let mut nxdomain = response("gone.example.com.", RecordType::A, true);
        nxdomain.set_rcode(Rcode::Known(ResponseCode::NxDomain));
        nxdomain.push(Section::Authority, soa_record("example.com.", 3600, 600));
        cache.add_message(&nxdomain);

        // Any type at that name now answers NXDOMAIN.
        for qtype in [RecordType::A, RecordType::MX, RecordType::TXT] {
            assert!(matches!(
                cache.lookup_records(
                    &name("gone.example.com."),
                    Type::Known(qtype),
                    Credibility::NORMAL
                ),
                CacheResponse::NxDomain
            ));
        }
    }

    #[test]
    fn nxrrset_is_per_type() {
        let cache = Cache::new(RecordClass::In);

        let mut nodata = response("example.com.", RecordType::AAAA, true);
        nodata.push(Section::Authority, soa_record("example.com.", 3600, 600));
        cache.add_message(&nodata);

        assert!(matches!(
            cache.lookup_records(
                &name("example.com."),
                Type::Known(RecordType::AAAA),
                Credibility::NORMAL
            ),
            CacheResponse::NxRrset
        ));
        // Other types are unaffected.
        assert!(matches!(
            cache.lookup_records(
                &name("example.com."),
                Type::Known(RecordType::A),
                Credibility::NORMAL
            ),
            CacheResponse::Unknown
        ));
    }

    #[test]
    fn negative_ttl_uses_soa_minimum() {
        let cache = Cache::new(RecordClass::In);

        let mut nodata = response("example.com.", RecordType::AAAA, true);
        // SOA TTL 3600 but MINIMUM 60: the smaller one bounds the entry.
        nodata.push(Section::Authority, soa_record("example.com.", 3600, 60));
        cache.add_message(&nodata);

        let qname = name("example.com.");
        let qtype = Type::Known(RecordType::AAAA);
        assert!(matches!(
            cache.lookup_records(&qname, qtype, Credibility::NORMAL),
            CacheResponse::NxRrset
        ));

        let later = Instant::now() + Duration::from_secs(61);
        assert!(matches!(
            cache.lookup_at(&qname, qtype, Credibility::NORMAL, later),
            CacheResponse::Unknown
        ));
    }

    #[test]
    fn negative_without_soa_not_cached() {
        let cache = Cache::new(RecordClass::In);
        let mut nxdomain = response("example.com.", RecordType::A, true);
        nxdomain.set_rcode(Rcode::Known(ResponseCode::NxDomain));
        cache.add_message(&nxdomain);
        assert!(cache.is_empty());
    }

    #[test]
    fn cname_chain_followed_to_answer() {
        let cache = Cache::new(RecordClass::In);

        let mut msg = response("www.example.com.", RecordType::A, true);
        msg.push(
            Section::Answer,
            ResourceRecord::cname(name("www.example.com."), 300, name("host.example.com.")),
        );
        msg.push(Section::Answer, a_record("host.example.com.", 300, 9));
        cache.add_message(&msg);

        let CacheResponse::Successful { answers } = cache.lookup_records(
            &name("www.example.com."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        ) else {
            panic!("expected chain hit");
        };
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].rtype(), Type::Known(RecordType::CNAME));
        assert_eq!(answers[1].rtype(), Type::Known(RecordType::A));
    }

    #[test]
    fn lone_cname_reported() {
        let cache = Cache::new(RecordClass::In);

        let mut msg = response("www.example.com.", RecordType::A, true);
        msg.push(
            Section::Answer,
            ResourceRecord::cname(name("www.example.com."), 300, name("elsewhere.example.")),
        );
        // NXRRSET denial for the A at the tail comes with an SOA.
        msg.push(Section::Authority, soa_record("example.", 3600, 600));
        cache.add_message(&msg);

        // The tail has a cached NXRRSET, so the chain is partial.
        let result = cache.lookup_records(
            &name("www.example.com."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        );
        assert!(matches!(result, CacheResponse::Partial { .. }));
    }

    #[test]
    fn cname_loop_bounded() {
        let cache = Cache::new(RecordClass::In);

        let mut msg = response("a.example.", RecordType::A, true);
        msg.push(
            Section::Answer,
            ResourceRecord::cname(name("a.example."), 300, name("b.example.")),
        );
        msg.push(
            Section::Answer,
            ResourceRecord::cname(name("b.example."), 300, name("a.example.")),
        );
        cache.add_message(&msg);

        let result = cache.lookup_records(
            &name("a.example."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        );
        assert!(matches!(result, CacheResponse::Partial { .. }));
    }

    #[test]
    fn dname_found_at_ancestor() {
        let cache = Cache::new(RecordClass::In);

        let mut msg = response("old.example.", RecordType::DNAME, true);
        msg.push(
            Section::Answer,
            ResourceRecord::new(
                name("old.example."),
                Class::Known(RecordClass::In),
                300,
                RData::Dname(vireo_proto::rdata::Dname::new(name("new.example."))),
            ),
        );
        cache.add_message(&msg);

        let result = cache.lookup_records(
            &name("x.old.example."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        );
        let CacheResponse::DName { record } = result else {
            panic!("expected a DNAME redirect");
        };
        assert_eq!(record.name(), &name("old.example."));
    }

    #[test]
    fn wrong_class_ignored() {
        let cache = Cache::new(RecordClass::In);
        let mut msg = Message::response_to(&Message::query(Question::new(
            name("example.com."),
            RecordType::A,
            RecordClass::Ch,
        )));
        msg.push(
            Section::Answer,
            ResourceRecord::with_rtype(
                name("example.com."),
                Type::Known(RecordType::A),
                Class::Known(RecordClass::Ch),
                300,
                RData::A(vireo_proto::rdata::A::new(Ipv4Addr::new(1, 2, 3, 4))),
            ),
        );
        cache.add_message(&msg);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_not_stored() {
        let cache = Cache::new(RecordClass::In);
        let mut msg = response("example.com.", RecordType::A, true);
        msg.push(Section::Answer, a_record("example.com.", 0, 1));
        cache.add_message(&msg);
        assert!(cache.is_empty());
    }

    #[test]
    fn sweep_keeps_cache_under_cap() {
        let cache = Cache::with_config(
            RecordClass::In,
            CacheConfig {
                max_entries: 8,
                ..CacheConfig::default()
            },
        );

        for i in 0..32u8 {
            let owner = format!("host{i}.example.com.");
            let mut msg = response(&owner, RecordType::A, true);
            msg.push(Section::Answer, a_record(&owner, 300, i));
            cache.add_message(&msg);
        }

        assert!(cache.len() <= 8);
    }

    #[test]
    fn cname_made_partial_by_unknown_tail() {
        let cache = Cache::new(RecordClass::In);

        let mut msg = response("www.example.com.", RecordType::A, true);
        msg.push(
            Section::Answer,
            ResourceRecord::cname(name("www.example.com."), 300, name("dangling.example.")),
        );
        cache.add_message(&msg);

        let result = cache.lookup_records(
            &name("www.example.com."),
            Type::Known(RecordType::A),
            Credibility::NORMAL,
        );
        assert!(matches!(result, CacheResponse::CName { .. }));
    }
}
