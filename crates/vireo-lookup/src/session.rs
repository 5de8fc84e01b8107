//! The lookup session: search path, hosts probe, cache, redirects.

use crate::errors::LookupError;
use crate::hosts::HostsFile;
use crate::transport::Transport;
use hashbrown::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};
use vireo_cache::{Cache, CacheResponse, Credibility};
use vireo_proto::message::Section;
use vireo_proto::name::Name;
use vireo_proto::rdata::{self, RData};
use vireo_proto::record::{RRset, ResourceRecord};
use vireo_proto::rtype::{RecordType, Type};
use vireo_proto::{Class, Message, Question, Rcode, RecordClass, ResponseCode};

/// Default bound on CNAME/DNAME hops per lookup.
pub const DEFAULT_MAX_REDIRECTS: usize = 16;

/// Default label-count threshold for trying a name absolute first.
pub const DEFAULT_NDOTS: usize = 1;

/// What a successful lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    records: Vec<ResourceRecord>,
    aliases: Vec<Name>,
}

impl LookupResult {
    fn new(records: Vec<ResourceRecord>, aliases: Vec<Name>) -> Self {
        Self { records, aliases }
    }

    /// The answer records, all of the queried type.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Every owner name that redirected here, in the order followed.
    pub fn aliases(&self) -> &[Name] {
        &self.aliases
    }
}

/// Redirect-chasing state, threaded through each resolution step.
#[derive(Debug)]
struct RedirectState {
    current: Name,
    aliases: Vec<Name>,
    hops: usize,
}

impl RedirectState {
    fn new(start: Name) -> Self {
        Self {
            current: start,
            aliases: Vec::new(),
            hops: 1,
        }
    }
}

/// A long-lived, shareable stub-resolver session.
///
/// Sessions are cheap to share behind an [`Arc`] and safe to use from
/// many tasks at once: the cache synchronises internally, the rotation
/// counter is atomic, and everything else is immutable after
/// [`LookupSessionBuilder::build`].
pub struct LookupSession {
    transport: Arc<dyn Transport>,
    max_redirects: usize,
    ndots: usize,
    search_path: Vec<Name>,
    cycle_results: bool,
    caches: HashMap<u16, Arc<Cache>>,
    hosts: Option<HostsFile>,
    rotation: AtomicUsize,
}

impl LookupSession {
    /// Starts configuring a session.
    pub fn builder() -> LookupSessionBuilder {
        LookupSessionBuilder::new()
    }

    /// Looks up `name` with the session's search-path semantics.
    ///
    /// Relative names are expanded into candidates; `NoSuchDomain` and
    /// `NoSuchRrset` move on to the next candidate, anything else fails
    /// the lookup. The hosts file, when configured, short-circuits A and
    /// AAAA queries before any cache or transport work.
    pub async fn lookup(
        &self,
        name: &Name,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Result<LookupResult, LookupError> {
        let candidates = self.expand_name(name)?;

        if let Some(result) = self.hosts_probe(&candidates, rtype) {
            return Ok(result);
        }

        let mut last = None;
        for candidate in candidates {
            trace!(candidate = %candidate, "trying search-path candidate");
            match self.resolve_candidate(candidate, rtype, rclass).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_recoverable() => last = Some(e),
                Err(e) => return Err(e),
            }
        }
        Err(last.unwrap_or(LookupError::Config(
            "search-path expansion yielded no candidates".into(),
        )))
    }

    /// Applies the search path to a query name.
    ///
    /// Absolute names stand alone. A relative name tries each suffix in
    /// order, with the plain absolute form first when it has more than
    /// `ndots` labels and last otherwise; over-long concatenations are
    /// dropped silently.
    fn expand_name(&self, name: &Name) -> Result<Vec<Name>, LookupError> {
        if name.is_absolute() {
            return Ok(vec![name.clone()]);
        }

        let mut candidates: Vec<Name> = self
            .search_path
            .iter()
            .filter_map(|suffix| name.concatenate(suffix).ok())
            .collect();

        if let Ok(absolute) = name.concatenate(&Name::root()) {
            if name.label_count() > self.ndots {
                candidates.insert(0, absolute);
            } else {
                candidates.push(absolute);
            }
        }

        if candidates.is_empty() {
            return Err(LookupError::Config(format!(
                "{name} cannot be made absolute within 255 octets"
            )));
        }
        Ok(candidates)
    }

    fn hosts_probe(&self, candidates: &[Name], rtype: RecordType) -> Option<LookupResult> {
        let hosts = self.hosts.as_ref()?;
        if !matches!(rtype, RecordType::A | RecordType::AAAA) {
            return None;
        }

        for candidate in candidates {
            match hosts.address_for(candidate, rtype) {
                Ok(Some(addr)) => {
                    let rdata = match addr {
                        IpAddr::V4(v4) => RData::A(rdata::A::new(v4)),
                        IpAddr::V6(v6) => RData::Aaaa(rdata::Aaaa::new(v6)),
                    };
                    let record = ResourceRecord::new(
                        candidate.clone(),
                        Class::Known(RecordClass::In),
                        0,
                        rdata,
                    );
                    return Some(LookupResult::new(vec![record], Vec::new()));
                }
                Ok(None) => continue,
                Err(e) => {
                    debug!(error = %e, "hosts file unusable, falling back to the resolver");
                    return None;
                }
            }
        }
        None
    }

    /// Resolves one candidate to completion, chasing redirects.
    async fn resolve_candidate(
        &self,
        candidate: Name,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Result<LookupResult, LookupError> {
        let mut state = RedirectState::new(candidate);
        loop {
            let records = self
                .lookup_with_cache(&state.current, rtype, rclass)
                .await?;
            if let Some(result) = self.follow_redirects(records, &mut state, rtype, rclass)? {
                return Ok(result);
            }
        }
    }

    /// Processes one batch of answer records against the redirect state.
    ///
    /// Returns the final result, or `None` when the chain moved to a new
    /// current name that needs a fresh query.
    fn follow_redirects(
        &self,
        records: Vec<ResourceRecord>,
        state: &mut RedirectState,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Result<Option<LookupResult>, LookupError> {
        if state.hops > self.max_redirects {
            return Err(LookupError::RedirectOverflow {
                max: self.max_redirects,
            });
        }

        if records.first().map_or(true, |r| !r.is_redirect()) {
            return Ok(Some(LookupResult::new(records, state.aliases.clone())));
        }

        let qclass = Class::Known(rclass);
        let qtype = Type::Known(rtype);
        let mut results = Vec::new();

        for record in &records {
            if state.hops > self.max_redirects {
                return Err(LookupError::RedirectOverflow {
                    max: self.max_redirects,
                });
            }
            if record.rclass() != qclass {
                continue;
            }

            match record.rdata() {
                RData::Cname(cname) if record.name() == &state.current => {
                    state.aliases.push(state.current.clone());
                    state.hops += 1;
                    state.current = cname.target().clone();
                }
                RData::Dname(dname) if state.current.is_subdomain_of(record.name()) => {
                    match dname.rewrite(&state.current, record.name()) {
                        Ok(Some(rewritten)) => {
                            state.aliases.push(state.current.clone());
                            state.hops += 1;
                            state.current = rewritten;
                        }
                        Ok(None) => {}
                        Err(e) => {
                            return Err(LookupError::InvalidZoneData(format!(
                                "cannot apply {} to {}: {e}",
                                record, state.current
                            )));
                        }
                    }
                }
                _ if record.rtype() == qtype && record.name() == &state.current => {
                    results.push(record.clone());
                }
                _ => {}
            }
        }

        if !results.is_empty() {
            return Ok(Some(LookupResult::new(results, state.aliases.clone())));
        }

        if state.hops > self.max_redirects {
            return Err(LookupError::RedirectOverflow {
                max: self.max_redirects,
            });
        }
        state.hops += 1;
        Ok(None)
    }

    /// One resolution step: cache first, transport on a miss.
    async fn lookup_with_cache(
        &self,
        name: &Name,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Result<Vec<ResourceRecord>, LookupError> {
        if let Some(cache) = self.caches.get(&rclass.code()) {
            match cache.lookup_records(name, Type::Known(rtype), Credibility::NORMAL) {
                CacheResponse::Successful { answers } => {
                    trace!(%name, "answering from cache");
                    return Ok(self.materialize(answers));
                }
                CacheResponse::NxDomain => {
                    return Err(LookupError::NoSuchDomain {
                        name: name.clone(),
                        rtype: Type::Known(rtype),
                    });
                }
                CacheResponse::NxRrset => {
                    return Err(LookupError::NoSuchRrset {
                        name: name.clone(),
                        rtype: Type::Known(rtype),
                    });
                }
                // Partial knowledge is not worth short-circuiting on.
                CacheResponse::Unknown
                | CacheResponse::CName { .. }
                | CacheResponse::Partial { .. }
                | CacheResponse::DName { .. } => {}
            }
        }

        self.lookup_with_transport(name, rtype, rclass).await
    }

    async fn lookup_with_transport(
        &self,
        name: &Name,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Result<Vec<ResourceRecord>, LookupError> {
        let question = Question::new(name.clone(), rtype, rclass);
        debug!(query = %question, "querying the resolver");

        let query = Message::query(question);
        let response = self.transport.send(query).await?;

        // RFC 1034 §3.6.2: one owner, one CNAME. A DNAME set is equally
        // singular per RFC 6672.
        for rrset in response.section_rrsets(Section::Answer) {
            let is_redirect = rrset
                .rtype()
                .known()
                .is_some_and(RecordType::is_redirect);
            if is_redirect && rrset.len() != 1 {
                return Err(LookupError::InvalidZoneData(format!(
                    "{} {} records at {}",
                    rrset.len(),
                    rrset.rtype(),
                    rrset.name()
                )));
            }
        }

        if let Some(cache) = self.caches.get(&rclass.code()) {
            cache.add_message(&response);
        }

        let answers = response.section(Section::Answer);
        if answers.is_empty() {
            match response.rcode() {
                Rcode::Known(ResponseCode::NoError) => {}
                Rcode::Known(ResponseCode::NxDomain) => {
                    return Err(LookupError::NoSuchDomain {
                        name: name.clone(),
                        rtype: Type::Known(rtype),
                    });
                }
                Rcode::Known(ResponseCode::NxRrset) => {
                    return Err(LookupError::NoSuchRrset {
                        name: name.clone(),
                        rtype: Type::Known(rtype),
                    });
                }
                Rcode::Known(ResponseCode::ServFail) => {
                    return Err(LookupError::ServerFailed);
                }
                other => {
                    return Err(LookupError::Failed(format!(
                        "unexpected response code {other}"
                    )));
                }
            }
        }
        Ok(answers.to_vec())
    }

    /// Flattens cache RRsets into records, rotating each set when result
    /// cycling is on. The counter is shared session-wide, so consecutive
    /// reads start at different members.
    fn materialize(&self, answers: Vec<RRset>) -> Vec<ResourceRecord> {
        let offset = if self.cycle_results {
            self.rotation.fetch_add(1, Ordering::Relaxed)
        } else {
            0
        };
        answers
            .into_iter()
            .flat_map(|set| {
                if self.cycle_results && set.len() > 1 {
                    set.records_rotated(offset)
                } else {
                    set.records().to_vec()
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for LookupSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupSession")
            .field("max_redirects", &self.max_redirects)
            .field("ndots", &self.ndots)
            .field("search_path", &self.search_path)
            .field("cycle_results", &self.cycle_results)
            .field("caches", &self.caches.len())
            .field("hosts", &self.hosts.is_some())
            .finish()
    }
}

/// Configures and builds a [`LookupSession`].
#[derive(Default)]
pub struct LookupSessionBuilder {
    transport: Option<Arc<dyn Transport>>,
    max_redirects: usize,
    ndots: usize,
    search_path: Vec<Name>,
    cycle_results: bool,
    caches: Vec<Arc<Cache>>,
    hosts: Option<HostsFile>,
}

impl LookupSessionBuilder {
    fn new() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            ndots: DEFAULT_NDOTS,
            ..Self::default()
        }
    }

    /// The transport queries are sent through. Required.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// A shared transport.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// The CNAME/DNAME hop budget per lookup.
    #[must_use]
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The label count above which a relative name is tried absolute
    /// first.
    #[must_use]
    pub fn ndots(mut self, ndots: usize) -> Self {
        self.ndots = ndots;
        self
    }

    /// Appends one search-path suffix; it is made absolute at build time.
    #[must_use]
    pub fn search_path(mut self, suffix: Name) -> Self {
        self.search_path.push(suffix);
        self
    }

    /// Removes all search-path suffixes added so far.
    #[must_use]
    pub fn clear_search_path(mut self) -> Self {
        self.search_path.clear();
        self
    }

    /// Rotates multi-record cache reads by one step per read.
    #[must_use]
    pub fn cycle_results(mut self, cycle_results: bool) -> Self {
        self.cycle_results = cycle_results;
        self
    }

    /// Installs a cache; an earlier cache for the same class is replaced.
    #[must_use]
    pub fn cache(mut self, cache: Arc<Cache>) -> Self {
        self.caches.retain(|c| c.dclass() != cache.dclass());
        self.caches.push(cache);
        self
    }

    /// Removes all caches added so far.
    #[must_use]
    pub fn clear_caches(mut self) -> Self {
        self.caches.clear();
        self
    }

    /// Consults the given hosts file before the resolver.
    #[must_use]
    pub fn hosts_file(mut self, hosts: HostsFile) -> Self {
        self.hosts = Some(hosts);
        self
    }

    /// Consults the platform's standard hosts file.
    #[must_use]
    pub fn system_hosts(self) -> Self {
        self.hosts_file(HostsFile::system_default())
    }

    /// Builds the session.
    pub fn build(self) -> Result<LookupSession, LookupError> {
        let Some(transport) = self.transport else {
            return Err(LookupError::Config("a transport is required".into()));
        };

        let mut search_path = Vec::with_capacity(self.search_path.len());
        for suffix in self.search_path {
            let absolute = suffix.concatenate(&Name::root()).map_err(|_| {
                LookupError::Config(format!("search path entry {suffix} is too long"))
            })?;
            search_path.push(absolute);
        }

        let caches = self
            .caches
            .into_iter()
            .map(|cache| (cache.dclass().code(), cache))
            .collect();

        Ok(LookupSession {
            transport,
            max_redirects: self.max_redirects,
            ndots: self.ndots,
            search_path,
            cycle_results: self.cycle_results,
            caches,
            hosts: self.hosts,
            rotation: AtomicUsize::new(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use std::str::FromStr;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn send(&self, _query: Message) -> Result<Message, TransportError> {
            Err(TransportError::Protocol("unreachable in this test".into()))
        }
    }

    fn session_with_search(suffixes: &[&str], ndots: usize) -> LookupSession {
        let mut builder = LookupSession::builder().transport(NullTransport).ndots(ndots);
        for suffix in suffixes {
            builder = builder.search_path(Name::from_str(suffix).unwrap());
        }
        builder.build().unwrap()
    }

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn absolute_name_is_sole_candidate() {
        let session = session_with_search(&["corp.example."], 1);
        let candidates = session.expand_name(&name("www.example.com.")).unwrap();
        assert_eq!(candidates, vec![name("www.example.com.")]);
    }

    #[test]
    fn few_labels_try_search_path_first() {
        let session = session_with_search(&["corp.example.", "lab.example."], 1);
        let candidates = session.expand_name(&name("host")).unwrap();
        assert_eq!(
            candidates,
            vec![
                name("host.corp.example."),
                name("host.lab.example."),
                name("host."),
            ]
        );
    }

    #[test]
    fn many_labels_try_absolute_first() {
        let session = session_with_search(&["corp.example."], 1);
        let candidates = session.expand_name(&name("db.internal")).unwrap();
        assert_eq!(
            candidates,
            vec![name("db.internal."), name("db.internal.corp.example.")]
        );
    }

    #[test]
    fn expansion_is_complete_and_root_unique() {
        let session = session_with_search(&["a.example.", "b.example."], 1);
        let query = name("host");
        let candidates = session.expand_name(&query).unwrap();

        let plain = query.concatenate(&Name::root()).unwrap();
        let from_root: Vec<_> = candidates.iter().filter(|c| **c == plain).collect();
        assert_eq!(from_root.len(), 1);

        for candidate in &candidates {
            let explained = *candidate == plain
                || session
                    .search_path
                    .iter()
                    .any(|s| query.concatenate(s).ok().as_ref() == Some(candidate));
            assert!(explained, "unexplained candidate {candidate}");
        }
    }

    #[test]
    fn overlong_concatenations_skipped() {
        let long = "a".repeat(60);
        let suffix = format!("{long}.{long}.{long}.example.");
        let session = session_with_search(&[&suffix], 1);

        let relative = "b.".repeat(35);
        let query = name(relative.trim_end_matches('.'));
        let candidates = session.expand_name(&query).unwrap();
        // The search-path candidate would exceed 255 octets; only the
        // plain absolute form remains.
        assert_eq!(candidates, vec![query.concatenate(&Name::root()).unwrap()]);
    }

    #[test]
    fn builder_requires_transport() {
        assert!(matches!(
            LookupSessionBuilder::default().build(),
            Err(LookupError::Config(_))
        ));
    }

    #[test]
    fn builder_replaces_cache_per_class() {
        let session = LookupSession::builder()
            .transport(NullTransport)
            .cache(Arc::new(Cache::new(RecordClass::In)))
            .cache(Arc::new(Cache::new(RecordClass::In)))
            .cache(Arc::new(Cache::new(RecordClass::Ch)))
            .build()
            .unwrap();
        assert_eq!(session.caches.len(), 2);
    }
}
