//! End-to-end session behaviour against a scripted transport.

use async_trait::async_trait;
use std::io::Write;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vireo_cache::Cache;
use vireo_lookup::{LookupError, LookupSession};
use vireo_lookup::{HostsFile, Transport, TransportError};
use vireo_proto::message::Section;
use vireo_proto::rdata::{Dname, RData, Soa};
use vireo_proto::{
    Class, Message, Name, Rcode, RecordClass, RecordType, ResourceRecord, ResponseCode,
};

type Handler = dyn Fn(&Message) -> Result<Message, TransportError> + Send + Sync;

struct MockTransport {
    handler: Box<Handler>,
    calls: Arc<AtomicUsize>,
}

impl MockTransport {
    fn new(
        handler: impl Fn(&Message) -> Result<Message, TransportError> + Send + Sync + 'static,
    ) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                handler: Box::new(handler),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, query: Message) -> Result<Message, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut response = (self.handler)(&query)?;
        response.set_id(query.id());
        Ok(response)
    }
}

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn qname(query: &Message) -> Name {
    query.question().unwrap().qname.clone()
}

fn answer(query: &Message, records: Vec<ResourceRecord>) -> Message {
    let mut response = Message::response_to(query);
    for record in records {
        response.push(Section::Answer, record);
    }
    response
}

fn nxdomain(query: &Message) -> Message {
    let mut response = Message::response_to(query);
    response.set_rcode(Rcode::Known(ResponseCode::NxDomain));
    response.push(
        Section::Authority,
        ResourceRecord::new(
            name("example."),
            Class::Known(RecordClass::In),
            3600,
            RData::Soa(Soa::new(
                name("ns1.example."),
                name("hostmaster.example."),
                1,
                7200,
                900,
                1209600,
                600,
            )),
        ),
    );
    response
}

fn a(owner: &str, ttl: u32, last: u8) -> ResourceRecord {
    ResourceRecord::a(name(owner), ttl, Ipv4Addr::new(192, 0, 2, last))
}

#[tokio::test]
async fn simple_a_query_and_cache_fill() {
    let (transport, calls) = MockTransport::new(|query| {
        Ok(answer(query, vec![a("example.com.", 300, 1)]))
    });
    let cache = Arc::new(Cache::new(RecordClass::In));
    let session = LookupSession::builder()
        .transport(transport)
        .cache(Arc::clone(&cache))
        .build()
        .unwrap();

    let result = session
        .lookup(&name("example.com."), RecordType::A, RecordClass::In)
        .await
        .unwrap();

    assert_eq!(result.records().len(), 1);
    assert_eq!(
        result.records()[0].rdata().ip_addr().unwrap().to_string(),
        "192.0.2.1"
    );
    assert!(result.aliases().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);

    // The second lookup is served from the cache.
    let again = session
        .lookup(&name("example.com."), RecordType::A, RecordClass::In)
        .await
        .unwrap();
    assert_eq!(again.records().len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cname_chain_followed_across_queries() {
    let (transport, calls) = MockTransport::new(|query| {
        let qname = qname(query);
        if qname == name("www.example.com.") {
            Ok(answer(
                query,
                vec![ResourceRecord::cname(
                    name("www.example.com."),
                    300,
                    name("alias.example.com."),
                )],
            ))
        } else if qname == name("alias.example.com.") {
            Ok(answer(query, vec![a("alias.example.com.", 300, 2)]))
        } else {
            Err(TransportError::Protocol(format!("unexpected query {qname}")))
        }
    });
    let session = LookupSession::builder().transport(transport).build().unwrap();

    let result = session
        .lookup(&name("www.example.com."), RecordType::A, RecordClass::In)
        .await
        .unwrap();

    assert_eq!(result.records().len(), 1);
    assert_eq!(result.records()[0].name(), &name("alias.example.com."));
    assert_eq!(
        result.records()[0].rdata().ip_addr().unwrap().to_string(),
        "192.0.2.2"
    );
    assert_eq!(result.aliases(), &[name("www.example.com.")]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dname_rewrites_in_one_response() {
    let (transport, calls) = MockTransport::new(|query| {
        Ok(answer(
            query,
            vec![
                ResourceRecord::new(
                    name("old.example."),
                    Class::Known(RecordClass::In),
                    300,
                    RData::Dname(Dname::new(name("new.example."))),
                ),
                a("x.new.example.", 300, 3),
            ],
        ))
    });
    let session = LookupSession::builder().transport(transport).build().unwrap();

    let result = session
        .lookup(&name("x.old.example."), RecordType::A, RecordClass::In)
        .await
        .unwrap();

    assert_eq!(result.records().len(), 1);
    assert_eq!(result.records()[0].name(), &name("x.new.example."));
    assert_eq!(result.aliases(), &[name("x.old.example.")]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn search_path_recovers_from_nxdomain() {
    let (transport, calls) = MockTransport::new(|query| {
        let qname = qname(query);
        if qname == name("host.corp.example.") {
            Ok(nxdomain(query))
        } else if qname == name("host.") {
            Ok(answer(query, vec![a("host.", 300, 4)]))
        } else {
            Err(TransportError::Protocol(format!("unexpected query {qname}")))
        }
    });
    let session = LookupSession::builder()
        .transport(transport)
        .ndots(1)
        .search_path(name("corp.example."))
        .build()
        .unwrap();

    // "host" has one label, so the search path is tried before the
    // absolute form; the NXDOMAIN on the first candidate is recovered.
    let result = session
        .lookup(&name("host"), RecordType::A, RecordClass::In)
        .await
        .unwrap();

    assert_eq!(result.records()[0].name(), &name("host."));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn search_path_exhaustion_fails_with_nxdomain() {
    let (transport, calls) = MockTransport::new(|query| Ok(nxdomain(query)));
    let session = LookupSession::builder()
        .transport(transport)
        .search_path(name("corp.example."))
        .build()
        .unwrap();

    let error = session
        .lookup(&name("host"), RecordType::A, RecordClass::In)
        .await
        .unwrap_err();

    assert!(matches!(error, LookupError::NoSuchDomain { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cname_loop_overflows_within_budget() {
    let (transport, calls) = MockTransport::new(|query| {
        Ok(answer(
            query,
            vec![
                ResourceRecord::cname(name("a.example."), 30, name("b.example.")),
                ResourceRecord::cname(name("b.example."), 30, name("a.example.")),
            ],
        ))
    });
    let session = LookupSession::builder().transport(transport).build().unwrap();

    let error = session
        .lookup(&name("a.example."), RecordType::A, RecordClass::In)
        .await
        .unwrap_err();

    assert!(matches!(error, LookupError::RedirectOverflow { max: 16 }));
    assert!(calls.load(Ordering::SeqCst) <= 17);
}

#[tokio::test]
async fn hosts_file_short_circuits_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "10.0.0.1 localhost").unwrap();

    let (transport, calls) =
        MockTransport::new(|_| Err(TransportError::Protocol("must not be queried".into())));
    let session = LookupSession::builder()
        .transport(transport)
        .hosts_file(HostsFile::new(path))
        .build()
        .unwrap();

    let result = session
        .lookup(&name("localhost"), RecordType::A, RecordClass::In)
        .await
        .unwrap();

    assert_eq!(result.records().len(), 1);
    assert_eq!(result.records()[0].ttl(), 0);
    assert_eq!(
        result.records()[0].rdata().ip_addr().unwrap().to_string(),
        "10.0.0.1"
    );
    assert!(result.aliases().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn servfail_aborts_search_path() {
    let (transport, calls) = MockTransport::new(|query| {
        let mut response = Message::response_to(query);
        response.set_rcode(Rcode::Known(ResponseCode::ServFail));
        Ok(response)
    });
    let session = LookupSession::builder()
        .transport(transport)
        .search_path(name("corp.example."))
        .build()
        .unwrap();

    let error = session
        .lookup(&name("host"), RecordType::A, RecordClass::In)
        .await
        .unwrap_err();

    assert!(matches!(error, LookupError::ServerFailed));
    // SERVFAIL is not recovered: no further candidates were tried.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn multiple_cnames_for_one_owner_rejected() {
    let (transport, _calls) = MockTransport::new(|query| {
        Ok(answer(
            query,
            vec![
                ResourceRecord::cname(name("www.example.com."), 300, name("one.example.com.")),
                ResourceRecord::cname(name("www.example.com."), 300, name("two.example.com.")),
            ],
        ))
    });
    let session = LookupSession::builder().transport(transport).build().unwrap();

    let error = session
        .lookup(&name("www.example.com."), RecordType::A, RecordClass::In)
        .await
        .unwrap_err();

    assert!(matches!(error, LookupError::InvalidZoneData(_)));
}

#[tokio::test]
async fn cached_negative_answers_without_transport() {
    let (transport, calls) = MockTransport::new(|query| Ok(nxdomain(query)));
    let cache = Arc::new(Cache::new(RecordClass::In));
    let session = LookupSession::builder()
        .transport(transport)
        .cache(cache)
        .build()
        .unwrap();

    let target = name("missing.example.");
    let first = session
        .lookup(&target, RecordType::A, RecordClass::In)
        .await
        .unwrap_err();
    assert!(matches!(first, LookupError::NoSuchDomain { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The NXDOMAIN is now served from the cache, for any type.
    let second = session
        .lookup(&target, RecordType::MX, RecordClass::In)
        .await
        .unwrap_err();
    assert!(matches!(second, LookupError::NoSuchDomain { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cycling_rotates_cached_sets() {
    let (transport, calls) = MockTransport::new(|query| {
        Ok(answer(
            query,
            vec![
                a("pool.example.", 300, 1),
                a("pool.example.", 300, 2),
                a("pool.example.", 300, 3),
            ],
        ))
    });
    let session = LookupSession::builder()
        .transport(transport)
        .cache(Arc::new(Cache::new(RecordClass::In)))
        .cycle_results(true)
        .build()
        .unwrap();

    let target = name("pool.example.");
    let fill = session
        .lookup(&target, RecordType::A, RecordClass::In)
        .await
        .unwrap();
    assert_eq!(fill.records().len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let first = session
        .lookup(&target, RecordType::A, RecordClass::In)
        .await
        .unwrap();
    let second = session
        .lookup(&target, RecordType::A, RecordClass::In)
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Consecutive cache reads start one member apart.
    assert_eq!(first.records().len(), 3);
    assert_eq!(second.records()[0], first.records()[1]);
}

#[tokio::test]
async fn transport_failure_propagates() {
    let (transport, _calls) =
        MockTransport::new(|_| Err(TransportError::Protocol("scripted failure".into())));
    let session = LookupSession::builder().transport(transport).build().unwrap();

    let error = session
        .lookup(&name("example.com."), RecordType::A, RecordClass::In)
        .await
        .unwrap_err();
    assert!(matches!(error, LookupError::Transport(_)));
}

#[tokio::test]
async fn nodata_yields_empty_result() {
    let (transport, _calls) = MockTransport::new(|query| Ok(Message::response_to(query)));
    let session = LookupSession::builder().transport(transport).build().unwrap();

    let result = session
        .lookup(&name("example.com."), RecordType::AAAA, RecordClass::In)
        .await
        .unwrap();
    assert!(result.records().is_empty());
    assert!(result.aliases().is_empty());
}

#[tokio::test]
async fn concurrent_lookups_share_one_session() {
    let (transport, _calls) = MockTransport::new(|query| {
        let owner = qname(query);
        let last = owner.to_string().len() as u8;
        let record = ResourceRecord::a(owner, 300, Ipv4Addr::new(192, 0, 2, last));
        Ok(answer(query, vec![record]))
    });
    let session = Arc::new(
        LookupSession::builder()
            .transport(transport)
            .cache(Arc::new(Cache::new(RecordClass::In)))
            .build()
            .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let session = Arc::clone(&session);
        handles.push(tokio::spawn(async move {
            let target = name(&format!("host{i}.example.com."));
            session
                .lookup(&target, RecordType::A, RecordClass::In)
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.records().len(), 1);
    }
}
