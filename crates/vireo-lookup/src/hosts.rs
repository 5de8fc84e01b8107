//! Local hosts-file lookups.
//!
//! A [`HostsFile`] answers A and AAAA probes from an `/etc/hosts`-style
//! static map before any resolver is consulted. The file is parsed on
//! first use and re-parsed when its modification time changes; malformed
//! lines are skipped, I/O failures surface to the caller (the session
//! logs and falls through to the resolver).

use hashbrown::HashMap;
use parking_lot::Mutex;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;
use tracing::trace;
use vireo_proto::rtype::RecordType;
use vireo_proto::Name;

#[derive(Debug, Default)]
struct HostsMap {
    modified: Option<SystemTime>,
    v4: HashMap<Name, Ipv4Addr>,
    v6: HashMap<Name, Ipv6Addr>,
}

/// A static host→address map backed by a hosts-format file.
#[derive(Debug)]
pub struct HostsFile {
    path: PathBuf,
    map: Mutex<Option<HostsMap>>,
}

impl HostsFile {
    /// Uses the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            map: Mutex::new(None),
        }
    }

    /// Uses the platform's standard hosts file.
    pub fn system_default() -> Self {
        #[cfg(windows)]
        let path = PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts");
        #[cfg(not(windows))]
        let path = PathBuf::from("/etc/hosts");
        Self::new(path)
    }

    /// The backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up an address of the requested family for `name`.
    ///
    /// Only [`RecordType::A`] and [`RecordType::AAAA`] can match; every
    /// other type is `Ok(None)` without touching the file.
    pub fn address_for(&self, name: &Name, rtype: RecordType) -> io::Result<Option<IpAddr>> {
        if !matches!(rtype, RecordType::A | RecordType::AAAA) {
            return Ok(None);
        }

        let mut guard = self.map.lock();
        let current_modified = std::fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        let stale = match guard.as_ref() {
            Some(map) => map.modified != current_modified,
            None => true,
        };
        if stale {
            *guard = Some(self.load(current_modified)?);
        }

        let Some(map) = guard.as_ref() else {
            return Ok(None);
        };
        Ok(match rtype {
            RecordType::A => map.v4.get(name).copied().map(IpAddr::V4),
            RecordType::AAAA => map.v6.get(name).copied().map(IpAddr::V6),
            _ => None,
        })
    }

    fn load(&self, modified: Option<SystemTime>) -> io::Result<HostsMap> {
        let content = std::fs::read_to_string(&self.path)?;
        let mut map = HostsMap {
            modified,
            ..HostsMap::default()
        };

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("");
            let mut fields = line.split_whitespace();
            let Some(addr_text) = fields.next() else {
                continue;
            };
            let Ok(addr) = addr_text.parse::<IpAddr>() else {
                trace!(line = addr_text, "skipping unparsable hosts entry");
                continue;
            };

            for host in fields {
                let Ok(parsed) = Name::from_str(host) else {
                    continue;
                };
                let Ok(absolute) = parsed.concatenate(&Name::root()) else {
                    continue;
                };
                match addr {
                    IpAddr::V4(v4) => {
                        map.v4.entry(absolute).or_insert(v4);
                    }
                    IpAddr::V6(v6) => {
                        map.v6.entry(absolute).or_insert(v6);
                    }
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn hosts_with(content: &str) -> (tempfile::TempDir, HostsFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, HostsFile::new(path))
    }

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn parses_both_families_and_aliases() {
        let (_dir, hosts) = hosts_with(
            "127.0.0.1 localhost local # loopback\n\
             ::1 localhost\n\
             10.0.0.7 db.internal\n\
             garbage-line\n",
        );

        assert_eq!(
            hosts.address_for(&name("localhost."), RecordType::A).unwrap(),
            Some("127.0.0.1".parse().unwrap())
        );
        assert_eq!(
            hosts
                .address_for(&name("localhost."), RecordType::AAAA)
                .unwrap(),
            Some("::1".parse().unwrap())
        );
        assert_eq!(
            hosts.address_for(&name("local."), RecordType::A).unwrap(),
            Some("127.0.0.1".parse().unwrap())
        );
        assert_eq!(
            hosts
                .address_for(&name("db.internal."), RecordType::A)
                .unwrap(),
            Some("10.0.0.7".parse().unwrap())
        );
        assert_eq!(
            hosts.address_for(&name("unknown."), RecordType::A).unwrap(),
            None
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let (_dir, hosts) = hosts_with("192.0.2.1 MixedCase.Example\n");
        assert_eq!(
            hosts
                .address_for(&name("mixedcase.example."), RecordType::A)
                .unwrap(),
            Some("192.0.2.1".parse().unwrap())
        );
    }

    #[test]
    fn non_address_types_never_match() {
        let (_dir, hosts) = hosts_with("127.0.0.1 localhost\n");
        assert_eq!(
            hosts.address_for(&name("localhost."), RecordType::MX).unwrap(),
            None
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let hosts = HostsFile::new("/nonexistent/vireo-hosts-test");
        assert!(hosts.address_for(&name("a."), RecordType::A).is_err());
    }
}
