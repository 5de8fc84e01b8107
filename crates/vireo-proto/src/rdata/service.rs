//! Service discovery types: SRV, NAPTR, and the SVCB/HTTPS bindings.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::scan::{escape_bytes, unescape, Scanner};

/// Escapes a parameter value that is emitted outside quotes: spaces must
/// be escaped too or the scanner would split the token.
fn escape_param(bytes: &[u8], out: &mut String) {
    for &byte in bytes {
        match byte {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x21..=0x7E => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03}")),
        }
    }
}
use crate::wire::{MessageWriter, WireReader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// SRV — service location, RFC 2782.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Srv {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl Srv {
    /// Creates an SRV body.
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Self {
            priority,
            weight,
            port,
            target,
        }
    }

    /// The priority; lower is tried first.
    #[inline]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// The weight for load spreading within a priority.
    #[inline]
    pub const fn weight(&self) -> u16 {
        self.weight
    }

    /// The service port.
    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The target host.
    #[inline]
    pub fn target(&self) -> &Name {
        &self.target
    }

    pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
        let mut r = WireReader::new_at(message, offset);
        let priority = r.read_u16()?;
        let weight = r.read_u16()?;
        let port = r.read_u16()?;
        let target = NameParser::new(message).parse(r.position())?;
        Ok(Self {
            priority,
            weight,
            port,
            target,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            priority: s.u16("priority")?,
            weight: s.u16("weight")?,
            port: s.u16("port")?,
            target: s.name()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.priority);
        w.write_u16(self.weight);
        w.write_u16(self.port);
        w.write_name(&self.target, false);
    }
}

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

/// NAPTR — naming authority pointer, RFC 3403.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Naptr {
    order: u16,
    preference: u16,
    flags: Vec<u8>,
    services: Vec<u8>,
    regexp: Vec<u8>,
    replacement: Name,
}

impl Naptr {
    /// Creates a NAPTR body.
    pub fn new(
        order: u16,
        preference: u16,
        flags: Vec<u8>,
        services: Vec<u8>,
        regexp: Vec<u8>,
        replacement: Name,
    ) -> Self {
        Self {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        }
    }

    /// The processing order; lower first.
    #[inline]
    pub const fn order(&self) -> u16 {
        self.order
    }

    /// The preference within an order.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// The flags string.
    #[inline]
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// The services string.
    #[inline]
    pub fn services(&self) -> &[u8] {
        &self.services
    }

    /// The substitution expression.
    #[inline]
    pub fn regexp(&self) -> &[u8] {
        &self.regexp
    }

    /// The replacement name.
    #[inline]
    pub fn replacement(&self) -> &Name {
        &self.replacement
    }

    pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
        let mut r = WireReader::new_at(message, offset);
        let order = r.read_u16()?;
        let preference = r.read_u16()?;
        let flags = r.read_counted_string()?.to_vec();
        let services = r.read_counted_string()?.to_vec();
        let regexp = r.read_counted_string()?.to_vec();
        let replacement = NameParser::new(message).parse(r.position())?;
        Ok(Self {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            order: s.u16("order")?,
            preference: s.u16("preference")?,
            flags: s.string_bytes()?,
            services: s.string_bytes()?,
            regexp: s.string_bytes()?,
            replacement: s.name()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) -> Result<()> {
        w.write_u16(self.order);
        w.write_u16(self.preference);
        w.write_counted_string(&self.flags)?;
        w.write_counted_string(&self.services)?;
        w.write_counted_string(&self.regexp)?;
        w.write_name(&self.replacement, false);
        Ok(())
    }
}

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for field in [&self.flags, &self.services, &self.regexp] {
            out.push('"');
            escape_bytes(field, &mut out);
            out.push_str("\" ");
        }
        write!(
            f,
            "{} {} {}{}",
            self.order, self.preference, out, self.replacement
        )
    }
}

/// One SVCB/HTTPS service parameter, RFC 9460.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SvcParam {
    /// Keys the client must understand.
    Mandatory(Vec<u16>),
    /// ALPN protocol identifiers.
    Alpn(Vec<Vec<u8>>),
    /// The default ALPN set does not apply.
    NoDefaultAlpn,
    /// An alternative port.
    Port(u16),
    /// IPv4 address hints.
    Ipv4Hint(Vec<Ipv4Addr>),
    /// IPv6 address hints.
    Ipv6Hint(Vec<Ipv6Addr>),
    /// Any other key, value kept verbatim.
    Opaque {
        /// The parameter key.
        key: u16,
        /// The raw value octets.
        value: Vec<u8>,
    },
}

impl SvcParam {
    const KEY_MANDATORY: u16 = 0;
    const KEY_ALPN: u16 = 1;
    const KEY_NO_DEFAULT_ALPN: u16 = 2;
    const KEY_PORT: u16 = 3;
    const KEY_IPV4HINT: u16 = 4;
    const KEY_IPV6HINT: u16 = 6;

    /// The numeric parameter key.
    pub fn key(&self) -> u16 {
        match self {
            Self::Mandatory(_) => Self::KEY_MANDATORY,
            Self::Alpn(_) => Self::KEY_ALPN,
            Self::NoDefaultAlpn => Self::KEY_NO_DEFAULT_ALPN,
            Self::Port(_) => Self::KEY_PORT,
            Self::Ipv4Hint(_) => Self::KEY_IPV4HINT,
            Self::Ipv6Hint(_) => Self::KEY_IPV6HINT,
            Self::Opaque { key, .. } => *key,
        }
    }

    fn key_mnemonic(key: u16) -> Option<&'static str> {
        match key {
            Self::KEY_MANDATORY => Some("mandatory"),
            Self::KEY_ALPN => Some("alpn"),
            Self::KEY_NO_DEFAULT_ALPN => Some("no-default-alpn"),
            Self::KEY_PORT => Some("port"),
            Self::KEY_IPV4HINT => Some("ipv4hint"),
            Self::KEY_IPV6HINT => Some("ipv6hint"),
            _ => None,
        }
    }

    fn key_from_mnemonic(text: &str) -> Option<u16> {
        match text {
            "mandatory" => Some(Self::KEY_MANDATORY),
            "alpn" => Some(Self::KEY_ALPN),
            "no-default-alpn" => Some(Self::KEY_NO_DEFAULT_ALPN),
            "port" => Some(Self::KEY_PORT),
            "ipv4hint" => Some(Self::KEY_IPV4HINT),
            "ipv6hint" => Some(Self::KEY_IPV6HINT),
            _ => text.strip_prefix("key").and_then(|n| n.parse().ok()),
        }
    }

    fn parse_value(key: u16, value: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(value);
        Ok(match key {
            Self::KEY_MANDATORY => {
                let mut keys = Vec::new();
                while !r.is_empty() {
                    keys.push(r.read_u16()?);
                }
                Self::Mandatory(keys)
            }
            Self::KEY_ALPN => {
                let mut ids = Vec::new();
                while !r.is_empty() {
                    ids.push(r.read_counted_string()?.to_vec());
                }
                Self::Alpn(ids)
            }
            Self::KEY_NO_DEFAULT_ALPN => {
                if !value.is_empty() {
                    return Err(Error::presentation("no-default-alpn takes no value"));
                }
                Self::NoDefaultAlpn
            }
            Self::KEY_PORT => {
                let port = r.read_u16()?;
                if !r.is_empty() {
                    return Err(Error::presentation("trailing octets in port parameter"));
                }
                Self::Port(port)
            }
            Self::KEY_IPV4HINT => {
                let mut hints = Vec::new();
                while !r.is_empty() {
                    let octets: [u8; 4] = r.read_bytes(4)?.try_into().unwrap();
                    hints.push(Ipv4Addr::from(octets));
                }
                Self::Ipv4Hint(hints)
            }
            Self::KEY_IPV6HINT => {
                let mut hints = Vec::new();
                while !r.is_empty() {
                    let octets: [u8; 16] = r.read_bytes(16)?.try_into().unwrap();
                    hints.push(Ipv6Addr::from(octets));
                }
                Self::Ipv6Hint(hints)
            }
            key => Self::Opaque {
                key,
                value: value.to_vec(),
            },
        })
    }

    fn value_bytes(&self) -> Vec<u8> {
        match self {
            Self::Mandatory(keys) => keys.iter().flat_map(|k| k.to_be_bytes()).collect(),
            Self::Alpn(ids) => {
                let mut out = Vec::new();
                for id in ids {
                    out.push(id.len() as u8);
                    out.extend_from_slice(id);
                }
                out
            }
            Self::NoDefaultAlpn => Vec::new(),
            Self::Port(port) => port.to_be_bytes().to_vec(),
            Self::Ipv4Hint(hints) => hints.iter().flat_map(|a| a.octets()).collect(),
            Self::Ipv6Hint(hints) => hints.iter().flat_map(|a| a.octets()).collect(),
            Self::Opaque { value, .. } => value.clone(),
        }
    }

    fn parse_text(token: &str) -> Result<Self> {
        let (key_text, value_text) = match token.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (token, None),
        };
        let key = Self::key_from_mnemonic(key_text)
            .ok_or_else(|| Error::presentation(format!("unknown service parameter {key_text:?}")))?;

        match (key, value_text) {
            (Self::KEY_NO_DEFAULT_ALPN, None) => Ok(Self::NoDefaultAlpn),
            (_, None) => Ok(Self::Opaque {
                key,
                value: Vec::new(),
            }),
            (Self::KEY_MANDATORY, Some(v)) => {
                let keys = v
                    .split(',')
                    .map(|item| {
                        Self::key_from_mnemonic(item).ok_or_else(|| {
                            Error::presentation(format!("unknown mandatory key {item:?}"))
                        })
                    })
                    .collect::<Result<_>>()?;
                Ok(Self::Mandatory(keys))
            }
            (Self::KEY_ALPN, Some(v)) => Ok(Self::Alpn(
                v.split(',').map(|id| id.as_bytes().to_vec()).collect(),
            )),
            (Self::KEY_PORT, Some(v)) => {
                let port = v
                    .parse()
                    .map_err(|_| Error::presentation(format!("bad port {v:?}")))?;
                Ok(Self::Port(port))
            }
            (Self::KEY_IPV4HINT, Some(v)) => {
                let hints = v
                    .split(',')
                    .map(|a| {
                        a.parse()
                            .map_err(|_| Error::presentation(format!("bad IPv4 hint {a:?}")))
                    })
                    .collect::<Result<_>>()?;
                Ok(Self::Ipv4Hint(hints))
            }
            (Self::KEY_IPV6HINT, Some(v)) => {
                let hints = v
                    .split(',')
                    .map(|a| {
                        a.parse()
                            .map_err(|_| Error::presentation(format!("bad IPv6 hint {a:?}")))
                    })
                    .collect::<Result<_>>()?;
                Ok(Self::Ipv6Hint(hints))
            }
            (key, Some(v)) => Ok(Self::Opaque {
                key,
                value: unescape(v)?,
            }),
        }
    }
}

impl fmt::Display for SvcParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        match Self::key_mnemonic(key) {
            Some(name) => f.write_str(name)?,
            None => write!(f, "key{key}")?,
        }
        match self {
            Self::Mandatory(keys) => {
                let names: Vec<String> = keys
                    .iter()
                    .map(|&k| {
                        Self::key_mnemonic(k)
                            .map(str::to_owned)
                            .unwrap_or_else(|| format!("key{k}"))
                    })
                    .collect();
                write!(f, "={}", names.join(","))
            }
            Self::Alpn(ids) => {
                let mut out = String::new();
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    escape_param(id, &mut out);
                }
                write!(f, "={out}")
            }
            Self::NoDefaultAlpn => Ok(()),
            Self::Port(port) => write!(f, "={port}"),
            Self::Ipv4Hint(hints) => {
                let list: Vec<String> = hints.iter().map(Ipv4Addr::to_string).collect();
                write!(f, "={}", list.join(","))
            }
            Self::Ipv6Hint(hints) => {
                let list: Vec<String> = hints.iter().map(Ipv6Addr::to_string).collect();
                write!(f, "={}", list.join(","))
            }
            Self::Opaque { value, .. } => {
                if value.is_empty() {
                    return Ok(());
                }
                let mut out = String::new();
                escape_param(value, &mut out);
                write!(f, "={out}")
            }
        }
    }
}

/// SVCB — general service binding, RFC 9460. HTTPS shares the layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Svcb {
    priority: u16,
    target: Name,
    params: Vec<SvcParam>,
}

impl Svcb {
    /// Creates a service binding; parameters are kept in ascending key
    /// order as RFC 9460 requires on the wire.
    pub fn new(priority: u16, target: Name, mut params: Vec<SvcParam>) -> Self {
        params.sort_by_key(SvcParam::key);
        Self {
            priority,
            target,
            params,
        }
    }

    /// The priority; zero marks the alias form.
    #[inline]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// True for the alias form (priority zero).
    #[inline]
    pub const fn is_alias_form(&self) -> bool {
        self.priority == 0
    }

    /// The target name; the root means the owner itself.
    #[inline]
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// The service parameters, ascending by key.
    #[inline]
    pub fn params(&self) -> &[SvcParam] {
        &self.params
    }

    pub(super) fn parse(message: &[u8], offset: usize, rdlen: u16) -> Result<Self> {
        let end = offset + rdlen as usize;
        let mut r = WireReader::new_at(message, offset);
        let previous = r.restrict(rdlen as usize)?;
        let priority = r.read_u16()?;
        let (target, consumed) = NameParser::new(message).parse_name(r.position())?;
        r.seek(r.position() + consumed);

        let mut params = Vec::new();
        while r.position() < end {
            let key = r.read_u16()?;
            let len = r.read_u16()? as usize;
            let value = r.read_bytes(len)?;
            params.push(SvcParam::parse_value(key, value)?);
        }
        r.unrestrict(previous);

        Ok(Self {
            priority,
            target,
            params,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let priority = s.u16("priority")?;
        let target = s.name()?;
        let mut params = Vec::new();
        while let Some(token) = s.next_token()? {
            params.push(SvcParam::parse_text(token.text)?);
        }
        Ok(Self::new(priority, target, params))
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.priority);
        w.write_name(&self.target, false);
        for param in &self.params {
            let value = param.value_bytes();
            w.write_u16(param.key());
            w.write_u16(value.len() as u16);
            w.write_bytes(&value);
        }
    }
}

impl fmt::Display for Svcb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.priority, self.target)?;
        for param in &self.params {
            write!(f, " {param}")?;
        }
        Ok(())
    }
}
