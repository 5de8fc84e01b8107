//! The record catalog: one codec per supported RDATA layout.
//!
//! Modules group types by shape: `address`, `single_name`, `mail`
//! (preference/name compounds), `authority`, `service`, `text`, `payload`,
//! `dnssec`, and the RFC 3597 `unknown` fallback. [`RData`] dispatches
//! between them.
//!
//! Types with no codec here — including TSIG, TKEY, and other meta
//! payloads the lookup core never interprets — round-trip through
//! [`Unknown`] untouched.

pub mod address;
pub mod authority;
pub mod dnssec;
pub mod mail;
pub mod payload;
pub mod service;
pub mod single_name;
pub mod text;
pub mod unknown;

pub use address::{Aaaa, A};
pub use authority::Soa;
pub use dnssec::{Dnskey, Ds, Nsec, Nsec3, Nsec3param, Sig, Sshfp, Tlsa, TypeBitmap};
pub use mail::{Afsdb, Kx, Minfo, Mx, Px, Rp, Rt};
pub use payload::{Cert, Dhcid, Openpgpkey};
pub use service::{Naptr, Srv, Svcb, SvcParam};
pub use single_name::{Cname, Dname, Mb, Mg, Mr, Ns, Ptr};
pub use text::{Hinfo, Null, Txt};
pub use unknown::Unknown;

use crate::error::{Error, Result};
use crate::name::Name;
use crate::rtype::{RecordType, Type};
use crate::scan::Scanner;
use crate::wire::MessageWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Parsed record data.
///
/// SIG/RRSIG, DS/CDS, DNSKEY/CDNSKEY, TLSA/SMIMEA, and SVCB/HTTPS share
/// their body types; the variant keeps the distinction on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum RData {
    A(A),
    Aaaa(Aaaa),
    Ns(Ns),
    Cname(Cname),
    Ptr(Ptr),
    Dname(Dname),
    Mb(Mb),
    Mg(Mg),
    Mr(Mr),
    Mx(Mx),
    Kx(Kx),
    Rt(Rt),
    Afsdb(Afsdb),
    Px(Px),
    Minfo(Minfo),
    Rp(Rp),
    Soa(Soa),
    Srv(Srv),
    Naptr(Naptr),
    Hinfo(Hinfo),
    Txt(Txt),
    Null(Null),
    Cert(Cert),
    Openpgpkey(Openpgpkey),
    Dhcid(Dhcid),
    Sig(Sig),
    Rrsig(Sig),
    Dnskey(Dnskey),
    Cdnskey(Dnskey),
    Ds(Ds),
    Cds(Ds),
    Nsec(Nsec),
    Nsec3(Nsec3),
    Nsec3param(Nsec3param),
    Sshfp(Sshfp),
    Tlsa(Tlsa),
    Smimea(Tlsa),
    Svcb(Svcb),
    Https(Svcb),
    Unknown(Unknown),
}

impl RData {
    /// Parses RDATA of the given type out of a message.
    ///
    /// `offset` points at the RDATA within `message`; embedded names may
    /// reach backwards through compression pointers, which is why the
    /// whole message is needed.
    pub fn parse(rtype: Type, message: &[u8], offset: usize, rdlen: u16) -> Result<Self> {
        let end = offset
            .checked_add(rdlen as usize)
            .ok_or(Error::eof(offset))?;
        if end > message.len() {
            return Err(Error::RdataOverrun {
                rtype: rtype.to_string(),
                declared: rdlen,
            });
        }
        let slice = &message[offset..end];

        use RecordType as T;
        let Some(known) = rtype.known() else {
            return Ok(Self::Unknown(Unknown::parse(rtype.code(), slice)));
        };

        Ok(match known {
            T::A => Self::A(A::parse(slice)?),
            T::AAAA => Self::Aaaa(Aaaa::parse(slice)?),
            T::NS => Self::Ns(Ns::parse(message, offset)?),
            T::CNAME => Self::Cname(Cname::parse(message, offset)?),
            T::PTR => Self::Ptr(Ptr::parse(message, offset)?),
            T::DNAME => Self::Dname(Dname::parse(message, offset)?),
            T::MB => Self::Mb(Mb::parse(message, offset)?),
            T::MG => Self::Mg(Mg::parse(message, offset)?),
            T::MR => Self::Mr(Mr::parse(message, offset)?),
            T::MX => Self::Mx(Mx::parse(message, offset)?),
            T::KX => Self::Kx(Kx::parse(message, offset)?),
            T::RT => Self::Rt(Rt::parse(message, offset)?),
            T::AFSDB => Self::Afsdb(Afsdb::parse(message, offset)?),
            T::PX => Self::Px(Px::parse(message, offset)?),
            T::MINFO => Self::Minfo(Minfo::parse(message, offset)?),
            T::RP => Self::Rp(Rp::parse(message, offset)?),
            T::SOA => Self::Soa(Soa::parse(message, offset)?),
            T::SRV => Self::Srv(Srv::parse(message, offset)?),
            T::NAPTR => Self::Naptr(Naptr::parse(message, offset)?),
            T::HINFO => Self::Hinfo(Hinfo::parse(slice)?),
            T::TXT | T::SPF => Self::Txt(Txt::parse(slice)?),
            T::NULL => Self::Null(Null::parse(slice)?),
            T::CERT => Self::Cert(Cert::parse(slice)?),
            T::OPENPGPKEY => Self::Openpgpkey(Openpgpkey::parse(slice)?),
            T::DHCID => Self::Dhcid(Dhcid::parse(slice)?),
            T::SIG => Self::Sig(Sig::parse(message, offset, rdlen)?),
            T::RRSIG => Self::Rrsig(Sig::parse(message, offset, rdlen)?),
            T::DNSKEY => Self::Dnskey(Dnskey::parse(slice)?),
            T::CDNSKEY => Self::Cdnskey(Dnskey::parse(slice)?),
            T::DS => Self::Ds(Ds::parse(slice)?),
            T::CDS => Self::Cds(Ds::parse(slice)?),
            T::NSEC => Self::Nsec(Nsec::parse(message, offset, rdlen)?),
            T::NSEC3 => Self::Nsec3(Nsec3::parse(slice)?),
            T::NSEC3PARAM => Self::Nsec3param(Nsec3param::parse(slice)?),
            T::SSHFP => Self::Sshfp(Sshfp::parse(slice)?),
            T::TLSA => Self::Tlsa(Tlsa::parse(slice)?),
            T::SMIMEA => Self::Smimea(Tlsa::parse(slice)?),
            T::SVCB => Self::Svcb(Svcb::parse(message, offset, rdlen)?),
            T::HTTPS => Self::Https(Svcb::parse(message, offset, rdlen)?),
            other => Self::Unknown(Unknown::parse(other.code(), slice)),
        })
    }

    /// Parses RDATA of the given type from presentation text.
    pub fn parse_text(rtype: Type, s: &mut Scanner<'_>) -> Result<Self> {
        use RecordType as T;
        let Some(known) = rtype.known() else {
            return Ok(Self::Unknown(Unknown::parse_text(rtype.code(), s)?));
        };

        Ok(match known {
            T::A => Self::A(A::parse_text(s)?),
            T::AAAA => Self::Aaaa(Aaaa::parse_text(s)?),
            T::NS => Self::Ns(Ns::parse_text(s)?),
            T::CNAME => Self::Cname(Cname::parse_text(s)?),
            T::PTR => Self::Ptr(Ptr::parse_text(s)?),
            T::DNAME => Self::Dname(Dname::parse_text(s)?),
            T::MB => Self::Mb(Mb::parse_text(s)?),
            T::MG => Self::Mg(Mg::parse_text(s)?),
            T::MR => Self::Mr(Mr::parse_text(s)?),
            T::MX => Self::Mx(Mx::parse_text(s)?),
            T::KX => Self::Kx(Kx::parse_text(s)?),
            T::RT => Self::Rt(Rt::parse_text(s)?),
            T::AFSDB => Self::Afsdb(Afsdb::parse_text(s)?),
            T::PX => Self::Px(Px::parse_text(s)?),
            T::MINFO => Self::Minfo(Minfo::parse_text(s)?),
            T::RP => Self::Rp(Rp::parse_text(s)?),
            T::SOA => Self::Soa(Soa::parse_text(s)?),
            T::SRV => Self::Srv(Srv::parse_text(s)?),
            T::NAPTR => Self::Naptr(Naptr::parse_text(s)?),
            T::HINFO => Self::Hinfo(Hinfo::parse_text(s)?),
            T::TXT | T::SPF => Self::Txt(Txt::parse_text(s)?),
            T::NULL => Self::Null(Null::parse_text(s)?),
            T::CERT => Self::Cert(Cert::parse_text(s)?),
            T::OPENPGPKEY => Self::Openpgpkey(Openpgpkey::parse_text(s)?),
            T::DHCID => Self::Dhcid(Dhcid::parse_text(s)?),
            T::SIG => Self::Sig(Sig::parse_text(s)?),
            T::RRSIG => Self::Rrsig(Sig::parse_text(s)?),
            T::DNSKEY => Self::Dnskey(Dnskey::parse_text(s)?),
            T::CDNSKEY => Self::Cdnskey(Dnskey::parse_text(s)?),
            T::DS => Self::Ds(Ds::parse_text(s)?),
            T::CDS => Self::Cds(Ds::parse_text(s)?),
            T::NSEC => Self::Nsec(Nsec::parse_text(s)?),
            T::NSEC3 => Self::Nsec3(Nsec3::parse_text(s)?),
            T::NSEC3PARAM => Self::Nsec3param(Nsec3param::parse_text(s)?),
            T::SSHFP => Self::Sshfp(Sshfp::parse_text(s)?),
            T::TLSA => Self::Tlsa(Tlsa::parse_text(s)?),
            T::SMIMEA => Self::Smimea(Tlsa::parse_text(s)?),
            T::SVCB => Self::Svcb(Svcb::parse_text(s)?),
            T::HTTPS => Self::Https(Svcb::parse_text(s)?),
            other => Self::Unknown(Unknown::parse_text(other.code(), s)?),
        })
    }

    /// The type this data belongs to.
    pub fn rtype(&self) -> Type {
        use RecordType as T;
        match self {
            Self::A(_) => T::A.into(),
            Self::Aaaa(_) => T::AAAA.into(),
            Self::Ns(_) => T::NS.into(),
            Self::Cname(_) => T::CNAME.into(),
            Self::Ptr(_) => T::PTR.into(),
            Self::Dname(_) => T::DNAME.into(),
            Self::Mb(_) => T::MB.into(),
            Self::Mg(_) => T::MG.into(),
            Self::Mr(_) => T::MR.into(),
            Self::Mx(_) => T::MX.into(),
            Self::Kx(_) => T::KX.into(),
            Self::Rt(_) => T::RT.into(),
            Self::Afsdb(_) => T::AFSDB.into(),
            Self::Px(_) => T::PX.into(),
            Self::Minfo(_) => T::MINFO.into(),
            Self::Rp(_) => T::RP.into(),
            Self::Soa(_) => T::SOA.into(),
            Self::Srv(_) => T::SRV.into(),
            Self::Naptr(_) => T::NAPTR.into(),
            Self::Hinfo(_) => T::HINFO.into(),
            Self::Txt(_) => T::TXT.into(),
            Self::Null(_) => T::NULL.into(),
            Self::Cert(_) => T::CERT.into(),
            Self::Openpgpkey(_) => T::OPENPGPKEY.into(),
            Self::Dhcid(_) => T::DHCID.into(),
            Self::Sig(_) => T::SIG.into(),
            Self::Rrsig(_) => T::RRSIG.into(),
            Self::Dnskey(_) => T::DNSKEY.into(),
            Self::Cdnskey(_) => T::CDNSKEY.into(),
            Self::Ds(_) => T::DS.into(),
            Self::Cds(_) => T::CDS.into(),
            Self::Nsec(_) => T::NSEC.into(),
            Self::Nsec3(_) => T::NSEC3.into(),
            Self::Nsec3param(_) => T::NSEC3PARAM.into(),
            Self::Sshfp(_) => T::SSHFP.into(),
            Self::Tlsa(_) => T::TLSA.into(),
            Self::Smimea(_) => T::SMIMEA.into(),
            Self::Svcb(_) => T::SVCB.into(),
            Self::Https(_) => T::HTTPS.into(),
            Self::Unknown(u) => Type::from_code(u.code()),
        }
    }

    /// Emits the RDATA body.
    ///
    /// `compress` tells name-bearing bodies whether their names may join
    /// the message's compression table; [`RecordType::compresses_rdata_names`]
    /// decides it per type.
    pub fn emit(&self, w: &mut MessageWriter, compress: bool) -> Result<()> {
        match self {
            Self::A(r) => r.emit(w),
            Self::Aaaa(r) => r.emit(w),
            Self::Ns(r) => r.emit(w, compress),
            Self::Cname(r) => r.emit(w, compress),
            Self::Ptr(r) => r.emit(w, compress),
            Self::Dname(r) => r.emit(w, compress),
            Self::Mb(r) => r.emit(w, compress),
            Self::Mg(r) => r.emit(w, compress),
            Self::Mr(r) => r.emit(w, compress),
            Self::Mx(r) => r.emit(w, compress),
            Self::Kx(r) => r.emit(w, compress),
            Self::Rt(r) => r.emit(w, compress),
            Self::Afsdb(r) => r.emit(w, compress),
            Self::Px(r) => r.emit(w),
            Self::Minfo(r) => r.emit(w, compress),
            Self::Rp(r) => r.emit(w, compress),
            Self::Soa(r) => r.emit(w, compress),
            Self::Srv(r) => r.emit(w),
            Self::Naptr(r) => r.emit(w)?,
            Self::Hinfo(r) => r.emit(w),
            Self::Txt(r) => r.emit(w),
            Self::Null(r) => r.emit(w),
            Self::Cert(r) => r.emit(w),
            Self::Openpgpkey(r) => r.emit(w),
            Self::Dhcid(r) => r.emit(w),
            Self::Sig(r) | Self::Rrsig(r) => r.emit(w),
            Self::Dnskey(r) | Self::Cdnskey(r) => r.emit(w),
            Self::Ds(r) | Self::Cds(r) => r.emit(w),
            Self::Nsec(r) => r.emit(w),
            Self::Nsec3(r) => r.emit(w),
            Self::Nsec3param(r) => r.emit(w),
            Self::Sshfp(r) => r.emit(w),
            Self::Tlsa(r) | Self::Smimea(r) => r.emit(w),
            Self::Svcb(r) | Self::Https(r) => r.emit(w),
            Self::Unknown(r) => r.emit(w),
        }
        Ok(())
    }

    /// The address, for A and AAAA bodies.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self {
            Self::A(a) => Some(IpAddr::V4(a.address())),
            Self::Aaaa(aaaa) => Some(IpAddr::V6(aaaa.address())),
            _ => None,
        }
    }

    /// The CNAME target, when this is a CNAME body.
    pub fn cname_target(&self) -> Option<&Name> {
        match self {
            Self::Cname(c) => Some(c.target()),
            _ => None,
        }
    }

    /// The DNAME body, when this is one.
    pub fn as_dname(&self) -> Option<&Dname> {
        match self {
            Self::Dname(d) => Some(d),
            _ => None,
        }
    }

    /// The SOA body, when this is one.
    pub fn as_soa(&self) -> Option<&Soa> {
        match self {
            Self::Soa(s) => Some(s),
            _ => None,
        }
    }

    /// The signature body of a SIG or RRSIG.
    pub fn as_sig(&self) -> Option<&Sig> {
        match self {
            Self::Sig(s) | Self::Rrsig(s) => Some(s),
            _ => None,
        }
    }

    /// True for the two redirecting types.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Cname(_) | Self::Dname(_))
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(r) => r.fmt(f),
            Self::Aaaa(r) => r.fmt(f),
            Self::Ns(r) => r.fmt(f),
            Self::Cname(r) => r.fmt(f),
            Self::Ptr(r) => r.fmt(f),
            Self::Dname(r) => r.fmt(f),
            Self::Mb(r) => r.fmt(f),
            Self::Mg(r) => r.fmt(f),
            Self::Mr(r) => r.fmt(f),
            Self::Mx(r) => r.fmt(f),
            Self::Kx(r) => r.fmt(f),
            Self::Rt(r) => r.fmt(f),
            Self::Afsdb(r) => r.fmt(f),
            Self::Px(r) => r.fmt(f),
            Self::Minfo(r) => r.fmt(f),
            Self::Rp(r) => r.fmt(f),
            Self::Soa(r) => r.fmt(f),
            Self::Srv(r) => r.fmt(f),
            Self::Naptr(r) => r.fmt(f),
            Self::Hinfo(r) => r.fmt(f),
            Self::Txt(r) => r.fmt(f),
            Self::Null(r) => r.fmt(f),
            Self::Cert(r) => r.fmt(f),
            Self::Openpgpkey(r) => r.fmt(f),
            Self::Dhcid(r) => r.fmt(f),
            Self::Sig(r) | Self::Rrsig(r) => r.fmt(f),
            Self::Dnskey(r) | Self::Cdnskey(r) => r.fmt(f),
            Self::Ds(r) | Self::Cds(r) => r.fmt(f),
            Self::Nsec(r) => r.fmt(f),
            Self::Nsec3(r) => r.fmt(f),
            Self::Nsec3param(r) => r.fmt(f),
            Self::Sshfp(r) => r.fmt(f),
            Self::Tlsa(r) | Self::Smimea(r) => r.fmt(f),
            Self::Svcb(r) | Self::Https(r) => r.fmt(f),
            Self::Unknown(r) => r.fmt(f),
        }
    }
}
