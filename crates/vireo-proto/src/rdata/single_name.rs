//! Record types whose RDATA is a single domain name.
//!
//! NS, CNAME, PTR, and the mailbox trio MB/MG/MR date from RFC 1035 and
//! may compress their name; DNAME (RFC 6672) may not. The shared shape is
//! stamped out by a macro; DNAME additionally carries the subtree rewrite
//! used by redirect chasing.

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::scan::Scanner;
use crate::wire::MessageWriter;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! single_name_rdata {
    ($(#[$doc:meta])* $ty:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty {
            $field: Name,
        }

        impl $ty {
            /// Creates the record body.
            #[inline]
            pub fn new($field: Name) -> Self {
                Self { $field }
            }

            /// The embedded name.
            #[inline]
            pub fn $field(&self) -> &Name {
                &self.$field
            }

            pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
                Ok(Self::new(NameParser::new(message).parse(offset)?))
            }

            pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
                Ok(Self::new(s.name()?))
            }

            pub(super) fn emit(&self, w: &mut MessageWriter, compress: bool) {
                w.write_name(&self.$field, compress);
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.$field.fmt(f)
            }
        }
    };
}

single_name_rdata! {
    /// NS — an authoritative name server, RFC 1035.
    Ns, nsdname
}

single_name_rdata! {
    /// CNAME — the canonical name of an alias, RFC 1035.
    Cname, target
}

single_name_rdata! {
    /// PTR — a pointer to another name, RFC 1035.
    Ptr, ptrdname
}

single_name_rdata! {
    /// DNAME — a subtree redirection, RFC 6672.
    Dname, target
}

single_name_rdata! {
    /// MB — the host holding a mailbox, RFC 883.
    Mb, mailbox
}

single_name_rdata! {
    /// MG — a member of a mail group, RFC 883.
    Mg, mailbox
}

single_name_rdata! {
    /// MR — a mail rename target, RFC 883.
    Mr, newname
}

impl Dname {
    /// Applies the redirection to a query name under this record's owner.
    ///
    /// Returns the rewritten name, `Ok(None)` when `qname` is not below
    /// `owner`, and an error when the substitution exceeds 255 octets
    /// (the YXDOMAIN condition of RFC 6672 §2.2).
    pub fn rewrite(&self, qname: &Name, owner: &Name) -> Result<Option<Name>> {
        if qname == owner {
            return Ok(None);
        }
        qname.replace_suffix(owner, &self.target)
    }
}
