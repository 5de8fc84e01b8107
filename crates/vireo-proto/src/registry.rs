//! The record-type registry.
//!
//! The built-in catalog is an immutable table keyed by the [`RecordType`]
//! enum; this module layers a process-wide mutable overlay on top so a
//! deployment can install its own codec for a code at startup, or name a
//! private-use type. Sessions and parsers read through [`Registry::global`],
//! which is initialised on first access and never torn down.
//!
//! A mnemonic binds to exactly one code: registering `"FOO"` for code 65280
//! and later for 65281 is refused. Overlay writes take a lock; reads of the
//! built-in table do not.

use crate::error::{Error, Result};
use crate::rdata::RData;
use crate::rtype::{RecordType, Type};
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::OnceLock;

/// A wire parser for one record type: `(rtype, message, offset, rdlen)`.
pub type WireParser = fn(Type, &[u8], usize, u16) -> Result<RData>;

#[derive(Default)]
struct Overlay {
    parsers: HashMap<u16, WireParser>,
    mnemonics: HashMap<String, u16>,
    names: HashMap<u16, String>,
}

/// The type registry: built-in catalog plus a mutable overlay.
#[derive(Default)]
pub struct Registry {
    overlay: RwLock<Overlay>,
}

impl Registry {
    /// The process-wide instance.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::default)
    }

    /// Creates a registry with an empty overlay, for isolated use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a parser and mnemonic for a type code.
    ///
    /// Replacing the codec of a code that already has one is allowed; a
    /// mnemonic already bound to a *different* code is not. Intended for
    /// startup, before sessions are built.
    pub fn register(&self, code: u16, mnemonic: &str, parser: WireParser) -> Result<()> {
        if let Some(existing) = RecordType::from_mnemonic(mnemonic) {
            if existing.code() != code {
                return Err(Error::MnemonicTaken {
                    mnemonic: mnemonic.to_owned(),
                    bound: existing.code(),
                });
            }
        }

        let mut overlay = self.overlay.write();
        if let Some(&bound) = overlay.mnemonics.get(mnemonic) {
            if bound != code {
                return Err(Error::MnemonicTaken {
                    mnemonic: mnemonic.to_owned(),
                    bound,
                });
            }
        }

        overlay.parsers.insert(code, parser);
        overlay.mnemonics.insert(mnemonic.to_owned(), code);
        overlay.names.insert(code, mnemonic.to_owned());
        Ok(())
    }

    /// Parses RDATA, preferring an overlay codec over the built-in one.
    pub fn parse_rdata(
        &self,
        rtype: Type,
        message: &[u8],
        offset: usize,
        rdlen: u16,
    ) -> Result<RData> {
        let parser = self.overlay.read().parsers.get(&rtype.code()).copied();
        match parser {
            Some(parser) => parser(rtype, message, offset, rdlen),
            None => RData::parse(rtype, message, offset, rdlen),
        }
    }

    /// The mnemonic for a code, falling back to the `TYPEnnn` form.
    pub fn mnemonic(&self, code: u16) -> String {
        if let Some(name) = self.overlay.read().names.get(&code) {
            return name.clone();
        }
        match RecordType::from_code(code) {
            Some(t) => t.mnemonic().to_owned(),
            None => format!("TYPE{code}"),
        }
    }

    /// Resolves a mnemonic or `TYPEnnn` string to a type.
    pub fn type_from_mnemonic(&self, text: &str) -> Option<Type> {
        if let Some(known) = RecordType::from_mnemonic(text) {
            return Some(Type::Known(known));
        }
        if let Some(&code) = self.overlay.read().mnemonics.get(text) {
            return Some(Type::from_code(code));
        }
        text.strip_prefix("TYPE")
            .and_then(|digits| digits.parse().ok())
            .map(Type::from_code)
    }
}

/// Resolves a mnemonic through the global registry.
pub fn type_from_mnemonic(text: &str) -> Option<Type> {
    Registry::global().type_from_mnemonic(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::Unknown;

    fn opaque(rtype: Type, message: &[u8], offset: usize, rdlen: u16) -> Result<RData> {
        let slice = &message[offset..offset + rdlen as usize];
        Ok(RData::Unknown(Unknown::new(rtype.code(), slice)))
    }

    #[test]
    fn builtin_mnemonics_resolve() {
        let registry = Registry::new();
        assert_eq!(
            registry.type_from_mnemonic("MX"),
            Some(Type::Known(RecordType::MX))
        );
        assert_eq!(registry.type_from_mnemonic("TYPE4711"), Some(Type::from_code(4711)));
        assert_eq!(registry.type_from_mnemonic("NOPE"), None);
        assert_eq!(registry.mnemonic(15), "MX");
        assert_eq!(registry.mnemonic(4711), "TYPE4711");
    }

    #[test]
    fn overlay_registration() {
        let registry = Registry::new();
        registry.register(65280, "EXAMPLE", opaque).unwrap();

        assert_eq!(registry.mnemonic(65280), "EXAMPLE");
        assert_eq!(
            registry.type_from_mnemonic("EXAMPLE"),
            Some(Type::from_code(65280))
        );

        let wire = [1, 2, 3];
        let parsed = registry
            .parse_rdata(Type::from_code(65280), &wire, 0, 3)
            .unwrap();
        assert!(matches!(parsed, RData::Unknown(_)));
    }

    #[test]
    fn mnemonic_binds_to_one_code() {
        let registry = Registry::new();
        registry.register(65280, "EXAMPLE", opaque).unwrap();
        // Same binding again is fine.
        registry.register(65280, "EXAMPLE", opaque).unwrap();
        // Rebinding to another code is not.
        assert!(matches!(
            registry.register(65281, "EXAMPLE", opaque),
            Err(Error::MnemonicTaken { bound: 65280, .. })
        ));
        // Nor is stealing a built-in mnemonic.
        assert!(registry.register(65282, "CNAME", opaque).is_err());
    }

    #[test]
    fn overlay_replaces_builtin_codec() {
        let registry = Registry::new();
        registry.register(16, "TXT", opaque).unwrap();

        let wire = [3, b'a', b'b', b'c'];
        let parsed = registry
            .parse_rdata(Type::Known(RecordType::TXT), &wire, 0, 4)
            .unwrap();
        assert!(matches!(parsed, RData::Unknown(_)));
    }
}
