//! The credibility ranking of cached data.

use serde::{Deserialize, Serialize};
use vireo_proto::message::Section;

/// How much a piece of cached data is trusted, by where it came from.
///
/// The ranking is a total order; higher-credibility data displaces lower
/// and a cache read specifies the minimum rank it will accept. Derived
/// enum ordering does the comparison, so variant order is load-bearing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Credibility {
    /// Out-of-band hints, e.g. bootstrap data.
    Hint,
    /// The additional section of a non-authoritative response.
    Additional,
    /// The answer section of a non-authoritative response.
    NonAuthAnswer,
    /// The authority section of a non-authoritative response.
    NonAuthAuthority,
    /// The additional section of an authoritative response.
    AuthAdditional,
    /// The authority section of an authoritative response.
    AuthAuthority,
    /// The answer section of an authoritative response.
    AuthAnswer,
}

impl Credibility {
    /// The floor an ordinary lookup uses: anything a response's answer
    /// section could have produced.
    pub const NORMAL: Credibility = Credibility::NonAuthAnswer;

    /// The credibility of data found in `section` of a response whose AA
    /// bit is `authoritative`.
    pub fn for_section(section: Section, authoritative: bool) -> Self {
        match (section, authoritative) {
            (Section::Answer, true) => Self::AuthAnswer,
            (Section::Answer, false) => Self::NonAuthAnswer,
            (Section::Authority, true) => Self::AuthAuthority,
            (Section::Authority, false) => Self::NonAuthAuthority,
            (Section::Additional, true) => Self::AuthAdditional,
            (Section::Additional, false) => Self::Additional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_is_total() {
        assert!(Credibility::Hint < Credibility::Additional);
        assert!(Credibility::Additional < Credibility::NonAuthAnswer);
        assert!(Credibility::NonAuthAnswer < Credibility::NonAuthAuthority);
        assert!(Credibility::NonAuthAuthority < Credibility::AuthAdditional);
        assert!(Credibility::AuthAdditional < Credibility::AuthAuthority);
        assert!(Credibility::AuthAuthority < Credibility::AuthAnswer);
    }

    #[test]
    fn section_mapping() {
        assert_eq!(
            Credibility::for_section(Section::Answer, true),
            Credibility::AuthAnswer
        );
        assert_eq!(
            Credibility::for_section(Section::Answer, false),
            Credibility::NonAuthAnswer
        );
        assert_eq!(
            Credibility::for_section(Section::Additional, false),
            Credibility::Additional
        );
        assert!(Credibility::for_section(Section::Answer, false) >= Credibility::NORMAL);
        assert!(Credibility::for_section(Section::Additional, false) < Credibility::NORMAL);
    }
}
