//! Jurisdiction types for tax documents
//!
//! A document is either federal (IRS, Internal Revenue Code, CFR) or issued
//! by a single state. State documents always carry the two-letter code of
//! the issuing state.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::ParseVocabularyError;

/// Federal vs. state scope of a tax document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Federal,
    State,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 2] = [Jurisdiction::Federal, Jurisdiction::State];

    /// Wire value used by the corpus data and filter controls
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Federal => "federal",
            Jurisdiction::State => "state",
        }
    }

    /// Parse a filter value (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "federal" => Some(Jurisdiction::Federal),
            "state" => Some(Jurisdiction::State),
            _ => None,
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseVocabularyError::unknown("jurisdiction", s))
    }
}

/// US state codes (plus DC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    AL,
    AK,
    AZ,
    AR,
    CA,
    CO,
    CT,
    DE,
    DC,
    FL,
    GA,
    HI,
    ID,
    IL,
    IN,
    IA,
    KS,
    KY,
    LA,
    ME,
    MD,
    MA,
    MI,
    MN,
    MS,
    MO,
    MT,
    NE,
    NV,
    NH,
    NJ,
    NM,
    NY,
    NC,
    ND,
    OH,
    OK,
    OR,
    PA,
    RI,
    SC,
    SD,
    TN,
    TX,
    UT,
    VT,
    VA,
    WA,
    WV,
    WI,
    WY,
}

impl State {
    /// Every state in code order
    pub const ALL: [State; 51] = [
        State::AL,
        State::AK,
        State::AZ,
        State::AR,
        State::CA,
        State::CO,
        State::CT,
        State::DE,
        State::DC,
        State::FL,
        State::GA,
        State::HI,
        State::ID,
        State::IL,
        State::IN,
        State::IA,
        State::KS,
        State::KY,
        State::LA,
        State::ME,
        State::MD,
        State::MA,
        State::MI,
        State::MN,
        State::MS,
        State::MO,
        State::MT,
        State::NE,
        State::NV,
        State::NH,
        State::NJ,
        State::NM,
        State::NY,
        State::NC,
        State::ND,
        State::OH,
        State::OK,
        State::OR,
        State::PA,
        State::RI,
        State::SC,
        State::SD,
        State::TN,
        State::TX,
        State::UT,
        State::VT,
        State::VA,
        State::WA,
        State::WV,
        State::WI,
        State::WY,
    ];

    /// Two-letter postal code
    pub fn code(&self) -> &'static str {
        match self {
            State::AL => "AL",
            State::AK => "AK",
            State::AZ => "AZ",
            State::AR => "AR",
            State::CA => "CA",
            State::CO => "CO",
            State::CT => "CT",
            State::DE => "DE",
            State::DC => "DC",
            State::FL => "FL",
            State::GA => "GA",
            State::HI => "HI",
            State::ID => "ID",
            State::IL => "IL",
            State::IN => "IN",
            State::IA => "IA",
            State::KS => "KS",
            State::KY => "KY",
            State::LA => "LA",
            State::ME => "ME",
            State::MD => "MD",
            State::MA => "MA",
            State::MI => "MI",
            State::MN => "MN",
            State::MS => "MS",
            State::MO => "MO",
            State::MT => "MT",
            State::NE => "NE",
            State::NV => "NV",
            State::NH => "NH",
            State::NJ => "NJ",
            State::NM => "NM",
            State::NY => "NY",
            State::NC => "NC",
            State::ND => "ND",
            State::OH => "OH",
            State::OK => "OK",
            State::OR => "OR",
            State::PA => "PA",
            State::RI => "RI",
            State::SC => "SC",
            State::SD => "SD",
            State::TN => "TN",
            State::TX => "TX",
            State::UT => "UT",
            State::VT => "VT",
            State::VA => "VA",
            State::WA => "WA",
            State::WV => "WV",
            State::WI => "WI",
            State::WY => "WY",
        }
    }

    /// Full state name
    pub fn name(&self) -> &'static str {
        match self {
            State::AL => "Alabama",
            State::AK => "Alaska",
            State::AZ => "Arizona",
            State::AR => "Arkansas",
            State::CA => "California",
            State::CO => "Colorado",
            State::CT => "Connecticut",
            State::DE => "Delaware",
            State::DC => "District of Columbia",
            State::FL => "Florida",
            State::GA => "Georgia",
            State::HI => "Hawaii",
            State::ID => "Idaho",
            State::IL => "Illinois",
            State::IN => "Indiana",
            State::IA => "Iowa",
            State::KS => "Kansas",
            State::KY => "Kentucky",
            State::LA => "Louisiana",
            State::ME => "Maine",
            State::MD => "Maryland",
            State::MA => "Massachusetts",
            State::MI => "Michigan",
            State::MN => "Minnesota",
            State::MS => "Mississippi",
            State::MO => "Missouri",
            State::MT => "Montana",
            State::NE => "Nebraska",
            State::NV => "Nevada",
            State::NH => "New Hampshire",
            State::NJ => "New Jersey",
            State::NM => "New Mexico",
            State::NY => "New York",
            State::NC => "North Carolina",
            State::ND => "North Dakota",
            State::OH => "Ohio",
            State::OK => "Oklahoma",
            State::OR => "Oregon",
            State::PA => "Pennsylvania",
            State::RI => "Rhode Island",
            State::SC => "South Carolina",
            State::SD => "South Dakota",
            State::TN => "Tennessee",
            State::TX => "Texas",
            State::UT => "Utah",
            State::VT => "Vermont",
            State::VA => "Virginia",
            State::WA => "Washington",
            State::WV => "West Virginia",
            State::WI => "Wisconsin",
            State::WY => "Wyoming",
        }
    }

    /// Root domain used for state documents without a better source URL
    pub fn portal_url(&self) -> String {
        format!("https://www.{}.gov", self.code().to_ascii_lowercase())
    }

    /// Parse from state code or full name (case-insensitive)
    pub fn parse_code(s: &str) -> Option<Self> {
        let needle = s.trim();
        if needle.is_empty() {
            return None;
        }
        State::ALL.iter().copied().find(|state| {
            state.code().eq_ignore_ascii_case(needle) || state.name().eq_ignore_ascii_case(needle)
        })
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for State {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_code(s).ok_or_else(|| ParseVocabularyError::unknown("state", s))
    }
}
