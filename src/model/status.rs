//! Status codes: what a supervisor does on a given day.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One supervisor's activity for one day.
///
/// Serialized as the single-letter code used on the rota sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Transit to site. Always one day.
    #[serde(rename = "S")]
    TravelIn,

    /// Onboarding before the first-ever drilling shift.
    #[serde(rename = "I")]
    Induction,

    /// Active duty.
    #[serde(rename = "P")]
    Drilling,

    /// Transit from site. Always one day.
    #[serde(rename = "B")]
    TravelOut,

    /// Off duty, including "never deployed yet".
    #[serde(rename = "D")]
    Rest,
}

/// A day-indexed sequence of statuses for one supervisor.
pub type Timeline = Vec<Status>;

impl Status {
    /// Every status, in rota-sheet legend order.
    pub const ALL: [Self; 5] = [
        Self::TravelIn,
        Self::Induction,
        Self::Drilling,
        Self::TravelOut,
        Self::Rest,
    ];

    /// Single-letter sheet code.
    pub fn code(self) -> char {
        match self {
            Self::TravelIn => 'S',
            Self::Induction => 'I',
            Self::Drilling => 'P',
            Self::TravelOut => 'B',
            Self::Rest => 'D',
        }
    }

    /// Human-readable name for legends.
    pub fn label(self) -> &'static str {
        match self {
            Self::TravelIn => "Travel In",
            Self::Induction => "Induction",
            Self::Drilling => "Drilling",
            Self::TravelOut => "Travel Out",
            Self::Rest => "Rest",
        }
    }

    pub fn is_drilling(self) -> bool {
        self == Self::Drilling
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let mut codes: Vec<char> = Status::ALL.iter().map(|s| s.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Status::ALL.len());
    }

    #[test]
    fn serializes_as_sheet_code() {
        let json = serde_json::to_string(&vec![Status::Drilling, Status::TravelOut]).unwrap();
        assert_eq!(json, r#"["P","B"]"#);
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Status::Induction.to_string(), "I");
        assert_eq!(Status::Rest.to_string(), "D");
    }
}
