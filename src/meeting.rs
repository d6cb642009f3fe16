//! Meeting records and their field vocabularies
//!
//! [`MeetingRecord`] is what the meetings backend returns; [`NewMeeting`] is
//! what the entry form posts (the backend assigns the id). Both use the
//! backend's camelCase field names.
//!
//! Selector fields with an "Other" choice are modelled as
//! [`Selection`]: either one of the known values or a custom string typed
//! by the user. The selector value and the typed replacement never share a
//! slot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selector label that switches a field to a custom value.
pub const OTHER: &str = "Other";

/// A record as stored by the meetings backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingRecord {
    pub id: String,
    pub customer_name: String,
    pub photo: String,
    pub meeting_start_date: String,
    pub meeting_start_timestamp: String,
    pub location: String,
    pub address: String,
    pub source: String,
    pub phone_number: String,
    pub loan_expected: String,
    pub product: String,
    pub status: String,
    pub remark2: String,
}

/// Request body for creating a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    pub customer_name: String,
    pub photo: String,
    pub meeting_start_date: String,
    pub meeting_start_timestamp: String,
    pub location: String,
    pub address: String,
    pub source: String,
    pub phone_number: String,
    pub loan_expected: String,
    pub product: String,
    pub status: String,
    pub remark2: String,
}

/// How a record's photo is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef<'a> {
    None,
    /// A `data:` URL embedded in the record
    Inline(&'a str),
    /// An `http(s)` URL served elsewhere
    Remote(&'a str),
}

impl MeetingRecord {
    /// Classifies the `photo` field.
    pub fn photo_ref(&self) -> PhotoRef<'_> {
        let photo = self.photo.as_str();
        if photo.is_empty() {
            PhotoRef::None
        } else if photo.starts_with("http://") || photo.starts_with("https://") {
            PhotoRef::Remote(photo)
        } else {
            PhotoRef::Inline(photo)
        }
    }

    /// Location and address joined for display, if either is present.
    pub fn place(&self) -> Option<String> {
        match (self.location.is_empty(), self.address.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.location.clone()),
            (true, false) => Some(self.address.clone()),
            (false, false) => Some(format!("{} · {}", self.location, self.address)),
        }
    }

    /// Local `HH:MM` of the start timestamp, when it parses.
    pub fn start_time(&self) -> Option<String> {
        chrono::DateTime::parse_from_rfc3339(&self.meeting_start_timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&chrono::Local).format("%H:%M").to_string())
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A closed vocabulary of selector values.
pub trait Choice: Copy + Eq + fmt::Debug + 'static {
    /// Every known value, in selector order.
    const ALL: &'static [Self];

    /// The exact wire/display label.
    fn label(self) -> &'static str;

    /// Looks a label up, case-sensitively.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

/// A selector field: nothing chosen, a known value, or a typed replacement
/// after picking "Other".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<K> {
    #[default]
    Unset,
    Known(K),
    Custom(String),
}

impl<K: Choice> Selection<K> {
    /// Applies a selector change. `"Other"` starts an empty custom value;
    /// an empty string unsets the field.
    pub fn select(selector: &str) -> Result<Self, String> {
        match selector {
            "" => Ok(Self::Unset),
            OTHER => Ok(Self::Custom(String::new())),
            label => K::from_label(label)
                .map(Self::Known)
                .ok_or_else(|| format!("unknown option '{}'", label)),
        }
    }

    /// Value sent to the backend.
    pub fn wire_value(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Known(k) => k.label(),
            Self::Custom(text) => text,
        }
    }

    /// Returns `true` for a custom value that is still blank.
    pub fn is_blank_custom(&self) -> bool {
        matches!(self, Self::Custom(text) if text.trim().is_empty())
    }
}

impl<K: Choice> fmt::Display for Selection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Where the lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    TeleCaller,
    OutSource,
}

impl Choice for Source {
    const ALL: &'static [Self] = &[Self::TeleCaller, Self::OutSource];

    fn label(self) -> &'static str {
        match self {
            Self::TeleCaller => "TeleCaller",
            Self::OutSource => "OutSource",
        }
    }
}

/// Outcome of the meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Disbursed,
    Login,
    Discussion,
    FraudMeeting,
    ForNotPick,
    MeetingWithCustomer,
}

impl Choice for Status {
    const ALL: &'static [Self] = &[
        Self::Disbursed,
        Self::Login,
        Self::Discussion,
        Self::FraudMeeting,
        Self::ForNotPick,
        Self::MeetingWithCustomer,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Disbursed => "Disbursed",
            Self::Login => "Login",
            Self::Discussion => "Discussion",
            Self::FraudMeeting => "Fraud meeting",
            Self::ForNotPick => "For not pick",
            Self::MeetingWithCustomer => "Meeting with customer",
        }
    }
}

/// Loan product discussed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    PersonalLoan,
    HomeLoan,
    LapLoan,
    BusinessLoan,
}

impl Choice for Product {
    const ALL: &'static [Self] = &[
        Self::PersonalLoan,
        Self::HomeLoan,
        Self::LapLoan,
        Self::BusinessLoan,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::PersonalLoan => "Personal Loan",
            Self::HomeLoan => "Home Loan",
            Self::LapLoan => "Lap Loan",
            Self::BusinessLoan => "Business Loan",
        }
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            let labels: Vec<&str> = Self::ALL.iter().map(|p| p.label()).collect();
            format!("unknown product '{}'; expected one of: {}", s, labels.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_camel_case_with_defaults() {
        let json = r#"{"id":"a","customerName":"Acme","meetingStartTimestamp":"2025-05-18T04:30:00.000Z","remark2":"hot lead"}"#;
        let record: MeetingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "a");
        assert_eq!(record.customer_name, "Acme");
        assert_eq!(record.remark2, "hot lead");
        assert_eq!(record.phone_number, "");
    }

    #[test]
    fn test_new_meeting_serializes_backend_field_names() {
        let meeting = NewMeeting {
            customer_name: "Acme".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&meeting).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "customerName",
            "photo",
            "meetingStartDate",
            "meetingStartTimestamp",
            "location",
            "address",
            "source",
            "phoneNumber",
            "loanExpected",
            "product",
            "status",
            "remark2",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(!object.contains_key("id"));
        assert_eq!(object.len(), 12);
    }

    #[test]
    fn test_photo_ref_classification() {
        let mut record = MeetingRecord::default();
        assert_eq!(record.photo_ref(), PhotoRef::None);
        record.photo = "https://cdn.example.com/p.jpg".to_string();
        assert!(matches!(record.photo_ref(), PhotoRef::Remote(_)));
        record.photo = "data:image/jpeg;base64,AAAA".to_string();
        assert!(matches!(record.photo_ref(), PhotoRef::Inline(_)));
    }

    #[test]
    fn test_place_joins_location_and_address() {
        let mut record = MeetingRecord::default();
        assert_eq!(record.place(), None);
        record.location = "MG Road".to_string();
        assert_eq!(record.place().as_deref(), Some("MG Road"));
        record.address = "Flat 4".to_string();
        assert_eq!(record.place().as_deref(), Some("MG Road · Flat 4"));
    }

    #[test]
    fn test_selection_select() {
        assert_eq!(Selection::<Source>::select("").unwrap(), Selection::Unset);
        assert_eq!(
            Selection::<Source>::select("OutSource").unwrap(),
            Selection::Known(Source::OutSource)
        );
        assert_eq!(
            Selection::<Source>::select("Other").unwrap(),
            Selection::Custom(String::new())
        );
        assert!(Selection::<Source>::select("telecaller").is_err());
    }

    #[test]
    fn test_selection_wire_value() {
        assert_eq!(Selection::<Status>::Unset.wire_value(), "");
        assert_eq!(
            Selection::Known(Status::FraudMeeting).wire_value(),
            "Fraud meeting"
        );
        assert_eq!(
            Selection::<Status>::Custom("Callback".to_string()).to_string(),
            "Callback"
        );
    }

    #[test]
    fn test_blank_custom_detection() {
        assert!(Selection::<Status>::Custom("  ".to_string()).is_blank_custom());
        assert!(!Selection::<Status>::Custom("x".to_string()).is_blank_custom());
        assert!(!Selection::<Status>::Unset.is_blank_custom());
    }

    #[test]
    fn test_product_from_str() {
        assert_eq!("Lap Loan".parse::<Product>().unwrap(), Product::LapLoan);
        let err = "Car Loan".parse::<Product>().unwrap_err();
        assert!(err.contains("Personal Loan"));
    }
}
