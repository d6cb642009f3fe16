//! Entry form state
//!
//! [`MeetingForm`] holds what the user typed plus the derived fields
//! (start stamp, location text, photo). It knows the field rules (required
//! fields, "Other" replacements, when photo capture is offered) and how to
//! turn itself into a [`NewMeeting`].

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};

use crate::error::{MeetlogError, Result};
use crate::meeting::{Choice, NewMeeting, Product, Selection, Source, Status};

/// Start-of-meeting stamp taken when the form is created or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartStamp {
    /// `D Mon YY` in the display offset, e.g. `18 May 25`
    pub display_date: String,
    /// RFC 3339 UTC instant with milliseconds
    pub timestamp: String,
}

impl StartStamp {
    pub fn at(now: DateTime<Utc>, display_offset: FixedOffset) -> Self {
        Self {
            display_date: now
                .with_timezone(&display_offset)
                .format("%-d %b %y")
                .to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Converts a minute offset to a [`FixedOffset`], falling back to UTC when
/// out of range.
pub fn display_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| {
        tracing::warn!(minutes, "Display offset out of range, using UTC");
        Utc.fix()
    })
}

/// The meeting entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingForm {
    pub customer_name: String,
    pub customer_address: String,
    pub source: Selection<Source>,
    pub phone_number: String,
    pub loan_expected: String,
    pub product: Option<Product>,
    pub status: Selection<Status>,
    pub remark2: String,
    /// JPEG `data:` URL from the camera
    pub photo: Option<String>,
    /// Acquired location text; blank until a fix arrives
    pub location: String,
    pub start: StartStamp,
}

impl MeetingForm {
    /// Blank form stamped at `now`.
    pub fn new(now: DateTime<Utc>, display_offset: FixedOffset) -> Self {
        Self {
            customer_name: String::new(),
            customer_address: String::new(),
            source: Selection::Unset,
            phone_number: String::new(),
            loan_expected: String::new(),
            product: None,
            status: Selection::Unset,
            remark2: String::new(),
            photo: None,
            location: String::new(),
            start: StartStamp::at(now, display_offset),
        }
    }

    /// Blank form stamped at the current moment.
    pub fn fresh(display_offset: FixedOffset) -> Self {
        Self::new(Utc::now(), display_offset)
    }

    /// Applies a change of the source selector.
    pub fn select_source(&mut self, selector: &str) -> Result<()> {
        self.source = Selection::select(selector)
            .map_err(|e| MeetlogError::Validation(format!("source: {}", e)))?;
        Ok(())
    }

    /// Types the replacement source after choosing "Other".
    pub fn set_source_name(&mut self, name: &str) -> Result<()> {
        match &mut self.source {
            Selection::Custom(text) => {
                *text = name.to_string();
                Ok(())
            }
            _ => Err(MeetlogError::Validation(
                "source name can only be entered when source is Other".to_string(),
            )
            .into()),
        }
    }

    /// Applies a change of the status selector.
    pub fn select_status(&mut self, selector: &str) -> Result<()> {
        self.status = Selection::select(selector)
            .map_err(|e| MeetlogError::Validation(format!("status: {}", e)))?;
        Ok(())
    }

    /// Types the replacement status after choosing "Other".
    pub fn set_other_status(&mut self, status: &str) -> Result<()> {
        match &mut self.status {
            Selection::Custom(text) => {
                *text = status.to_string();
                Ok(())
            }
            _ => Err(MeetlogError::Validation(
                "other status can only be entered when status is Other".to_string(),
            )
            .into()),
        }
    }

    /// Photo capture is offered only for `OutSource` and `Other` sources.
    pub fn photo_capture_visible(&self) -> bool {
        matches!(
            self.source,
            Selection::Known(Source::OutSource) | Selection::Custom(_)
        )
    }

    /// Attaches a captured photo.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Validation`] when photo capture is not
    /// offered for the current source.
    pub fn set_photo(&mut self, data_url: String) -> Result<()> {
        if !self.photo_capture_visible() {
            return Err(MeetlogError::Validation(
                "photo capture is only available for OutSource or Other sources".to_string(),
            )
            .into());
        }
        self.photo = Some(data_url);
        Ok(())
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    /// Checks the field rules.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Validation`] for a blank customer name or a
    /// blank "Other" replacement.
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(MeetlogError::Validation("Customer name is required".to_string()).into());
        }
        if self.source.is_blank_custom() {
            return Err(MeetlogError::Validation(
                "Source name is required when source is Other".to_string(),
            )
            .into());
        }
        if self.status.is_blank_custom() {
            return Err(MeetlogError::Validation(
                "Other status is required when status is Other".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Builds the request body.
    ///
    /// `location` carries the acquired location and the typed address
    /// joined by `" . "`; `address` carries the typed address alone.
    pub fn to_payload(&self) -> NewMeeting {
        let location = match (self.location.is_empty(), self.customer_address.is_empty()) {
            (false, false) => format!("{} . {}", self.location, self.customer_address),
            (false, true) => self.location.clone(),
            (true, _) => self.customer_address.clone(),
        };

        NewMeeting {
            customer_name: self.customer_name.clone(),
            photo: self.photo.clone().unwrap_or_default(),
            meeting_start_date: self.start.display_date.clone(),
            meeting_start_timestamp: self.start.timestamp.clone(),
            location,
            address: self.customer_address.clone(),
            source: self.source.wire_value().to_string(),
            phone_number: self.phone_number.clone(),
            loan_expected: self.loan_expected.clone(),
            product: self.product.map(|p| p.label().to_string()).unwrap_or_default(),
            status: self.status.wire_value().to_string(),
            remark2: self.remark2.clone(),
        }
    }
}
