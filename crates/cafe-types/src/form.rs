//! Raw form input and the coercion rules applied to it

use crate::cafe::NewCafe;
use serde::Deserialize;
use thiserror::Error;

/// Reasons a submitted form cannot become a cafe
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Field {field} must be a boolean (true/false, on/off, 1/0, yes/no), got {value:?}")]
    InvalidFlag { field: &'static str, value: String },
}

/// Cafe submission as received from a form-encoded body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub has_sockets: Option<String>,
    pub can_take_calls: Option<String>,
    pub coffee_price: Option<String>,
}

impl CafeForm {
    /// Validate presence of the text fields and coerce the flags.
    ///
    /// Fields are checked in declaration order, so the first missing one is
    /// the one reported.
    pub fn into_new_cafe(self) -> Result<NewCafe, FieldError> {
        Ok(NewCafe {
            name: required("name", self.name)?,
            map_url: required("map_url", self.map_url)?,
            img_url: required("img_url", self.img_url)?,
            location: required("location", self.location)?,
            seats: required("seats", self.seats)?,
            has_toilet: parse_flag("has_toilet", self.has_toilet.as_deref())?,
            has_wifi: parse_flag("has_wifi", self.has_wifi.as_deref())?,
            has_sockets: parse_flag("has_sockets", self.has_sockets.as_deref())?,
            can_take_calls: parse_flag("can_take_calls", self.can_take_calls.as_deref())?,
            coffee_price: required("coffee_price", self.coffee_price)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, FieldError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FieldError::Missing(field)),
    }
}

/// Parse a boolean form flag.
///
/// Absent and empty values are false. Anything outside the recognized token
/// set is rejected rather than guessed at.
pub fn parse_flag(field: &'static str, value: Option<&str>) -> Result<bool, FieldError> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" | "y" => Ok(true),
        "" | "false" | "off" | "0" | "no" | "n" => Ok(false),
        _ => Err(FieldError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}
