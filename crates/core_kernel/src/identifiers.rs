//! Human-readable invoice identifiers
//!
//! Invoices are numbered `INV-<zero-padded integer>`. The padding width is
//! part of the identifier as stored: seeded books use four digits, invoices
//! added afterwards use three, and both must round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix shared by every invoice identifier
pub const INVOICE_PREFIX: &str = "INV";

/// Padding used for newly assigned identifiers
pub const DEFAULT_ID_WIDTH: usize = 3;

/// Errors raised when parsing an invoice identifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceIdError {
    #[error("Invoice id must start with INV-: {0}")]
    MissingPrefix(String),

    #[error("Invoice id has no numeric sequence: {0}")]
    InvalidSequence(String),
}

/// Identifier of an invoice, e.g. `INV-0042`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Creates an identifier padded to the default width
    pub fn from_sequence(sequence: u32) -> Self {
        Self::with_width(sequence, DEFAULT_ID_WIDTH)
    }

    /// Creates an identifier padded to `width` digits
    pub fn with_width(sequence: u32, width: usize) -> Self {
        Self(format!("{}-{:0width$}", INVOICE_PREFIX, sequence, width = width))
    }

    /// Returns the numeric sequence of this identifier
    pub fn sequence(&self) -> u32 {
        parse_sequence(&self.0).unwrap_or(0)
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier following the highest sequence in `ids`
    ///
    /// An empty book starts at `INV-001`.
    pub fn next_after<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a InvoiceId>,
    {
        let highest = ids.into_iter().map(InvoiceId::sequence).max().unwrap_or(0);
        Self::from_sequence(highest.saturating_add(1))
    }
}

fn parse_sequence(raw: &str) -> Result<u32, InvoiceIdError> {
    let digits = raw
        .strip_prefix(INVOICE_PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(|| InvoiceIdError::MissingPrefix(raw.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvoiceIdError::InvalidSequence(raw.to_string()));
    }

    digits
        .parse()
        .map_err(|_| InvoiceIdError::InvalidSequence(raw.to_string()))
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvoiceId {
    type Err = InvoiceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        parse_sequence(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for InvoiceId {
    type Error = InvoiceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvoiceId> for String {
    fn from(id: InvoiceId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_id_display() {
        assert_eq!(InvoiceId::from_sequence(7).to_string(), "INV-007");
        assert_eq!(InvoiceId::with_width(7, 4).to_string(), "INV-0007");
    }

    #[test]
    fn test_id_parsing_keeps_padding() {
        let parsed: InvoiceId = "INV-0042".parse().unwrap();
        assert_eq!(parsed.sequence(), 42);
        assert_eq!(parsed.as_str(), "INV-0042");
    }

    #[test]
    fn test_sequence_wider_than_padding() {
        assert_eq!(InvoiceId::from_sequence(1234).to_string(), "INV-1234");
    }
}
