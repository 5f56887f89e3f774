//! Free-form rental price label.
//!
//! Prices on the site are display strings such as `R$ 250/dia`; nothing ever
//! computes with them, so they are kept as text instead of a decimal amount.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price label shown on a product card.
///
/// Blank input falls back to [`PriceLabel::ON_REQUEST`].
///
/// ```
/// use total_aereas_core::PriceLabel;
///
/// assert_eq!(PriceLabel::from_input("R$ 250/dia").as_str(), "R$ 250/dia");
/// assert_eq!(PriceLabel::from_input("   ").as_str(), "A consultar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceLabel(String);

impl PriceLabel {
    /// Label used when no price was given.
    pub const ON_REQUEST: &'static str = "A consultar";

    /// Build a label from form input, trimming it and applying the default.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self::on_request()
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// The "price on request" label.
    #[must_use]
    pub fn on_request() -> Self {
        Self(Self::ON_REQUEST.to_owned())
    }

    /// Returns the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PriceLabel {
    fn default() -> Self {
        Self::on_request()
    }
}

impl fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_on_request() {
        assert_eq!(PriceLabel::default().as_str(), PriceLabel::ON_REQUEST);
    }

    #[test]
    fn test_from_input_keeps_text() {
        assert_eq!(
            PriceLabel::from_input("  R$ 600/dia ").to_string(),
            "R$ 600/dia"
        );
    }
}
