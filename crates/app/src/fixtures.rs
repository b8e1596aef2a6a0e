//! Static fixture data.
//!
//! Tokens, tracking numbers and endpoint URLs shared read-only across
//! scenarios. Loaded once per run; `POSTTRACK_BASE_URL` and
//! `POSTTRACK_TOKEN` override the defaults for testing against a staging
//! deployment or with a rotated credential.

/// Upstream API base, including the versioned prefix.
pub const BASE_URL: &str = "https://trackapi.thailandpost.co.th/post/api/v1";

/// A full, working API token.
pub const VALID_TOKEN: &str =
    "M2ZWJYA?JVG9B8YRCeVJB3Q4WPDUOkUkDbS@QbEXK3BDCJJWNjD=Q2G4HhUVYrBTDNI8BwL7A3Y~QROAGhSyJ!ZQF0XcC3OQW@Q2";

/// A token of the right length that the upstream does not recognize.
pub const INVALID_TOKEN: &str =
    "N2ZWJYA?JVG9B8YRCeVJB3Q4WPDUOkUkDbS@QbEXK3BDCJJWNjD=Q2G4HhUVYrBTDNI8BwL7A3Y~QROAGhSyJ!ZQF0XcC3OQW@Q3";

/// A truncated token, used for the malformed-authorization scenarios.
pub const INCOMPLETE_TOKEN: &str = "M2ZWJYA?JVG9B8YRCeVJB3Q4WPDUOkUk";

/// A tracking number with shipment history.
pub const VALID_BARCODE: &str = "EY145587896TH";

/// A well-formed tracking number unknown to the upstream.
pub const UNKNOWN_BARCODE: &str = "RX999999999XX";

/// Resolved fixture set for one suite run.
#[derive(Debug, Clone)]
pub struct Fixtures {
    /// API base URL.
    pub base_url: String,
    /// Working token.
    pub valid_token: String,
    /// Unrecognized token.
    pub invalid_token: String,
    /// Truncated token.
    pub incomplete_token: String,
    /// Tracking number with history.
    pub valid_barcode: String,
    /// Tracking number unknown upstream.
    pub unknown_barcode: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            valid_token: VALID_TOKEN.to_string(),
            invalid_token: INVALID_TOKEN.to_string(),
            incomplete_token: INCOMPLETE_TOKEN.to_string(),
            valid_barcode: VALID_BARCODE.to_string(),
            unknown_barcode: UNKNOWN_BARCODE.to_string(),
        }
    }
}

impl Fixtures {
    /// Builds fixtures from defaults plus environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        let mut fixtures = Self::default();
        if let Ok(base_url) = std::env::var("POSTTRACK_BASE_URL") {
            fixtures.base_url = base_url;
        }
        if let Ok(token) = std::env::var("POSTTRACK_TOKEN") {
            fixtures.valid_token = token;
        }
        fixtures
    }

    /// Token issuance endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/authenticate/token", self.base_url)
    }

    /// Shipment-status lookup endpoint.
    #[must_use]
    pub fn track_url(&self) -> String {
        format!("{}/track", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_endpoints() {
        let fixtures = Fixtures::default();
        assert_eq!(
            fixtures.token_url(),
            "https://trackapi.thailandpost.co.th/post/api/v1/authenticate/token"
        );
        assert_eq!(
            fixtures.track_url(),
            "https://trackapi.thailandpost.co.th/post/api/v1/track"
        );
    }

    #[test]
    fn tokens_are_distinct() {
        assert_ne!(VALID_TOKEN, INVALID_TOKEN);
        assert!(VALID_TOKEN.starts_with(INCOMPLETE_TOKEN));
        assert!(INCOMPLETE_TOKEN.len() < VALID_TOKEN.len());
    }
}
