//! Amateur radio callsigns.

use std::fmt;

use super::error::ValidationError;

/// A syntactically valid amateur radio callsign.
///
/// Matches `[A-Z0-9]{1,2}[0-9][A-Z]{1,3}`: a one or two character prefix,
/// a single call-area digit and a one to three letter suffix.
///
/// # Examples
///
/// ```
/// use ham_radio_server::domain::Callsign;
///
/// let call = Callsign::parse("W1AW").unwrap();
/// assert_eq!(call.as_str(), "W1AW");
///
/// // Lowercase is only accepted through parse_normalized
/// assert!(Callsign::parse("w1aw").is_err());
/// assert!(Callsign::parse_normalized(" w1aw ").is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Callsign(String);

impl Callsign {
    /// Parse a callsign, which must already be uppercase.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = |reason| ValidationError::InvalidCallsign {
            value: s.to_string(),
            reason,
        };

        let bytes = s.as_bytes();
        let suffix_len = bytes
            .iter()
            .rev()
            .take_while(|b| b.is_ascii_uppercase())
            .count();

        if suffix_len == 0 {
            return Err(invalid("must end with 1-3 letters"));
        }
        if suffix_len > 3 {
            return Err(invalid("suffix longer than 3 letters"));
        }

        let head = &bytes[..bytes.len() - suffix_len];
        let Some((digit, prefix)) = head.split_last() else {
            return Err(invalid("missing call-area digit"));
        };
        if !digit.is_ascii_digit() {
            return Err(invalid("missing call-area digit"));
        }
        if prefix.is_empty() || prefix.len() > 2 {
            return Err(invalid("prefix must be 1-2 characters"));
        }
        if !prefix
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(invalid("prefix must be uppercase letters or digits"));
        }

        Ok(Self(s.to_string()))
    }

    /// Parse after trimming whitespace and converting to uppercase.
    pub fn parse_normalized(s: &str) -> Result<Self, ValidationError> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callsign({})", self.0)
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_callsigns() {
        for call in ["W1AW", "K2A", "N0AX", "KD9ABC", "2E0ABC", "G4X", "VE3XYZ"] {
            assert!(Callsign::parse(call).is_ok(), "{call} should parse");
        }
    }

    #[test]
    fn reject_bad_shapes() {
        assert!(Callsign::parse("").is_err());
        assert!(Callsign::parse("W1").is_err());
        assert!(Callsign::parse("WAW").is_err());
        assert!(Callsign::parse("1AW").is_err());
        assert!(Callsign::parse("W1ABCD").is_err());
        assert!(Callsign::parse("ABC1D").is_err());
        assert!(Callsign::parse("W-1AW").is_err());
        assert!(Callsign::parse("W1AW/P").is_err());
    }

    #[test]
    fn reject_lowercase() {
        assert!(Callsign::parse("w1aw").is_err());
        assert!(Callsign::parse("W1aw").is_err());
    }

    #[test]
    fn normalized_accepts_lowercase_and_whitespace() {
        let call = Callsign::parse_normalized("  kd9abc\n").unwrap();
        assert_eq!(call.as_str(), "KD9ABC");
    }

    #[test]
    fn error_carries_input() {
        let err = Callsign::parse("W1").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCallsign { ref value, .. } if value == "W1"
        ));
    }

    #[test]
    fn display_and_debug() {
        let call = Callsign::parse("W1AW").unwrap();
        assert_eq!(call.to_string(), "W1AW");
        assert_eq!(format!("{call:?}"), "Callsign(W1AW)");
    }
}
