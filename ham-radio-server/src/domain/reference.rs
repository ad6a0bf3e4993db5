//! Park reference codes.

use std::fmt;

use super::error::ValidationError;

/// A park reference such as `US-2312` or `K-0001`.
///
/// The prefix is one to four uppercase letters or digits, followed by `-`
/// and one to five digits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ParkRef(String);

impl ParkRef {
    /// Parse a reference, which must already be uppercase.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = |reason| ValidationError::InvalidReference {
            value: s.to_string(),
            reason,
        };

        let (prefix, number) = s
            .split_once('-')
            .ok_or_else(|| invalid("missing '-' separator"))?;

        if prefix.is_empty() || prefix.len() > 4 {
            return Err(invalid("prefix must be 1-4 characters"));
        }
        if !prefix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(invalid("prefix must be uppercase letters or digits"));
        }
        if number.is_empty() || number.len() > 5 {
            return Err(invalid("number must be 1-5 digits"));
        }
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("number must be 1-5 digits"));
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

impl fmt::Debug for ParkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParkRef({})", self.0)
    }
}

impl fmt::Display for ParkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_always_parses(s in "[A-Z0-9]{1,4}-[0-9]{1,5}") {
            let r = ParkRef::parse(&s).unwrap();
            prop_assert_eq!(r.as_str(), s.as_str());
        }

        #[test]
        fn long_numbers_rejected(s in "[A-Z]{1,4}-[0-9]{6,9}") {
            prop_assert!(ParkRef::parse(&s).is_err());
        }
    }
}
