//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Dot-atom local part, then at least two domain labels ending in an
/// alphabetic or punycode TLD.
static EMAIL_FORMAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9-]{1,59})$",
    )
    .expect("Failed to compile email format regex")
});

/// Characters that are legal in an RFC 5322 local part but rejected here.
const DISALLOWED_CHARACTERS: [char; 6] = ['^', '\'', ';', '&', '*', '%'];

const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_ADDRESS_LEN: usize = 254;

/// A syntactically valid email address.
///
/// # Example
///
/// ```
/// use outreach_mcp_server::domain::EmailAddress;
///
/// let email = EmailAddress::parse("john+doe@gmail.com").unwrap();
/// assert_eq!(email.local_part(), "john+doe");
/// assert_eq!(email.domain(), "gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    address: String,
    at: usize,
}

impl EmailAddress {
    /// Parse an address, checking the format and then the character set.
    ///
    /// # Validation Rules
    ///
    /// - Exactly one '@' with a non-empty local part
    /// - No leading, trailing or consecutive periods in the local part
    /// - Domain has a top-level domain (`john@doe` is rejected)
    /// - No whitespace, `^`, `'`, `;`, `&`, `*` or `%`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` or
    /// `ValidationError::InvalidCharacters`.
    pub fn parse(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();

        if !Self::is_valid_format(&address) {
            return Err(ValidationError::InvalidFormat(address));
        }

        if !Self::has_valid_characters(&address) {
            return Err(ValidationError::InvalidCharacters(address));
        }

        match address.find('@') {
            Some(at) => Ok(Self { address, at }),
            None => Err(ValidationError::InvalidFormat(address)),
        }
    }

    /// Check the overall shape and length limits of an address.
    pub fn is_valid_format(address: &str) -> bool {
        if address.len() > MAX_ADDRESS_LEN {
            return false;
        }

        match address.split_once('@') {
            Some((local, _)) if local.len() <= MAX_LOCAL_PART_LEN => {
                EMAIL_FORMAT_REGEX.is_match(address)
            }
            _ => false,
        }
    }

    /// Check that no whitespace or disallowed character appears anywhere.
    pub fn has_valid_characters(address: &str) -> bool {
        !address
            .chars()
            .any(|c| c.is_whitespace() || DISALLOWED_CHARACTERS.contains(&c))
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.address
    }

    /// Get the local part (before '@').
    pub fn local_part(&self) -> &str {
        &self.address[..self.at]
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        &self.address[self.at + 1..]
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::parse("john@gmail.com").unwrap();
        assert_eq!(email.as_str(), "john@gmail.com");
    }

    #[test]
    fn test_email_accepts_common_variants() {
        assert!(EmailAddress::parse("john.doe@gmail.com").is_ok());
        assert!(EmailAddress::parse("john+doe@gmail.com").is_ok());
        assert!(EmailAddress::parse("john@mail.email").is_ok());
        assert!(EmailAddress::parse("john_doe-1@sub.mail.co.uk").is_ok());
        assert!(EmailAddress::parse("john@xn--bcher-kva.xn--p1ai").is_ok());
    }

    #[test]
    fn test_email_rejects_bad_format() {
        for address in [
            "",
            "john",
            "@gmail.com",
            "john@",
            "john@doe",
            "john@@gmail.com",
            "jo..hn@gmail.com",
            ".john@gmail.com",
            "john.@gmail.com",
            "john@-gmail.com",
            "john@gmail..com",
            "john@gmail.c",
            "john@gm'ail.com",
        ] {
            assert_eq!(
                EmailAddress::parse(address),
                Err(ValidationError::InvalidFormat(address.to_string())),
                "{address} should be rejected as badly formatted"
            );
        }
    }

    #[test]
    fn test_email_rejects_disallowed_characters() {
        for address in [
            "jo^hn@gmail.com",
            "jo&hn@gmail.com",
            "jo*hn@gmail.com",
            "jo%hn@gmail.com",
            "o'brien@gmail.com",
        ] {
            assert_eq!(
                EmailAddress::parse(address),
                Err(ValidationError::InvalidCharacters(address.to_string())),
                "{address} should be rejected for its characters"
            );
        }
    }

    #[test]
    fn test_email_rejects_whitespace_and_semicolon() {
        assert!(EmailAddress::parse("jo hn@gmail.com").is_err());
        assert!(EmailAddress::parse("john@gmail.com ").is_err());
        assert!(EmailAddress::parse("jo;hn@gmail.com").is_err());
        assert!(!EmailAddress::has_valid_characters("jo\thn@gmail.com"));
    }

    #[test]
    fn test_email_length_limits() {
        let local = "a".repeat(64);
        assert!(EmailAddress::parse(format!("{local}@gmail.com")).is_ok());

        let local = "a".repeat(65);
        assert!(EmailAddress::parse(format!("{local}@gmail.com")).is_err());

        let domain = format!("{}.com", ["abcdefghij"; 25].join("."));
        assert!(EmailAddress::parse(format!("john@{domain}")).is_err());
    }

    #[test]
    fn test_email_parts() {
        let email = EmailAddress::parse("john.doe@mail.email").unwrap();
        assert_eq!(email.local_part(), "john.doe");
        assert_eq!(email.domain(), "mail.email");
    }

    #[test]
    fn test_email_display() {
        let email = EmailAddress::parse("john@gmail.com").unwrap();
        assert_eq!(format!("{}", email), "john@gmail.com");
        assert_eq!(email.into_inner(), "john@gmail.com");
    }
}
