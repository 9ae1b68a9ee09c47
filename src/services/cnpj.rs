/*
 * Responsibility
 * - Turn the raw `cnpj` query value into a validated 14-digit identifier
 * - Formatting characters (".", "/", "-", spaces) are stripped before counting
 * - The normalized digits are what goes into the upstream URL
 */
use std::fmt;

use thiserror::Error;

pub const CNPJ_DIGITS: usize = 14;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CnpjError {
    #[error("cnpj is required")]
    Missing,
    #[error("cnpj must have 14 digits, got {digits}")]
    WrongLength { digits: usize },
}

/// A CNPJ reduced to its 14 ASCII digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cnpj(String);

impl Cnpj {
    pub fn parse(raw: &str) -> Result<Self, CnpjError> {
        if raw.trim().is_empty() {
            return Err(CnpjError::Missing);
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != CNPJ_DIGITS {
            return Err(CnpjError::WrongLength {
                digits: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_digits() {
        let cnpj = Cnpj::parse("11222333000181").unwrap();
        assert_eq!(cnpj.as_str(), "11222333000181");
    }

    #[test]
    fn strips_punctuation() {
        let cnpj = Cnpj::parse(" 11.222.333/0001-81 ").unwrap();
        assert_eq!(cnpj.to_string(), "11222333000181");
    }

    #[test]
    fn blank_is_missing() {
        assert_eq!(Cnpj::parse(""), Err(CnpjError::Missing));
        assert_eq!(Cnpj::parse("   "), Err(CnpjError::Missing));
    }

    #[test]
    fn counts_only_digits() {
        assert_eq!(
            Cnpj::parse("1122233300018"),
            Err(CnpjError::WrongLength { digits: 13 })
        );
        assert_eq!(
            Cnpj::parse("112223330001811"),
            Err(CnpjError::WrongLength { digits: 15 })
        );
        assert_eq!(
            Cnpj::parse("acme-ltda"),
            Err(CnpjError::WrongLength { digits: 0 })
        );
    }

    #[test]
    fn non_ascii_digits_do_not_count() {
        // Arabic-Indic digits are `char::is_numeric` but never valid in a CNPJ.
        let err = Cnpj::parse("١١٢٢٢٣٣٣٠٠٠١٨١").unwrap_err();
        assert_eq!(err, CnpjError::WrongLength { digits: 0 });
    }
}
