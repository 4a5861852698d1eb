use crate::{Error, Result};

/// The five identity fields the verification form asks for.
///
/// All fields are free-form strings; the dates are YYYYMMDD as the upstream
/// form expects them but are not validated here. Immutable for the run.
#[derive(Debug, Clone, Default)]
pub struct PassportInput {
    /// Holder name as printed in the passport.
    pub name: String,
    /// Passport number.
    pub passport_no: String,
    /// Issue date, YYYYMMDD.
    pub issue_date: String,
    /// Expiry date, YYYYMMDD.
    pub expire_date: String,
    /// Birth date, YYYYMMDD.
    pub birth_date: String,
}

impl PassportInput {
    /// Create an input with the two required fields; dates stay empty.
    pub fn new(name: impl Into<String>, passport_no: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passport_no: passport_no.into(),
            ..Default::default()
        }
    }

    /// Reject before any browser session starts. Only the two required
    /// fields are checked; the upstream form treats empty dates as blanks.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Input("name is required".into()));
        }
        if self.passport_no.is_empty() {
            return Err(Error::Input("passport number is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_required_fields() {
        let input = PassportInput::new("홍길동", "M12345678");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let input = PassportInput::new("", "M12345678");
        let err = input.validate().unwrap_err();
        assert!(err.is_input());
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_validate_rejects_empty_passport_no() {
        let input = PassportInput::new("홍길동", "");
        let err = input.validate().unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_dates_are_optional() {
        let mut input = PassportInput::new("홍길동", "M12345678");
        input.issue_date = "20230101".into();
        assert!(input.validate().is_ok());
    }
}
