//! Parameter strings
//!
//! Every filter receives one free-form string of comma-separated positional
//! fields. Malformed input is always an error; no field has a silent default.

use crate::error::{Error, Result};
use crate::types::Window;

/// Comma-separated fields of one filter's parameter string
#[derive(Debug, Clone)]
pub struct ParamFields<'a> {
    filter: &'static str,
    fields: Vec<&'a str>,
}

impl<'a> ParamFields<'a> {
    /// Split `raw` and require exactly `expected` fields
    pub fn parse(filter: &'static str, raw: &'a str, expected: usize) -> Result<Self> {
        let fields: Vec<&str> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            raw.split(',').map(str::trim).collect()
        };
        if fields.len() != expected {
            return Err(Error::ParameterCount {
                filter,
                expected,
                actual: fields.len(),
            });
        }
        Ok(Self { filter, fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field(&self, index: usize) -> Result<&'a str> {
        self.fields.get(index).copied().ok_or(Error::ParameterCount {
            filter: self.filter,
            expected: index + 1,
            actual: self.fields.len(),
        })
    }

    /// A finite real number
    pub fn float(&self, index: usize) -> Result<f64> {
        let field = self.field(index)?;
        let value: f64 = field
            .parse()
            .map_err(|_| Error::malformed(self.filter, index, field, "is not a number"))?;
        if !value.is_finite() {
            return Err(Error::malformed(self.filter, index, field, "is not finite"));
        }
        Ok(value)
    }

    /// A finite real number that is not negative
    pub fn non_negative(&self, index: usize) -> Result<f64> {
        let value = self.float(index)?;
        if value < 0.0 {
            let field = self.field(index)?;
            return Err(Error::malformed(self.filter, index, field, "must not be negative"));
        }
        Ok(value)
    }

    /// A window length in samples, at least one
    pub fn count(&self, index: usize) -> Result<usize> {
        let field = self.field(index)?;
        let value: usize = field
            .parse()
            .map_err(|_| Error::malformed(self.filter, index, field, "is not a whole number"))?;
        if value == 0 {
            return Err(Error::malformed(self.filter, index, field, "must be at least 1"));
        }
        Ok(value)
    }

    /// A window length in seconds
    pub fn window(&self, index: usize) -> Result<Window> {
        let field = self.field(index)?;
        let seconds: f64 = field
            .parse()
            .map_err(|_| Error::malformed(self.filter, index, field, "is not a number of seconds"))?;
        Window::from_secs_f64(seconds)
            .map_err(|_| Error::malformed(self.filter, index, field, "must be a positive duration"))
    }
}

/// Parameters that can be read from a filter's parameter string
pub trait ParseParameters: Sized {
    /// Parse the full parameter string
    fn parse_parameters(raw: &str) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count() {
        assert!(ParamFields::parse("f", "1,2", 2).is_ok());
        assert!(ParamFields::parse("f", "", 0).is_ok());
        assert!(ParamFields::parse("f", "   ", 0).is_ok());

        let err = ParamFields::parse("f", "1,2,3", 2).unwrap_err();
        assert!(matches!(err, Error::ParameterCount { expected: 2, actual: 3, .. }));

        let err = ParamFields::parse("f", "", 1).unwrap_err();
        assert!(matches!(err, Error::ParameterCount { expected: 1, actual: 0, .. }));

        // A trailing comma is an empty field, not ignored
        assert!(ParamFields::parse("f", "1,", 1).is_err());
    }

    #[test]
    fn test_typed_fields() {
        let fields = ParamFields::parse("f", " 30 , 5,0.2, -1.5 ", 4).unwrap();
        assert_eq!(fields.count(0).unwrap(), 30);
        assert_eq!(fields.count(1).unwrap(), 5);
        assert_eq!(fields.float(2).unwrap(), 0.2);
        assert_eq!(fields.float(3).unwrap(), -1.5);
        assert!(fields.non_negative(3).is_err());
        assert!(fields.count(2).is_err());
        assert!(fields.count(3).is_err());
        assert!(fields.float(4).is_err());
    }

    #[test]
    fn test_malformed_fields() {
        let fields = ParamFields::parse("moving_average", "abc,0,nan,-2", 4).unwrap();
        assert!(matches!(
            fields.float(0).unwrap_err(),
            Error::MalformedField { index: 0, .. }
        ));
        assert!(fields.count(1).is_err());
        assert!(fields.float(2).is_err());
        assert!(fields.window(3).is_err());
        assert!(fields.window(1).is_err());
    }

    #[test]
    fn test_window_field() {
        let fields = ParamFields::parse("moving_average", "1.5", 1).unwrap();
        assert_eq!(fields.window(0).unwrap().as_secs_f64(), 1.5);
    }
}
