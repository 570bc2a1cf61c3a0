//! Input validation primitives.

use crate::error::{Error, Result};

/// Require an Option to contain a value.
pub fn require<T>(opt: Option<T>, field: &str, message: &str) -> Result<T> {
    opt.ok_or_else(|| Error::validation_invalid_argument(field, message, None, None))
}

/// Require a collection to be non-empty.
pub fn require_non_empty_vec<'a, T>(vec: &'a [T], field: &str) -> Result<&'a [T]> {
    if vec.is_empty() {
        Err(Error::validation_missing_argument(vec![field.to_string()]))
    } else {
        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_returns_value_when_some() {
        assert_eq!(require(Some("MotorAct"), "name", "msg").unwrap(), "MotorAct");
    }

    #[test]
    fn require_returns_error_when_none() {
        let err = require::<&str>(None, "name", "Missing name").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn require_non_empty_vec_passes_for_non_empty() {
        let ids = vec!["MotorAct"];
        assert_eq!(require_non_empty_vec(&ids, "identifiers").unwrap(), &["MotorAct"]);
    }

    #[test]
    fn require_non_empty_vec_fails_for_empty() {
        let ids: Vec<&str> = vec![];
        let err = require_non_empty_vec(&ids, "identifiers").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
        assert_eq!(err.details["args"][0], "identifiers");
    }
}
