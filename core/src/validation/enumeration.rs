//! Fixed-set membership validation.

use crate::validation::{InvalidValue, Validator};
use crate::value::Value;

/// Validates that each value is one of a fixed set of literals.
///
/// Values are kept as [`Value::Str`]; there is no richer representation to
/// convert to.
///
/// # Examples
///
/// ```
/// use argtree_core::validation::{EnumValidator, Validator};
/// use argtree_core::Value;
///
/// let validator = EnumValidator::new(["json", "yaml"]);
/// let mut values = vec![Value::from("json")];
/// validator.validate(&mut values).unwrap();
///
/// let mut values = vec![Value::from("xml")];
/// assert!(validator.validate(&mut values).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EnumValidator {
    allowed: Vec<String>,
}

impl EnumValidator {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        assert!(!allowed.is_empty(), "enum validator needs at least one allowed value");
        EnumValidator { allowed }
    }

    /// The allowed literals, in declaration order.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl Validator for EnumValidator {
    fn validate(&self, values: &mut Vec<Value>) -> Result<(), InvalidValue> {
        for value in values.iter() {
            let Some(text) = value.as_str() else {
                continue;
            };
            if !self.allowed.iter().any(|candidate| candidate == text) {
                return Err(InvalidValue::new(
                    text,
                    format!("value must be one of: {}", self.allowed.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_lists_the_alternatives() {
        let validator = EnumValidator::new(["a", "b"]);
        let mut values = vec![Value::from("c")];
        let error = validator.validate(&mut values).unwrap_err();
        assert_eq!(error.detail, "value must be one of: a, b");
    }

    #[test]
    #[should_panic(expected = "at least one allowed value")]
    fn test_empty_set_is_an_authoring_error() {
        EnumValidator::new(Vec::<String>::new());
    }
}
