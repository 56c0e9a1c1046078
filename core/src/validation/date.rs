//! Calendar date validation.

use chrono::NaiveDate;

use crate::validation::{InvalidValue, Validator};
use crate::value::Value;

/// Validates values as dates in a chrono format string, with optional
/// earliest/latest bounds. Converts accepted values to [`Value::Date`].
///
/// # Examples
///
/// ```
/// use argtree_core::validation::{DateValidator, Validator};
/// use argtree_core::Value;
/// use chrono::NaiveDate;
///
/// let validator = DateValidator::new("%Y-%m-%d");
/// let mut values = vec![Value::from("2024-03-09")];
/// validator.validate(&mut values).unwrap();
/// assert_eq!(
///     values,
///     vec![Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DateValidator {
    format: String,
    earliest: Option<NaiveDate>,
    latest: Option<NaiveDate>,
}

impl DateValidator {
    pub fn new(format: impl Into<String>) -> Self {
        DateValidator {
            format: format.into(),
            earliest: None,
            latest: None,
        }
    }

    /// Rejects dates before `earliest`.
    pub fn with_earliest(mut self, earliest: NaiveDate) -> Self {
        self.earliest = Some(earliest);
        self
    }

    /// Rejects dates after `latest`.
    pub fn with_latest(mut self, latest: NaiveDate) -> Self {
        self.latest = Some(latest);
        self
    }
}

impl Validator for DateValidator {
    fn validate(&self, values: &mut Vec<Value>) -> Result<(), InvalidValue> {
        for value in values.iter_mut() {
            let Some(text) = value.as_str().map(str::to_owned) else {
                continue;
            };
            let date = NaiveDate::parse_from_str(&text, &self.format)
                .map_err(|_| InvalidValue::new(&text, "not a date in the expected format"))?;
            if self.earliest.is_some_and(|earliest| date < earliest) {
                return Err(InvalidValue::new(&text, "date is before the earliest allowed"));
            }
            if self.latest.is_some_and(|latest| date > latest) {
                return Err(InvalidValue::new(&text, "date is after the latest allowed"));
            }
            *value = Value::Date(date);
        }
        Ok(())
    }
}
