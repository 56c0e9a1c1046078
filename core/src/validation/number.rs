//! Numeric value validation.

use crate::validation::{InvalidValue, Validator};
use crate::value::Value;

/// Validates values as integers or decimals, with optional bounds.
///
/// Converts accepted values to [`Value::Int`] or [`Value::Float`].
///
/// # Examples
///
/// ```
/// use argtree_core::validation::{NumberValidator, Validator};
/// use argtree_core::Value;
///
/// let validator = NumberValidator::integer().with_minimum(1.0);
/// let mut values = vec![Value::from("8080")];
/// validator.validate(&mut values).unwrap();
/// assert_eq!(values, vec![Value::Int(8080)]);
///
/// let mut values = vec![Value::from("0")];
/// assert!(validator.validate(&mut values).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    decimal: bool,
    minimum: Option<f64>,
    maximum: Option<f64>,
}

impl NumberValidator {
    /// Accepts whole numbers only.
    pub fn integer() -> Self {
        NumberValidator {
            decimal: false,
            ..Default::default()
        }
    }

    /// Accepts decimal numbers.
    pub fn decimal() -> Self {
        NumberValidator {
            decimal: true,
            ..Default::default()
        }
    }

    /// Rejects values below `minimum`.
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Rejects values above `maximum`.
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    fn check_bounds(&self, text: &str, number: f64) -> Result<(), InvalidValue> {
        if self.minimum.is_some_and(|minimum| number < minimum) {
            return Err(InvalidValue::new(text, "number is below the minimum"));
        }
        if self.maximum.is_some_and(|maximum| number > maximum) {
            return Err(InvalidValue::new(text, "number is above the maximum"));
        }
        Ok(())
    }

    fn check_integer_bounds(&self, text: &str, number: i64) -> Result<(), InvalidValue> {
        if self.minimum.is_some_and(|minimum| integer_outside(number, minimum, Bound::Below)) {
            return Err(InvalidValue::new(text, "number is below the minimum"));
        }
        if self.maximum.is_some_and(|maximum| integer_outside(number, maximum, Bound::Above)) {
            return Err(InvalidValue::new(text, "number is above the maximum"));
        }
        Ok(())
    }
}

enum Bound {
    Below,
    Above,
}

/// Bounds comparison without the precision loss of `i64 as f64` above 2^53.
/// An integral finite bound converts exactly into `i128` (saturating casts
/// keep out-of-range bounds on the right side of every `i64`); non-integral
/// and infinite bounds are safe to compare as floats.
fn integer_outside(number: i64, bound: f64, side: Bound) -> bool {
    if bound.is_finite() && bound.fract() == 0.0 {
        match side {
            Bound::Below => i128::from(number) < bound as i128,
            Bound::Above => i128::from(number) > bound as i128,
        }
    } else {
        match side {
            Bound::Below => (number as f64) < bound,
            Bound::Above => (number as f64) > bound,
        }
    }
}

impl Validator for NumberValidator {
    fn validate(&self, values: &mut Vec<Value>) -> Result<(), InvalidValue> {
        for value in values.iter_mut() {
            let Some(text) = value.as_str().map(str::to_owned) else {
                continue;
            };
            if self.decimal {
                let number: f64 = text
                    .parse()
                    .map_err(|_| InvalidValue::new(&text, "not a decimal number"))?;
                self.check_bounds(&text, number)?;
                *value = Value::Float(number);
            } else {
                let number: i64 = text
                    .parse()
                    .map_err(|_| InvalidValue::new(&text, "not an integer"))?;
                self.check_integer_bounds(&text, number)?;
                *value = Value::Int(number);
            }
        }
        Ok(())
    }
}
