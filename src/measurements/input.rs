use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Rgb;
use crate::error::{Result, ServiceError};

pub const MISSING_FIELDS_MESSAGE: &str = "All color values are required";

/// Unvalidated `{red, green, blue}` as received from a caller.
///
/// Fields are kept as raw JSON so that missing, null, fractional and
/// out-of-range values all surface as validation failures instead of
/// deserialization errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    #[serde(default)]
    pub red: Option<Value>,
    #[serde(default)]
    pub green: Option<Value>,
    #[serde(default)]
    pub blue: Option<Value>,
}

impl From<Rgb> for MeasurementInput {
    fn from(rgb: Rgb) -> Self {
        Self {
            red: Some(Value::from(rgb.red)),
            green: Some(Value::from(rgb.green)),
            blue: Some(Value::from(rgb.blue)),
        }
    }
}

impl MeasurementInput {
    pub fn validate(&self) -> Result<Rgb> {
        let (red, green, blue) = match (present(&self.red), present(&self.green), present(&self.blue)) {
            (Some(red), Some(green), Some(blue)) => (red, green, blue),
            _ => return Err(ServiceError::validation(MISSING_FIELDS_MESSAGE)),
        };

        Ok(Rgb {
            red: channel(red, "red")?,
            green: channel(green, "green")?,
            blue: channel(blue, "blue")?,
        })
    }

    /// Request bodies follow truthiness rules: a numeric `0` reads as an
    /// absent channel. Direct store callers may still record black.
    pub fn validate_request(&self) -> Result<Rgb> {
        let zero = |value: &Option<Value>| value.as_ref().and_then(Value::as_f64) == Some(0.0);
        if zero(&self.red) || zero(&self.green) || zero(&self.blue) {
            return Err(ServiceError::validation(MISSING_FIELDS_MESSAGE));
        }
        self.validate()
    }
}

/// Absent, null, `false` and empty strings count as missing.
fn present(value: &Option<Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(other) => Some(other),
    }
}

fn channel(value: &Value, field: &str) -> Result<u8> {
    value
        .as_u64()
        .and_then(|raw| u8::try_from(raw).ok())
        .ok_or_else(|| {
            ServiceError::validation(format!("{field} must be an integer between 0 and 255"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> MeasurementInput {
        serde_json::from_value(body).expect("input shape")
    }

    #[test]
    fn accepts_full_range() {
        let rgb = parse(json!({"red": 0, "green": 128, "blue": 255}))
            .validate()
            .unwrap();
        assert_eq!(rgb, Rgb::new(0, 128, 255));
    }

    #[test]
    fn missing_or_null_fields_are_rejected() {
        for body in [
            json!({"red": 0, "green": null, "blue": 5}),
            json!({"red": 1, "blue": 5}),
            json!({}),
            json!({"red": 1, "green": "", "blue": 5}),
        ] {
            match parse(body).validate() {
                Err(ServiceError::Validation(message)) => assert_eq!(message, MISSING_FIELDS_MESSAGE),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn out_of_range_and_non_integers_are_rejected() {
        for body in [
            json!({"red": 256, "green": 0, "blue": 0}),
            json!({"red": 1, "green": -1, "blue": 0}),
            json!({"red": 1, "green": 2, "blue": 3.5}),
            json!({"red": "12", "green": 2, "blue": 3}),
        ] {
            assert!(matches!(
                parse(body).validate(),
                Err(ServiceError::Validation(_))
            ));
        }
    }

    #[test]
    fn request_bodies_treat_zero_as_missing() {
        let input = parse(json!({"red": 0, "green": 5, "blue": 5}));
        assert!(input.validate().is_ok());
        match input.validate_request() {
            Err(ServiceError::Validation(message)) => assert_eq!(message, MISSING_FIELDS_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }

        let rgb = parse(json!({"red": 1, "green": 5, "blue": 255}))
            .validate_request()
            .unwrap();
        assert_eq!(rgb, Rgb::new(1, 5, 255));
    }

    #[test]
    fn from_rgb_round_trips_through_validation() {
        let rgb = Rgb::new(10, 20, 30);
        assert_eq!(MeasurementInput::from(rgb).validate().unwrap(), rgb);
    }
}
