//! Raw form text and its conversion to the numeric request payload.

use shared::{domain::FieldName, protocol::RequestPayload};

/// The value a field takes when its text cannot be read as a finite number.
pub const NOT_A_NUMBER: f64 = f64::NAN;

/// Converts input text to a number. Total: surrounding whitespace is ignored,
/// and empty, non-numeric or non-finite text yields [`NOT_A_NUMBER`].
pub fn coerce_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NOT_A_NUMBER;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => NOT_A_NUMBER,
    }
}

/// Unvalidated text for each of the seven fields, empty until edited.
///
/// A `Draft` is a value: [`Draft::with_field`] returns a new draft and leaves
/// the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: [String; 7],
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FieldName) -> &str {
        &self.values[name.index()]
    }

    pub fn with_field(&self, name: FieldName, raw: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.values[name.index()] = raw.into();
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL
            .into_iter()
            .map(move |name| (name, self.get(name)))
    }

    pub fn to_payload(&self) -> RequestPayload {
        RequestPayload::from_values(FieldName::ALL.map(|name| coerce_numeric(self.get(name))))
    }
}
