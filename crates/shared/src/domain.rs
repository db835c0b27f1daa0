use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownFieldError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(RequestId);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the seven soil/climate measurements the prediction service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "N")]
    Nitrogen,
    #[serde(rename = "P")]
    Phosphorus,
    #[serde(rename = "K")]
    Potassium,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "humidity")]
    Humidity,
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "rainfall")]
    Rainfall,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::Nitrogen,
        FieldName::Phosphorus,
        FieldName::Potassium,
        FieldName::Temperature,
        FieldName::Humidity,
        FieldName::Ph,
        FieldName::Rainfall,
    ];

    /// Key used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Nitrogen => "N",
            FieldName::Phosphorus => "P",
            FieldName::Potassium => "K",
            FieldName::Temperature => "temperature",
            FieldName::Humidity => "humidity",
            FieldName::Ph => "ph",
            FieldName::Rainfall => "rainfall",
        }
    }

    /// Position in [`FieldName::ALL`] and in [`FIELD_SPECS`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self.index()]
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| UnknownFieldError::new(value))
    }
}

/// Static metadata for one input. The range is informational only and is
/// never enforced client-side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl FieldSpec {
    /// Label text, e.g. `TEMPERATURE (0–50 °C)`.
    pub fn label(&self) -> String {
        format!(
            "{} ({}–{} {})",
            self.name.as_str().to_ascii_uppercase(),
            self.min,
            self.max,
            self.unit
        )
    }
}

pub static FIELD_SPECS: [FieldSpec; 7] = [
    FieldSpec {
        name: FieldName::Nitrogen,
        min: 0.0,
        max: 150.0,
        unit: "ppm",
    },
    FieldSpec {
        name: FieldName::Phosphorus,
        min: 0.0,
        max: 150.0,
        unit: "ppm",
    },
    FieldSpec {
        name: FieldName::Potassium,
        min: 0.0,
        max: 150.0,
        unit: "ppm",
    },
    FieldSpec {
        name: FieldName::Temperature,
        min: 0.0,
        max: 50.0,
        unit: "°C",
    },
    FieldSpec {
        name: FieldName::Humidity,
        min: 0.0,
        max: 100.0,
        unit: "%",
    },
    FieldSpec {
        name: FieldName::Ph,
        min: 0.0,
        max: 14.0,
        unit: "pH",
    },
    FieldSpec {
        name: FieldName::Rainfall,
        min: 0.0,
        max: 500.0,
        unit: "mm",
    },
];
