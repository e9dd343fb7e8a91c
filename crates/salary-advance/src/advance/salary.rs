use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pay cadence a gross salary figure is quoted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayFrequency {
    Weekly,
    BiWeekly,
    Monthly,
    Annually,
}

impl PayFrequency {
    /// Wire and form label for the frequency.
    pub const fn label(self) -> &'static str {
        match self {
            PayFrequency::Weekly => "Weekly",
            PayFrequency::BiWeekly => "Bi-Weekly",
            PayFrequency::Monthly => "Monthly",
            PayFrequency::Annually => "Annually",
        }
    }

    /// Parse a form value. This is the boundary where an unrecognized
    /// frequency becomes a client error; the conversion itself is total.
    pub fn parse(raw: &str) -> Result<Self, InvalidFrequency> {
        match raw.trim() {
            "Weekly" => Ok(PayFrequency::Weekly),
            "Bi-Weekly" => Ok(PayFrequency::BiWeekly),
            "Monthly" => Ok(PayFrequency::Monthly),
            "Annually" => Ok(PayFrequency::Annually),
            other => Err(InvalidFrequency(other.to_string())),
        }
    }
}

impl Serialize for PayFrequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PayFrequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        PayFrequency::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Raised when a submitted pay frequency is not one of the supported
/// labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pay_frequency '{0}'")]
pub struct InvalidFrequency(pub String);

/// Convert a salary quoted at `frequency` into its monthly equivalent.
pub fn monthly_salary(gross_salary: f64, frequency: PayFrequency) -> f64 {
    match frequency {
        PayFrequency::Weekly => gross_salary * 52.0 / 12.0,
        PayFrequency::BiWeekly => gross_salary * 26.0 / 12.0,
        PayFrequency::Monthly => gross_salary,
        PayFrequency::Annually => gross_salary / 12.0,
    }
}
