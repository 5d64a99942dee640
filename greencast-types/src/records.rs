//! Wire shapes of the portal forecasting endpoints.
//!
//! Dates stay as the raw strings the backend sent; parsing (and dropping what
//! does not parse) is the reconciliation core's job. Row fields are read
//! leniently so one bad row never fails the whole body: a non-string date is
//! kept as its JSON text (`null` and missing become `""`), and a non-numeric
//! quantity becomes `NaN`.

use serde::{Deserialize, Serialize};

/// One row of `GET historical-sales?days=N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Backend row id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Calendar date as sent by the backend.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: String,
    /// Trays sold on that date.
    #[serde(default = "lenient::missing_quantity", deserialize_with = "lenient::quantity")]
    pub total_trays_sold: f64,
    /// Revenue for that date, if the backend tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

impl SalesRecord {
    /// Record with only the required fields.
    pub fn new(date: impl Into<String>, total_trays_sold: f64) -> Self {
        Self {
            id: None,
            date: date.into(),
            total_trays_sold,
            revenue: None,
        }
    }
}

/// One prediction inside a [`ForecastEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    /// Calendar date as sent by the backend.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: String,
    /// Predicted trays for that date.
    #[serde(default = "lenient::missing_quantity", deserialize_with = "lenient::quantity")]
    pub predicted_trays: f64,
}

impl ForecastRecord {
    /// Convenience constructor.
    pub fn new(date: impl Into<String>, predicted_trays: f64) -> Self {
        Self {
            date: date.into(),
            predicted_trays,
        }
    }
}

/// Body of `GET forecast?weeks=N`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEnvelope {
    /// Backend forecast id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// First predicted date, as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    /// Last predicted date, as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
    /// Predictions; order is not guaranteed.
    #[serde(default)]
    pub predictions: Vec<ForecastRecord>,
    /// Generation timestamp, as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ForecastEnvelope {
    /// Envelope carrying only predictions.
    #[must_use]
    pub fn from_predictions(predictions: Vec<ForecastRecord>) -> Self {
        Self {
            predictions,
            ..Self::default()
        }
    }
}

mod lenient {
    use std::fmt;

    use serde::Deserializer;
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};

    pub(super) const fn missing_quantity() -> f64 {
        f64::NAN
    }

    pub(super) fn date<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;
        impl<'de> Visitor<'de> for DateVisitor {
            type Value = String;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "any JSON value")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }
            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }
            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }
            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(String::new())
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(String::new())
            }
            fn visit_some<D2>(self, d: D2) -> Result<Self::Value, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                d.deserialize_any(self)
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(String::new())
            }
            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(String::new())
            }
        }
        deserializer.deserialize_any(DateVisitor)
    }

    pub(super) fn quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QuantityVisitor;
        impl<'de> Visitor<'de> for QuantityVisitor {
            type Value = f64;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "any JSON value")
            }
            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }
            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v as f64)
            }
            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v as f64)
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.trim().parse().unwrap_or(f64::NAN))
            }
            fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(f64::NAN)
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(f64::NAN)
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(f64::NAN)
            }
            fn visit_some<D2>(self, d: D2) -> Result<Self::Value, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                d.deserialize_any(self)
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(f64::NAN)
            }
            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(f64::NAN)
            }
        }
        deserializer.deserialize_any(QuantityVisitor)
    }
}
