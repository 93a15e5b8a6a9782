//! Counts as the pandas backend sends them.
//!
//! After `fillna(0)` a whole count column becomes float, so the same field may
//! arrive as `5`, `5.0` or `null`. Use with
//! `#[serde(default, deserialize_with = "count::deserialize")]`.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::fmt;

use super::ordered_map::OrderedMap;

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative whole number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
            Ok(v as u64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    // NaN leaves pandas as `null`
    fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(CountVisitor)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(CountVisitor)
}

/// Map value with the same tolerance.
#[derive(Deserialize)]
struct Count(#[serde(deserialize_with = "deserialize")] u64);

/// `label → count`, key order kept.
pub fn map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderedMap<u64>, D::Error> {
    let raw = OrderedMap::<Count>::deserialize(deserializer)?;
    Ok(raw.iter().map(|(key, count)| (key, count.0)).collect())
}

/// `day → hour → count`.
pub fn nested_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<OrderedMap<OrderedMap<u64>>, D::Error> {
    let raw = OrderedMap::<OrderedMap<Count>>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .map(|(key, row)| (key, row.iter().map(|(hour, count)| (hour, count.0)).collect()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize")]
        n: u64,
        #[serde(default, deserialize_with = "map")]
        by: OrderedMap<u64>,
    }

    fn row(text: &str) -> Result<Row, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[test]
    fn test_int_float_and_null() {
        assert_eq!(row(r#"{"n": 5}"#).unwrap().n, 5);
        assert_eq!(row(r#"{"n": 5.0}"#).unwrap().n, 5);
        assert_eq!(row(r#"{"n": 0.0}"#).unwrap().n, 0);
        assert_eq!(row(r#"{"n": null}"#).unwrap().n, 0);
        assert_eq!(row("{}").unwrap().n, 0);
    }

    #[test]
    fn test_rejects_fractions_and_negatives() {
        assert!(row(r#"{"n": 2.5}"#).is_err());
        assert!(row(r#"{"n": -1}"#).is_err());
        assert!(row(r#"{"n": -3.0}"#).is_err());
        assert!(row(r#"{"n": "7"}"#).is_err());
    }

    #[test]
    fn test_float_map_keeps_order() {
        let parsed = row(r#"{"by": {"zeta": 3.0, "alpha": 1, "mid": null}}"#).unwrap();
        let pairs: Vec<(&str, u64)> = parsed.by.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(pairs, vec![("zeta", 3), ("alpha", 1), ("mid", 0)]);
    }

    #[test]
    fn test_nested() {
        #[derive(Deserialize)]
        struct Heat {
            #[serde(deserialize_with = "nested_map")]
            heatmap: OrderedMap<OrderedMap<u64>>,
        }
        let heat: Heat =
            serde_json::from_str(r#"{"heatmap": {"Mon": {"09": 2.0, "10": 1}}}"#).unwrap();
        assert_eq!(heat.heatmap.get("Mon").map(|r| r.total()), Some(3));
    }
}
