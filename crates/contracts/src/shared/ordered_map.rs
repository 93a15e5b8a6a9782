use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// JSON object decoded with the backend's key order preserved.
///
/// Distributions (`by_source`, `by_status`, ...) are charted in the order the
/// backend emits them, so a `HashMap` would reshuffle bars between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, key: impl Into<String>, value: V) {
        self.0.push((key.into(), value));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl OrderedMap<u64> {
    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, v)| *v).sum()
    }
}

impl OrderedMap<f64> {
    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, v)| *v).sum()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }

    // pandas serialises an empty frame as `null` in a few places
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_backend_order() {
        let map: OrderedMap<u64> =
            serde_json::from_str(r#"{"instagram": 12, "facebook": 30, "google": 8}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["instagram", "facebook", "google"]);
        assert_eq!(map.get("facebook"), Some(&30));
        assert_eq!(map.total(), 50);
    }

    #[test]
    fn test_nested_heatmap() {
        let heatmap: OrderedMap<OrderedMap<u64>> = serde_json::from_str(
            r#"{"Mon": {"09": 3, "10": 5}, "Tue": {"18": 1}}"#,
        )
        .unwrap();
        assert_eq!(heatmap.len(), 2);
        assert_eq!(heatmap.get("Mon").map(|row| row.total()), Some(8));
        assert_eq!(heatmap.get("Sun"), None);
    }

    #[test]
    fn test_null_is_empty() {
        let map: OrderedMap<f64> = serde_json::from_str("null").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_serialize_in_order() {
        let map: OrderedMap<u64> = vec![("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<OrderedMap<u64>>("[1, 2]").is_err());
    }
}
