//! Cell values as they cross the agent boundary.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A cell value as Univer reports it.
///
/// Decoded once when the payload arrives. JSON `null` is [`CellValue::Absent`];
/// arrays and objects have no cell meaning and decode as absent too.
/// Formulas never appear here; they travel in a separate matrix.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Absent,
    Boolean(bool),
    Number(f64),
    Text(String),
}

/// Row-major block of values
pub type ValueMatrix = Vec<Vec<CellValue>>;

/// Row-major block of formulas; an empty string means "no formula"
pub type FormulaMatrix = Vec<Vec<String>>;

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

/// True when every cell of the matrix is absent (or the matrix is empty)
pub fn all_absent(values: &[Vec<CellValue>]) -> bool {
    values.iter().flatten().all(CellValue::is_absent)
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Boolean(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Absent => serializer.serialize_none(),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a cell value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<CellValue, D::Error> {
        d.deserialize_any(CellValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        Ok(CellValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<CellValue, E> {
        Ok(CellValue::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<CellValue, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(CellValue::Absent)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<CellValue, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(CellValue::Absent)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_closed_set() {
        let row: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 42, 1.5, "x", [1], {"a": 1}]"#).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::Absent,
                CellValue::Boolean(true),
                CellValue::Number(42.0),
                CellValue::Number(1.5),
                CellValue::Text("x".into()),
                CellValue::Absent,
                CellValue::Absent,
            ]
        );
    }

    #[test]
    fn test_encode() {
        let row = vec![CellValue::Absent, CellValue::from("a"), CellValue::from(2.0)];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[null,"a",2.0]"#);
    }

    #[test]
    fn test_all_absent() {
        assert!(all_absent(&[]));
        assert!(all_absent(&[vec![CellValue::Absent; 3]]));
        assert!(!all_absent(&[vec![CellValue::Absent, CellValue::Boolean(false)]]));
    }
}
