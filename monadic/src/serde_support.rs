use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Optional;

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Optional::Present(value) => serializer.serialize_some(value),
            Optional::Absent => serializer.serialize_none(),
        }
    }
}

/// Fields of type `Optional` need `#[serde(default)]` to be omittable, since
/// derive only treats `Option` that way.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Optional::coerce)
    }
}

#[cfg(test)]
use crate::Outcome;

#[cfg(test)]
#[derive(Deserialize, Debug, PartialEq)]
struct Limits {
    #[serde(default)]
    max: Optional<u32>,
}

#[test]
fn test_optional_as_nullable() {
    assert_eq!(serde_json::to_string(&Optional::present(5)).unwrap(), "5");
    assert_eq!(serde_json::to_string(&Optional::<i32>::absent()).unwrap(), "null");
    let parsed: Optional<i32> = serde_json::from_str("null").unwrap();
    assert_eq!(parsed, Optional::absent());
}

#[test]
fn test_optional_field_default() {
    let limits: Limits = serde_json::from_str("{}").unwrap();
    assert_eq!(limits.max, Optional::absent());
    let limits: Limits = serde_json::from_str(r#"{"max": 7}"#).unwrap();
    assert_eq!(limits.max, Optional::present(7));
}

#[test]
fn test_outcome_tagging() {
    let ok = Outcome::<i32, String>::ok(2);
    let err = Outcome::<i32, String>::error("x".into());
    assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"ok":2}"#);
    assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"x"}"#);
    let back: Outcome<i32, String> = serde_json::from_str(r#"{"error":"x"}"#).unwrap();
    assert_eq!(back, err);
}
