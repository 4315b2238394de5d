//! Upstream data models.
//!
//! Shapes of the `data` payloads returned by the HenrikDev Valorant API.
//! Every field is optional: the upstream omits or nulls fields freely and
//! tools only project what they need.

mod account;
mod content;
mod leaderboard;
mod matches;
mod mmr;

pub use account::*;
pub use content::*;
pub use leaderboard::*;
pub use matches::*;
pub use mmr::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that the upstream may send as `null`, falling back
/// to the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Format a display name and tag as `name#tag`.
pub fn riot_id(name: &str, tag: &str) -> String {
    format!("{}#{}", name, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "nullable")]
        items: Vec<u32>,
    }

    #[test]
    fn test_nullable_accepts_null_and_missing() {
        let null: Holder = serde_json::from_value(json!({ "items": null })).unwrap();
        assert!(null.items.is_empty());

        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(missing.items.is_empty());

        let present: Holder = serde_json::from_value(json!({ "items": [1, 2] })).unwrap();
        assert_eq!(present.items, vec![1, 2]);
    }

    #[test]
    fn test_riot_id() {
        assert_eq!(riot_id("TenZ", "0505"), "TenZ#0505");
    }
}
