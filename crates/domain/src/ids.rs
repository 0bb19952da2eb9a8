use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifiers are assigned by the backend (or derived client-side from
/// creation time), so they are opaque strings rather than UUIDs.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Case content
define_id!(CaseId);
define_id!(CharacterId);
define_id!(EvidenceId);
define_id!(SceneId);

// Backend session correlation (cost / rate-limit tracking)
define_id!(SessionId);

// Client-side records
define_id!(SaveId);
define_id!(NotificationId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CharacterId::new("c2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c2\"");

        let parsed: CharacterId = serde_json::from_str("\"c9\"").unwrap();
        assert_eq!(parsed.as_str(), "c9");
    }

    #[test]
    fn ids_work_as_json_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(CharacterId::new("c1"), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"c1":1}"#);
    }
}
