use crate::model::{AccountId, Id, space::SpaceMarker};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStruct {
    pub owner: AccountId,
    /// Block number after which the registration lapses.
    #[serde(with = "decimal_string")]
    pub expires_at: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_value: Option<String>,
    /// Only set when the domain points at a space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_space: Option<Id<SpaceMarker>>,
}

/// Block numbers written as decimal strings, read from strings or numbers.
mod decimal_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BlockNumber {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(block: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(block)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match BlockNumber::deserialize(deserializer)? {
            BlockNumber::Number(block) => Ok(block),
            BlockNumber::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{AccountId, Id, domain::DomainStruct};
    use serde_json::json;

    #[test]
    fn expiry_is_a_decimal_string() {
        let domain = DomainStruct {
            owner: AccountId::new("alice"),
            expires_at: 1_000,
            outer_value: None,
            inner_space: Some(Id::new(7)),
        };

        let value = serde_json::to_value(&domain).unwrap();
        assert_eq!(
            value,
            json!({ "owner": "alice", "expiresAt": "1000", "innerSpace": "7" })
        );
        assert_eq!(serde_json::from_value::<DomainStruct>(value).unwrap(), domain);

        let numeric = json!({ "owner": "alice", "expiresAt": 1000, "innerSpace": "7" });
        assert_eq!(serde_json::from_value::<DomainStruct>(numeric).unwrap(), domain);
        assert!(
            serde_json::from_value::<DomainStruct>(json!({ "owner": "a", "expiresAt": "soon" }))
                .is_err()
        );
    }
}
