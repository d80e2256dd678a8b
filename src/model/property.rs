use crate::model::{NodeId, PropertyId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub key: String,
    pub value: f64,
    pub node_id: NodeId,
}

/// Body of `POST /property`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpsert {
    pub node_path: String,
    pub key: String,
    pub value: f64,
}

impl PropertyUpsert {
    /// Validate a raw JSON body. `value` has to be a JSON number; strings are
    /// rejected even when they would parse as one.
    pub fn from_json(body: &Value) -> Option<Self> {
        let node_path = match body.get("nodePath")? {
            Value::String(path) if !path.is_empty() => path.clone(),
            _ => return None,
        };
        let key = match body.get("key")? {
            Value::String(key) if !key.is_empty() => key.clone(),
            _ => return None,
        };
        let value = match body.get("value")? {
            Value::Number(number) => number.as_f64()?,
            _ => return None,
        };

        Some(Self {
            node_path,
            key,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_upsert_accepts_numbers() {
        let upsert =
            PropertyUpsert::from_json(&json!({"nodePath": "/AlphaPC", "key": "Cores", "value": 4}))
                .unwrap();
        assert_eq!(upsert.value, 4.0);

        let upsert = PropertyUpsert::from_json(
            &json!({"nodePath": "/AlphaPC", "key": "Power", "value": 123.456789}),
        )
        .unwrap();
        assert_eq!(upsert.value, 123.456789);
    }

    #[test]
    fn test_property_upsert_rejects_numeric_strings() {
        assert!(PropertyUpsert::from_json(
            &json!({"nodePath": "/AlphaPC", "key": "Cores", "value": "42"})
        )
        .is_none());
        assert!(PropertyUpsert::from_json(
            &json!({"nodePath": "/AlphaPC", "key": "Cores", "value": "not-a-number"})
        )
        .is_none());
    }

    #[test]
    fn test_property_upsert_rejects_missing_fields() {
        assert!(PropertyUpsert::from_json(&json!({})).is_none());
        assert!(PropertyUpsert::from_json(&json!({"key": "Cores", "value": 1})).is_none());
        assert!(PropertyUpsert::from_json(&json!({"nodePath": "/A", "value": 1})).is_none());
        assert!(PropertyUpsert::from_json(&json!({"nodePath": "/A", "key": ""})).is_none());
        assert!(
            PropertyUpsert::from_json(&json!({"nodePath": "/A", "key": "k", "value": null}))
                .is_none()
        );
    }

    #[test]
    fn test_property_serializes_node_id() {
        let property = Property {
            id: 3,
            key: "Power".to_string(),
            value: 2.41,
            node_id: 9,
        };
        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({"id": 3, "key": "Power", "value": 2.41, "nodeId": 9})
        );
    }
}
