//! Wire types of the Solana Actions specification.
//!
//! Field names follow the spec's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Discriminant of a GET response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    Action,
}

/// Discriminant of a linked action / POST response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkedActionType {
    Transaction,
}

/// GET response: what the wallet renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGetResponse {
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub title: String,
    pub label: String,
    pub description: String,
    /// Absolute icon URL
    pub icon: String,
    pub links: ActionLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

/// One button (or input form) offered by the action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAction {
    #[serde(rename = "type")]
    pub kind: LinkedActionType,
    pub label: String,
    /// Root-relative POST target; `{name}` placeholders are filled from parameters
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

/// User input collected before POSTing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// POST body sent by the wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPostRequest {
    /// Signer's base58 address
    #[serde(default)]
    pub account: Option<String>,
}

/// POST response carrying the transaction to sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPostResponse {
    #[serde(rename = "type")]
    pub kind: LinkedActionType,
    /// Base64 wire-format transaction
    pub transaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error envelope for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub error: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// `actions.json` discovery manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsManifest {
    pub rules: Vec<ActionRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_tolerates_missing_and_extra_fields() {
        let req: ActionPostRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.account, None);

        let req: ActionPostRequest =
            serde_json::from_str(r#"{"account":"abc","data":{"x":1}}"#).unwrap();
        assert_eq!(req.account.as_deref(), Some("abc"));
    }

    #[test]
    fn test_post_response_shape() {
        let resp = ActionPostResponse {
            kind: LinkedActionType::Transaction,
            transaction: "AQID".to_string(),
            message: None,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({ "type": "transaction", "transaction": "AQID" })
        );
    }

    #[test]
    fn test_manifest_is_camel_case() {
        let manifest = ActionsManifest {
            rules: vec![ActionRule {
                path_pattern: "/stake".to_string(),
                api_path: "/stake-action".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            serde_json::json!({ "rules": [{ "pathPattern": "/stake", "apiPath": "/stake-action" }] })
        );
    }
}
