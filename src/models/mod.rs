//! Records exchanged with the ledger API.
//!
//! Response records accept missing fields: a 400 body usually carries only
//! `status` and `message`, a 200 body only the payload.

mod requests;

pub use requests::{
    AssetRegistration, DomainRegistration, MessageSubmission, OperationParams, OperationSubmission,
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Domain {
    pub name: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Asset {
    pub name: String,
    pub domain: String,
    pub creator: String,
    /// Identifier used by `/asset/operation`, when the server reports one.
    #[serde(alias = "asset-uuid", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generic status/message answer of write operations.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResponseObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One past operation. The client does not interpret its shape.
pub type HistoryEntry = serde_json::Value;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct History {
    pub history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status and message a record carries when the server rejected a request.
pub trait StatusFields {
    fn status_code(&self) -> Option<u16>;
    fn status_message(&self) -> Option<&str>;
}

macro_rules! impl_status_fields {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl StatusFields for $ty {
                fn status_code(&self) -> Option<u16> {
                    self.status
                }

                fn status_message(&self) -> Option<&str> {
                    self.message.as_deref()
                }
            }
        )+
    };
}

impl_status_fields!(Domain, Asset, ResponseObject, History);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_body_decodes_without_payload() {
        let domain: Domain =
            serde_json::from_str(r#"{"status":400,"message":"duplicate domain"}"#).unwrap();
        assert_eq!(domain.name, "");
        assert_eq!(domain.status_code(), Some(400));
        assert_eq!(domain.status_message(), Some("duplicate domain"));
    }

    #[test]
    fn asset_accepts_hyphenated_uuid() {
        let asset: Asset =
            serde_json::from_str(r#"{"name":"coin","asset-uuid":"abc"}"#).unwrap();
        assert_eq!(asset.uuid.as_deref(), Some("abc"));
    }

    #[test]
    fn history_keeps_entry_order() {
        let history: History = serde_json::from_str(
            r#"{"history":[{"id":1},{"id":2},{"id":3}]}"#,
        )
        .unwrap();
        let ids: Vec<u64> = history
            .history
            .iter()
            .filter_map(|e| e.get("id").and_then(|v| v.as_u64()))
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(history.status, None);
    }

    #[test]
    fn success_payload_omits_absent_status() {
        let json = serde_json::to_value(Domain {
            name: "d".into(),
            owner: "o".into(),
            ..Domain::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"name": "d", "owner": "o"}));
    }
}
