use serde::Serialize;

/// Body of `POST /domain/register`.
#[derive(Debug, Serialize)]
pub struct DomainRegistration<'a> {
    pub name: &'a str,
    pub owner: &'a str,
    pub signature: String,
    pub timestamp: u64,
}

/// Body of `POST /asset/create`.
#[derive(Debug, Serialize)]
pub struct AssetRegistration<'a> {
    pub name: &'a str,
    pub domain: &'a str,
    pub creator: &'a str,
    pub signature: String,
    pub timestamp: u64,
}

#[derive(Debug, Serialize)]
pub struct OperationParams<'a> {
    pub command: &'a str,
    pub amount: u64,
    pub sender: &'a str,
    pub receiver: &'a str,
}

/// Body of `POST /asset/operation`.
#[derive(Debug, Serialize)]
pub struct OperationSubmission<'a> {
    #[serde(rename = "asset-uuid")]
    pub asset_uuid: &'a str,
    pub params: OperationParams<'a>,
    pub signature: String,
    pub timestamp: u64,
}

/// Body of `POST /message`.
#[derive(Debug, Serialize)]
pub struct MessageSubmission<'a> {
    pub message: &'a str,
    pub creator: &'a str,
    pub receiver: &'a str,
    pub signature: String,
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_body_nests_params_and_hyphenates_uuid() {
        let body = OperationSubmission {
            asset_uuid: "uuid-1",
            params: OperationParams {
                command: "transfer",
                amount: 5,
                sender: "ME",
                receiver: "YOU",
            },
            signature: "SIG".into(),
            timestamp: 9,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "asset-uuid": "uuid-1",
                "params": {
                    "command": "transfer",
                    "amount": 5,
                    "sender": "ME",
                    "receiver": "YOU"
                },
                "signature": "SIG",
                "timestamp": 9
            })
        );
    }
}
