//! Ledger API operations.
//!
//! Write operations sign a [`CanonicalMessage`] and POST a JSON body; reads
//! are unsigned GETs. Every call issues exactly one request and never
//! retries.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::clock::{Clock, SystemClock};
use crate::error::ClientError;
use crate::models::{
    Asset, AssetRegistration, Domain, DomainRegistration, History, MessageSubmission,
    OperationParams, OperationSubmission, ResponseObject, StatusFields,
};
use crate::outcome::{dispatch, dispatch_history, dispatch_list, Outcome, STATUS_OK};
use crate::signing::{sign, CanonicalMessage, KeyPair};
use crate::transport::{HttpResponse, HttpTransport};

pub const DOMAIN_REGISTER_PATH: &[&str] = &["domain", "register"];
pub const DOMAIN_LIST_PATH: &[&str] = &["domain", "list"];
pub const ASSET_CREATE_PATH: &[&str] = &["asset", "create"];
pub const ASSET_LIST_PATH: &[&str] = &["asset", "list"];
pub const ASSET_OPERATION_PATH: &[&str] = &["asset", "operation"];
pub const USER_HISTORY_PATH: &[&str] = &["history", "transaction"];
pub const HISTORY_PATH: &[&str] = &["history"];
pub const MESSAGE_PATH: &[&str] = &["message"];

/// Stateless wrapper over the ledger REST API.
///
/// Construct one per process and share it by reference; it holds no mutable
/// state.
pub struct LedgerClient<T, C = SystemClock> {
    transport: T,
    clock: C,
}

impl<T: HttpTransport> LedgerClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            clock: SystemClock,
        }
    }
}

impl<T: HttpTransport, C: Clock> LedgerClient<T, C> {
    pub fn with_clock(transport: T, clock: C) -> Self {
        Self { transport, clock }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /domain/register`.
    pub fn register_domain(
        &self,
        endpoint: &str,
        name: &str,
        key_pair: &KeyPair,
    ) -> Result<Outcome<Domain>, ClientError> {
        let timestamp = self.clock.unix_seconds();
        let owner = key_pair.public_key_base64();
        let message = CanonicalMessage::register_domain(timestamp, &owner, name);
        let body = DomainRegistration {
            name,
            owner: &owner,
            signature: sign(key_pair, &message),
            timestamp,
        };

        let response = self.post(endpoint, DOMAIN_REGISTER_PATH, &body, key_pair)?;
        let outcome = decode::<Domain>(&response, "register_domain")?;
        Ok(outcome.map(|mut domain| {
            domain.name = name.to_string();
            domain.owner = owner;
            domain
        }))
    }

    /// `POST /asset/create`.
    pub fn register_asset(
        &self,
        endpoint: &str,
        name: &str,
        domain: &str,
        key_pair: &KeyPair,
    ) -> Result<Outcome<Asset>, ClientError> {
        let timestamp = self.clock.unix_seconds();
        let creator = key_pair.public_key_base64();
        let message = CanonicalMessage::register_asset(timestamp, &creator, name);
        let body = AssetRegistration {
            name,
            domain,
            creator: &creator,
            signature: sign(key_pair, &message),
            timestamp,
        };

        let response = self.post(endpoint, ASSET_CREATE_PATH, &body, key_pair)?;
        let outcome = decode::<Asset>(&response, "register_asset")?;
        Ok(outcome.map(|mut asset| {
            asset.name = name.to_string();
            asset.domain = domain.to_string();
            asset.creator = creator;
            asset
        }))
    }

    /// `GET /domain/list`. Empty unless the server answers 200.
    pub fn find_domains(&self, endpoint: &str) -> Result<Vec<Domain>, ClientError> {
        let response = self.get(endpoint, DOMAIN_LIST_PATH, &[])?;
        decode_list(&response, "find_domains")
    }

    /// `GET /asset/list/{domain}`. Empty unless the server answers 200.
    pub fn find_assets(&self, endpoint: &str, domain: &str) -> Result<Vec<Asset>, ClientError> {
        let response = self.get(endpoint, ASSET_LIST_PATH, &[domain])?;
        decode_list(&response, "find_assets")
    }

    /// `POST /asset/operation`, e.g. a `transfer` of `amount` to `receiver`.
    pub fn operation(
        &self,
        endpoint: &str,
        asset_uuid: &str,
        command: &str,
        amount: u64,
        receiver: &str,
        key_pair: &KeyPair,
    ) -> Result<Outcome<ResponseObject>, ClientError> {
        let timestamp = self.clock.unix_seconds();
        let sender = key_pair.public_key_base64();
        let message =
            CanonicalMessage::operation(timestamp, &sender, receiver, command, amount, asset_uuid);
        let body = OperationSubmission {
            asset_uuid,
            params: OperationParams {
                command,
                amount,
                sender: &sender,
                receiver,
            },
            signature: sign(key_pair, &message),
            timestamp,
        };

        let response = self.post(endpoint, ASSET_OPERATION_PATH, &body, key_pair)?;
        decode(&response, "operation")
    }

    /// `GET /history/transaction/{user_id}`.
    pub fn history_by_user(
        &self,
        endpoint: &str,
        user_id: &str,
    ) -> Result<Outcome<History>, ClientError> {
        let response = self.get(endpoint, USER_HISTORY_PATH, &[user_id])?;
        decode_history(&response, "history_by_user")
    }

    /// `GET /history/{domain}.{asset}`.
    pub fn history_by_asset(
        &self,
        endpoint: &str,
        domain: &str,
        asset: &str,
    ) -> Result<Outcome<History>, ClientError> {
        let key = format!("{domain}.{asset}");
        let response = self.get(endpoint, HISTORY_PATH, &[key.as_str()])?;
        decode_history(&response, "history_by_asset")
    }

    /// `POST /message`.
    pub fn send_message(
        &self,
        endpoint: &str,
        body: &str,
        receiver: &str,
        key_pair: &KeyPair,
    ) -> Result<Outcome<ResponseObject>, ClientError> {
        let timestamp = self.clock.unix_seconds();
        let creator = key_pair.public_key_base64();
        let message = CanonicalMessage::send_message(timestamp, body, &creator);
        let submission = MessageSubmission {
            message: body,
            creator: &creator,
            receiver,
            signature: sign(key_pair, &message),
            timestamp,
        };

        let response = self.post(endpoint, MESSAGE_PATH, &submission, key_pair)?;
        decode(&response, "send_message")
    }

    fn post<B: Serialize>(
        &self,
        endpoint: &str,
        path: &[&str],
        body: &B,
        key_pair: &KeyPair,
    ) -> Result<HttpResponse, ClientError> {
        let url = endpoint_url(endpoint, path, &[])?;
        let json = serde_json::to_string(body)?;
        debug!(url = %url, signer = %key_pair.fingerprint(), "POST");
        let response = self.transport.post(url.as_str(), &json)?;
        debug!(url = %url, status = response.status, "response");
        Ok(response)
    }

    fn get(
        &self,
        endpoint: &str,
        path: &[&str],
        params: &[&str],
    ) -> Result<HttpResponse, ClientError> {
        let url = endpoint_url(endpoint, path, params)?;
        debug!(url = %url, "GET");
        let response = self.transport.get(url.as_str())?;
        debug!(url = %url, status = response.status, "response");
        Ok(response)
    }
}

/// Append `path` and percent-encoded `params` to the endpoint base URL.
///
/// A `.` or `..` parameter is refused: URL normalisation would silently drop
/// it and address a different resource.
pub fn endpoint_url(endpoint: &str, path: &[&str], params: &[&str]) -> Result<Url, ClientError> {
    if let Some(param) = params.iter().find(|p| matches!(**p, "." | "..")) {
        return Err(ClientError::InvalidPathParameter(param.to_string()));
    }
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let mut url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid("endpoint cannot carry a path".to_string()))?;
        segments
            .pop_if_empty()
            .extend(path.iter().copied())
            .extend(params.iter().copied());
    }
    Ok(url)
}

fn decode<T>(response: &HttpResponse, operation: &str) -> Result<Outcome<T>, ClientError>
where
    T: DeserializeOwned + StatusFields,
{
    let outcome = dispatch::<T>(response)?;
    log_failure(&outcome, operation);
    Ok(outcome)
}

fn log_failure<T>(outcome: &Outcome<T>, operation: &str) {
    if !outcome.is_success() {
        warn!(
            operation,
            status = outcome.status(),
            reason = outcome.message(),
            "ledger did not accept request"
        );
    }
}

fn decode_list<T: DeserializeOwned>(
    response: &HttpResponse,
    operation: &str,
) -> Result<Vec<T>, ClientError> {
    if response.status != STATUS_OK {
        warn!(
            operation,
            status = response.status,
            reason = %response.reason,
            "list request failed, returning no entries"
        );
    }
    Ok(dispatch_list(response)?)
}

fn decode_history(response: &HttpResponse, operation: &str) -> Result<Outcome<History>, ClientError> {
    let outcome = dispatch_history::<History>(response)?;
    log_failure(&outcome, operation);
    Ok(outcome.map(|mut history| {
        history.status = Some(STATUS_OK);
        history
    }))
}
