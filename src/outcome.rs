use serde::{de::DeserializeOwned, Serialize};

use crate::models::StatusFields;
use crate::transport::HttpResponse;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD: u16 = 400;

/// Result of one ledger call, split by how the server answered.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// HTTP 200 with a decoded payload.
    Success(T),
    /// HTTP 400. `status` and `message` are taken from the response body
    /// verbatim; a body without `status` reports 400 and one without
    /// `message` reports an empty string.
    Rejected { status: u16, message: String },
    /// Any other HTTP status. `message` is the reason phrase.
    Unexpected { status: u16, message: String },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Status code carried by a rejection or unexpected answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Rejected { status, .. } | Outcome::Unexpected { status, .. } => Some(*status),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Rejected { message, .. } | Outcome::Unexpected { message, .. } => {
                Some(message.as_str())
            }
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Rejected { status, message } => Outcome::Rejected { status, message },
            Outcome::Unexpected { status, message } => Outcome::Unexpected { status, message },
        }
    }
}

/// Map a response onto an [`Outcome`].
///
/// 200 and 400 bodies are decoded into `T`; a malformed body is an error.
/// Other statuses never touch the body.
pub(crate) fn dispatch<T>(response: &HttpResponse) -> Result<Outcome<T>, serde_json::Error>
where
    T: DeserializeOwned + StatusFields,
{
    match response.status {
        STATUS_OK => Ok(Outcome::Success(serde_json::from_str(&response.body)?)),
        STATUS_BAD => {
            let rejected: T = serde_json::from_str(&response.body)?;
            Ok(Outcome::Rejected {
                status: rejected.status_code().unwrap_or(STATUS_BAD),
                message: rejected.status_message().unwrap_or_default().to_string(),
            })
        }
        status => Ok(Outcome::Unexpected {
            status,
            message: response.reason.clone(),
        }),
    }
}

/// Map a history response. Only a 200 body is read; every other answer is
/// reported from the status line alone.
pub(crate) fn dispatch_history<T>(response: &HttpResponse) -> Result<Outcome<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    match response.status {
        STATUS_OK => Ok(Outcome::Success(serde_json::from_str(&response.body)?)),
        STATUS_BAD => Ok(Outcome::Rejected {
            status: STATUS_BAD,
            message: response.reason.clone(),
        }),
        status => Ok(Outcome::Unexpected {
            status,
            message: response.reason.clone(),
        }),
    }
}

/// Map a list response: 200 decodes a JSON array, anything else is empty.
pub(crate) fn dispatch_list<T>(response: &HttpResponse) -> Result<Vec<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    match response.status {
        STATUS_OK => serde_json::from_str(&response.body),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseObject;

    fn response(status: u16, reason: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    #[test]
    fn ok_decodes_payload() {
        let out: Outcome<ResponseObject> =
            dispatch(&response(200, "OK", r#"{"status":200,"message":"done"}"#)).unwrap();
        let payload = out.success().unwrap();
        assert_eq!(payload.message.as_deref(), Some("done"));
    }

    #[test]
    fn bad_request_uses_body_fields_verbatim() {
        let out: Outcome<ResponseObject> = dispatch(&response(
            400,
            "Bad Request",
            r#"{"status":409,"message":"not enough balance"}"#,
        ))
        .unwrap();
        assert_eq!(
            out,
            Outcome::Rejected {
                status: 409,
                message: "not enough balance".into()
            }
        );
    }

    #[test]
    fn unexpected_status_ignores_body() {
        let out: Outcome<ResponseObject> =
            dispatch(&response(500, "Internal Server Error", "<html>oops</html>")).unwrap();
        assert_eq!(out.status(), Some(500));
        assert_eq!(out.message(), Some("Internal Server Error"));
        assert!(!out.is_success());
    }

    #[test]
    fn bad_request_without_status_or_message_falls_back() {
        let out: Outcome<ResponseObject> =
            dispatch(&response(400, "Bad Request", r#"{"message":"x"}"#)).unwrap();
        assert_eq!(
            out,
            Outcome::Rejected {
                status: 400,
                message: "x".into()
            }
        );

        let out: Outcome<ResponseObject> =
            dispatch(&response(400, "Bad Request", r#"{"status":422}"#)).unwrap();
        assert_eq!(
            out,
            Outcome::Rejected {
                status: 422,
                message: String::new()
            }
        );
    }

    #[test]
    fn history_bad_request_never_reads_body() {
        let out: Outcome<ResponseObject> =
            dispatch_history(&response(400, "Bad Request", "Bad Request")).unwrap();
        assert_eq!(
            out,
            Outcome::Rejected {
                status: 400,
                message: "Bad Request".into()
            }
        );
    }

    #[test]
    fn malformed_ok_body_is_an_error() {
        let out: Result<Outcome<ResponseObject>, _> = dispatch(&response(200, "OK", "not json"));
        assert!(out.is_err());
    }

    #[test]
    fn list_is_empty_on_any_failure_status() {
        for status in [400u16, 404, 500, 503] {
            let list: Vec<ResponseObject> =
                dispatch_list(&response(status, "whatever", "garbage")).unwrap();
            assert!(list.is_empty());
        }
    }

    #[test]
    fn map_preserves_failures() {
        let out: Outcome<u8> = Outcome::Unexpected {
            status: 502,
            message: "Bad Gateway".into(),
        };
        let mapped = out.map(|v| v.to_string());
        assert_eq!(mapped.status(), Some(502));
        assert!(mapped.into_success().is_none());
    }
}
