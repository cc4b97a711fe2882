//! Validation of hand-entered (or scanned) transfer input before anything
//! is signed.

use serde::{Deserialize, Serialize};

pub const TRANSFER_COMMAND: &str = "transfer";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("receiver is empty")]
    EmptyReceiver,
    #[error("amount is empty")]
    EmptyAmount,
    #[error("amount {0:?} is not a whole number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

/// A checked transfer: trimmed receiver key and a positive amount.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferRequest {
    pub receiver: String,
    pub amount: u64,
}

impl TransferRequest {
    pub fn parse(receiver: &str, amount: &str) -> Result<Self, TransferError> {
        let receiver = receiver.trim();
        if receiver.is_empty() {
            return Err(TransferError::EmptyReceiver);
        }
        let amount = amount.trim();
        if amount.is_empty() {
            return Err(TransferError::EmptyAmount);
        }
        let value: u64 = amount
            .parse()
            .map_err(|_| TransferError::InvalidAmount(amount.to_string()))?;
        if value == 0 {
            return Err(TransferError::ZeroAmount);
        }
        Ok(Self {
            receiver: receiver.to_string(),
            amount: value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_receiver_and_amount() {
        let req = TransferRequest::parse("  PUBKEY==\n", " 250 ").unwrap();
        assert_eq!(req.receiver, "PUBKEY==");
        assert_eq!(req.amount, 250);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(TransferRequest::parse("", "1"), Err(TransferError::EmptyReceiver));
        assert_eq!(TransferRequest::parse("k", "  "), Err(TransferError::EmptyAmount));
        assert_eq!(
            TransferRequest::parse("k", "1.5"),
            Err(TransferError::InvalidAmount("1.5".into()))
        );
        assert_eq!(
            TransferRequest::parse("k", "-3"),
            Err(TransferError::InvalidAmount("-3".into()))
        );
        assert_eq!(TransferRequest::parse("k", "0"), Err(TransferError::ZeroAmount));
    }
}
