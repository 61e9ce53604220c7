//! Replay-protection counters.

use serde::{Deserialize, Serialize};

use crate::AccountError;

/// Account number and sequence as reported by the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

/// The mutable, externally populated part of an identity.
///
/// Neither counter is derived from key material; both start unset and must
/// be filled in before a transaction can be signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub sequence: Option<u64>,
    pub account_number: Option<u64>,
}

impl Session {
    /// Session with both counters set.
    pub fn new(account_number: u64, sequence: u64) -> Self {
        Session {
            sequence: Some(sequence),
            account_number: Some(account_number),
        }
    }

    /// Take both counters from a chain query.
    pub fn apply(&mut self, info: AccountInfo) {
        self.account_number = Some(info.account_number);
        self.sequence = Some(info.sequence);
    }

    /// Advance the sequence by `by`, e.g. after a broadcast was accepted.
    ///
    /// # Returns
    /// The new sequence, or an error if the sequence is unset or would overflow.
    pub fn increase_sequence(&mut self, by: u64) -> Result<u64, AccountError> {
        let current = self.sequence.ok_or(AccountError::SequenceUnset)?;
        let next = current.checked_add(by).ok_or(AccountError::SequenceOverflow)?;
        self.sequence = Some(next);
        Ok(next)
    }
}
