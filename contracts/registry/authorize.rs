use ink::primitives::AccountId;

use crate::approvals::ApprovalRegistry;
use crate::ledger::OwnershipLedger;
use crate::model::{Error, Result, TokenId};

/// Combines ownership, single-delegate, and operator state into the one
/// yes/no every mutating request hangs on. The caller identity is always an
/// explicit argument; nothing in here reads ambient identity.
pub struct TransferAuthorizer;

impl TransferAuthorizer {
    /// Short-circuit, owner first: the caller is the owner, or the token's
    /// current delegate, or an operator of the owner. A token with no
    /// delegate set simply falls through to the operator clause.
    pub fn is_authorized(
        ledger: &OwnershipLedger,
        approvals: &ApprovalRegistry,
        caller_acc: AccountId,
        token_id: TokenId,
    ) -> Result<bool> {
        let owner_acc = ledger.owner_of(token_id)?;
        if caller_acc == owner_acc {
            return Ok(true)
        }
        if approvals.delegate_of(token_id) == Ok(caller_acc) {
            return Ok(true)
        }
        Ok(approvals.is_operator(owner_acc, caller_acc))
    }

    /// Gate for a transfer request. The declared `from` is checked against
    /// the actual owner by the ledger itself; this gate rejects callers with
    /// no authorization path and recipients the registry may not hold for
    /// (its own account).
    pub fn authorize_transfer(
        ledger: &OwnershipLedger,
        approvals: &ApprovalRegistry,
        caller_acc: AccountId,
        to_acc: AccountId,
        registry_acc: AccountId,
        token_id: TokenId,
    ) -> Result<()> {
        if !Self::is_authorized(ledger, approvals, caller_acc, token_id)? {
            return Err(Error::Unauthorized)
        }
        if to_acc == registry_acc {
            return Err(Error::InvalidRecipient)
        }
        Ok(())
    }

    /// Only the literal current owner may set a token's delegate; delegates
    /// and operators are deliberately not permitted here. Returns the owner
    /// for the notification.
    pub fn authorize_approval(
        ledger: &OwnershipLedger,
        caller_acc: AccountId,
        token_id: TokenId,
    ) -> Result<AccountId> {
        let owner_acc = ledger.owner_of(token_id)?;
        if caller_acc != owner_acc {
            return Err(Error::Unauthorized)
        }
        Ok(owner_acc)
    }
}
