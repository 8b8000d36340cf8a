use ink::primitives::AccountId;
use ink::storage::Mapping;

use crate::model::{is_null_account, Error, Result, TokenId};

/// Delegation state: at most one delegate per token, plus revocable
/// per-(owner, operator) flags that cover all of an owner's tokens.
#[ink::storage_item]
#[derive(Default, Debug)]
pub struct ApprovalRegistry {
    /// token_id -> delegate_acc (single slot, overwritten, never merged)
    token_approval: Mapping<TokenId, AccountId>,
    /// (owner_acc, operator_acc) -> approved_flag
    operator_approval: Mapping<(AccountId, AccountId), bool>,
}

impl ApprovalRegistry {
    /// Overwrite the delegate slot for `token_id`. The null identity clears
    /// it, so the slot never stores a null sentinel. No ownership check
    /// here; callers authorize before invoking.
    pub fn set_delegate(&mut self, token_id: TokenId, delegate_acc: AccountId) {
        if is_null_account(delegate_acc) {
            self.token_approval.remove(&token_id);
        } else {
            self.token_approval.insert(&token_id, &delegate_acc);
        }
    }

    /// Absence is an explicit error, never a null sentinel.
    pub fn delegate_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.token_approval.get(&token_id).ok_or(Error::NoApproval)
    }

    pub fn set_operator(
        &mut self,
        owner_acc: AccountId,
        operator_acc: AccountId,
        approved_flag: bool,
    ) -> Result<()> {
        if operator_acc == owner_acc {
            return Err(Error::SelfApproval)
        }
        if is_null_account(operator_acc) {
            return Err(Error::InvalidOperator)
        }
        self.operator_approval.insert(&(owner_acc, operator_acc), &approved_flag);
        Ok(())
    }

    pub fn is_operator(&self, owner_acc: AccountId, operator_acc: AccountId) -> bool {
        self.operator_approval.get(&(owner_acc, operator_acc)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> ink::env::test::DefaultAccounts<ink::env::DefaultEnvironment> {
        ink::env::test::default_accounts::<ink::env::DefaultEnvironment>()
    }

    fn null_acc() -> AccountId {
        AccountId::from([0x0; 32])
    }

    #[ink::test]
    fn delegate_slot_overwrites() {
        let accs = accounts();
        let mut approvals = ApprovalRegistry::default();

        assert_eq!(approvals.delegate_of(7), Err(Error::NoApproval));

        approvals.set_delegate(7, accs.bob);
        assert_eq!(approvals.delegate_of(7), Ok(accs.bob));

        // a new approval replaces the old one, never merges
        approvals.set_delegate(7, accs.charlie);
        assert_eq!(approvals.delegate_of(7), Ok(accs.charlie));
    }

    #[ink::test]
    fn null_delegate_clears_the_slot() {
        let accs = accounts();
        let mut approvals = ApprovalRegistry::default();

        approvals.set_delegate(7, accs.bob);
        approvals.set_delegate(7, null_acc());
        assert_eq!(approvals.delegate_of(7), Err(Error::NoApproval));
    }

    #[ink::test]
    fn operator_flag_defaults_false_and_round_trips() {
        let accs = accounts();
        let mut approvals = ApprovalRegistry::default();

        assert!(!approvals.is_operator(accs.alice, accs.bob));

        approvals.set_operator(accs.alice, accs.bob, true).unwrap();
        assert!(approvals.is_operator(accs.alice, accs.bob));

        // repeated grant is idempotent on state
        approvals.set_operator(accs.alice, accs.bob, true).unwrap();
        assert!(approvals.is_operator(accs.alice, accs.bob));

        approvals.set_operator(accs.alice, accs.bob, false).unwrap();
        assert!(!approvals.is_operator(accs.alice, accs.bob));
    }

    #[ink::test]
    fn operator_rejects_self_and_null() {
        let accs = accounts();
        let mut approvals = ApprovalRegistry::default();

        assert_eq!(
            approvals.set_operator(accs.alice, accs.alice, true),
            Err(Error::SelfApproval)
        );
        assert_eq!(
            approvals.set_operator(accs.alice, null_acc(), true),
            Err(Error::InvalidOperator)
        );
        assert!(!approvals.is_operator(accs.alice, accs.alice));
    }
}
