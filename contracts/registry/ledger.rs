use core::cmp::min;

use ink::prelude::vec::Vec;
use ink::primitives::AccountId;
use ink::storage::Mapping;

use crate::model::{is_null_account, Error, Result, TokenId};

/// Who owns what, and how many. The maps are only ever touched through the
/// operations below; `owned_count` is maintained incrementally on every
/// ownership change and always equals the number of ids mapped to an owner.
#[ink::storage_item]
#[derive(Default, Debug)]
pub struct OwnershipLedger {
    /// token_id -> owner_acc
    owner_by_id: Mapping<TokenId, AccountId>,
    /// owner_acc -> number of tokens owned
    owned_count: Mapping<AccountId, u32>,
    /// (owner_acc, index_val) -> token_id (for pagination/enumeration)
    tokens_by_owner: Mapping<(AccountId, u32), TokenId>,
    /// token_id -> index within owner's enumeration list
    owned_index: Mapping<TokenId, u32>,
}

impl OwnershipLedger {
    pub fn owner_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.owner_by_id.get(&token_id).ok_or(Error::TokenMissing)
    }

    pub fn balance_of(&self, owner_acc: AccountId) -> Result<u32> {
        if is_null_account(owner_acc) {
            return Err(Error::InvalidOwner)
        }
        Ok(self.owned_count.get(&owner_acc).unwrap_or(0))
    }

    /// Reassign `token_id` from `from_acc` to `to_acc`. The declared sender
    /// must be the current owner and the recipient must not be the null
    /// identity. Every check runs before the first write.
    pub fn transfer(&mut self, token_id: TokenId, from_acc: AccountId, to_acc: AccountId) -> Result<()> {
        let owner_acc = self.owner_by_id.get(&token_id).ok_or(Error::TokenMissing)?;
        if owner_acc != from_acc {
            return Err(Error::OwnerMismatch)
        }
        if is_null_account(to_acc) {
            return Err(Error::InvalidRecipient)
        }
        // the receiving count must fit before anything is written
        let to_count = self.owned_count.get(&to_acc).unwrap_or(0);
        if to_count.checked_add(1).is_none() {
            return Err(Error::Overflow)
        }

        self.remove_token_from_owner(from_acc, token_id)?;
        self.owner_by_id.insert(&token_id, &to_acc);
        self.add_token_to_owner(to_acc, token_id)?;
        Ok(())
    }

    /// Minting seam: introduce a fresh `(token, owner)` pair. The core never
    /// calls this itself; only the creation authority does.
    pub fn admit(&mut self, token_id: TokenId, owner_acc: AccountId) -> Result<()> {
        if is_null_account(owner_acc) {
            return Err(Error::InvalidOwner)
        }
        if self.owner_by_id.contains(&token_id) {
            return Err(Error::TokenExists)
        }
        self.owner_by_id.insert(&token_id, &owner_acc);
        self.add_token_to_owner(owner_acc, token_id)
    }

    /// Paginated list of token ids held by `owner_acc`.
    pub fn tokens_of(&self, owner_acc: AccountId, start_index: u32, limit_cnt: u32) -> Vec<TokenId> {
        let count_val = self.owned_count.get(&owner_acc).unwrap_or(0);
        if start_index >= count_val || limit_cnt == 0 {
            return Vec::new()
        }
        let end_index = min(count_val, start_index.saturating_add(limit_cnt));
        let mut list_vec: Vec<TokenId> = Vec::new();
        let mut index_val = start_index;
        while index_val < end_index {
            if let Some(token_id) = self.tokens_by_owner.get(&(owner_acc, index_val)) {
                list_vec.push(token_id);
            }
            index_val += 1;
        }
        list_vec
    }

    // -------- internals: owner sets management --------

    fn add_token_to_owner(&mut self, to_acc: AccountId, token_id: TokenId) -> Result<()> {
        let count_val = self.owned_count.get(&to_acc).unwrap_or(0);
        let new_count = count_val.checked_add(1).ok_or(Error::Overflow)?;
        self.tokens_by_owner.insert(&(to_acc, count_val), &token_id);
        self.owned_index.insert(&token_id, &count_val);
        self.owned_count.insert(&to_acc, &new_count);
        Ok(())
    }

    fn remove_token_from_owner(&mut self, from_acc: AccountId, token_id: TokenId) -> Result<()> {
        let count_val = self.owned_count.get(&from_acc).unwrap_or(0);
        if count_val == 0 {
            return Err(Error::TokenMissing)
        }

        // index of token to remove
        let remove_index = self.owned_index.get(&token_id).ok_or(Error::TokenMissing)?;

        // move the last token into the removed slot, then drop the last slot
        let last_index = count_val - 1;
        if let Some(last_token_id) = self.tokens_by_owner.get(&(from_acc, last_index)) {
            if last_index != remove_index {
                self.tokens_by_owner.insert(&(from_acc, remove_index), &last_token_id);
                self.owned_index.insert(&last_token_id, &remove_index);
            }
            self.tokens_by_owner.remove(&(from_acc, last_index));
        }

        self.owned_index.remove(&token_id);
        self.owned_count.insert(&from_acc, &last_index);
        Ok(())
    }
}
