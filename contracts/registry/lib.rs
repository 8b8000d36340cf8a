#![cfg_attr(not(feature = "std"), no_std)]

mod approvals;
mod authorize;
mod ledger;
mod model;

#[ink::contract]
mod registry {
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    use crate::approvals::ApprovalRegistry;
    use crate::authorize::TransferAuthorizer;
    use crate::ledger::OwnershipLedger;
    use crate::model::{
        Approved, Error, Minted, MinterSet, OperatorSet, Result, TokenId, Transferred,
    };

    /// Ownership and delegated-authorization registry for uniquely
    /// identified tokens. Every mutating message resolves the caller once,
    /// authorizes, then mutates; a failed precondition aborts the whole
    /// message before any state is written.
    #[ink(storage)]
    pub struct Registry {
        // access control / roles
        admin_acc: AccountId,
        is_minter: Mapping<AccountId, bool>,

        // supply controls
        max_supply_opt: Option<u128>,
        supply_cnt: u128,
        next_id: TokenId,

        // core components
        ledger: OwnershipLedger,
        approvals: ApprovalRegistry,

        // versioning
        storage_ver_u32: u32,
    }

    impl Registry {
        #[ink(constructor)]
        pub fn new(max_supply_opt: Option<u128>) -> Self {
            Self {
                admin_acc: Self::env().caller(),
                is_minter: Mapping::default(),
                max_supply_opt,
                supply_cnt: 0,
                next_id: 0,
                ledger: OwnershipLedger::default(),
                approvals: ApprovalRegistry::default(),
                storage_ver_u32: 1,
            }
        }

        // -------- modifiers (helpers) --------

        fn only_admin(&self) -> Result<()> {
            if self.env().caller() != self.admin_acc {
                return Err(Error::NotAdmin)
            }
            Ok(())
        }

        // -------- admin / roles --------

        #[ink(message)]
        pub fn set_minter(&mut self, minter_acc: AccountId, enabled_flag: bool) -> Result<()> {
            self.only_admin()?;
            self.is_minter.insert(&minter_acc, &enabled_flag);
            self.env().emit_event(MinterSet { minter_acc, enabled_flag });
            Ok(())
        }

        // -------- minting --------

        /// Privileged, bounded mint of sequential ids to the caller
        /// (caller must hold the minter role).
        #[ink(message)]
        pub fn mint_n(&mut self, amount_cnt: u32) -> Result<()> {
            if amount_cnt == 0 {
                return Err(Error::AmountZero)
            }
            let caller_acc = self.env().caller();
            if !self.is_minter.get(&caller_acc).unwrap_or(false) {
                return Err(Error::Unauthorized)
            }

            const MAX_PER_CALL: u32 = 200;
            if amount_cnt > MAX_PER_CALL {
                return Err(Error::Overflow)
            }
            // the whole batch must fit under the cap before any id is assigned
            if let Some(max_supply_val) = self.max_supply_opt {
                let new_supply = self
                    .supply_cnt
                    .checked_add(u128::from(amount_cnt))
                    .ok_or(Error::Overflow)?;
                if new_supply > max_supply_val {
                    return Err(Error::Overflow)
                }
            }

            for _ in 0..amount_cnt {
                let token_id = self.next_id;
                self.next_id = self.next_id.checked_add(1).ok_or(Error::Overflow)?;

                self.ledger.admit(token_id, caller_acc)?;
                self.supply_cnt = self.supply_cnt.checked_add(1).ok_or(Error::Overflow)?;
                self.env().emit_event(Minted { to_acc: caller_acc, token_id });
            }
            Ok(())
        }

        // -------- transfers / approvals --------

        /// Move `token_id` from `from_acc` to `to_acc`. The caller must be
        /// the owner, the token's delegate, or an operator of the owner;
        /// `from_acc` must name the actual current owner.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            token_id: TokenId,
        ) -> Result<()> {
            let caller_acc = self.env().caller();
            let registry_acc = self.env().account_id();
            TransferAuthorizer::authorize_transfer(
                &self.ledger,
                &self.approvals,
                caller_acc,
                to_acc,
                registry_acc,
                token_id,
            )?;
            self.ledger.transfer(token_id, from_acc, to_acc)?;

            self.env().emit_event(Transferred { from_acc, to_acc, token_id });
            Ok(())
        }

        /// Set (or clear, with the null account) the token's single
        /// delegate. Only the literal current owner may do this; the slot
        /// is not cleared when the token is later transferred.
        #[ink(message)]
        pub fn approve(&mut self, delegate_acc: AccountId, token_id: TokenId) -> Result<()> {
            let caller_acc = self.env().caller();
            let owner_acc =
                TransferAuthorizer::authorize_approval(&self.ledger, caller_acc, token_id)?;
            self.approvals.set_delegate(token_id, delegate_acc);

            self.env().emit_event(Approved { owner_acc, delegate_acc, token_id });
            Ok(())
        }

        /// Grant or revoke `operator_acc` over all of the caller's tokens.
        #[ink(message)]
        pub fn set_approval_for_all(
            &mut self,
            operator_acc: AccountId,
            approved_flag: bool,
        ) -> Result<()> {
            let owner_acc = self.env().caller();
            self.approvals.set_operator(owner_acc, operator_acc, approved_flag)?;

            self.env().emit_event(OperatorSet { owner_acc, operator_acc, approved_flag });
            Ok(())
        }

        // -------- queries --------

        /// Who owns this token?
        #[ink(message)]
        pub fn owner_of(&self, token_id: TokenId) -> Result<AccountId> {
            self.ledger.owner_of(token_id)
        }

        /// How many tokens does this account own?
        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Result<u32> {
            self.ledger.balance_of(owner_acc)
        }

        /// The token's current delegate, if one is set.
        #[ink(message)]
        pub fn get_approved(&self, token_id: TokenId) -> Result<AccountId> {
            self.ledger.owner_of(token_id)?;
            self.approvals.delegate_of(token_id)
        }

        #[ink(message)]
        pub fn is_approved_for_all(&self, owner_acc: AccountId, operator_acc: AccountId) -> bool {
            self.approvals.is_operator(owner_acc, operator_acc)
        }

        /// Paginated list of token ids owned by `owner_acc`.
        #[ink(message)]
        pub fn tokens_of(
            &self,
            owner_acc: AccountId,
            start_index: u32,
            limit_cnt: u32,
        ) -> Vec<TokenId> {
            self.ledger.tokens_of(owner_acc, start_index, limit_cnt)
        }

        #[ink(message)]
        pub fn total_supply(&self) -> u128 {
            self.supply_cnt
        }
    }


    #[cfg(all(test, feature = "e2e-tests"))]
    mod e2e_tests {
        use super::*;
        use ink_e2e::ContractsBackend;

        type E2EResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

        #[ink_e2e::test]
        async fn delegated_transfer_round_trip<Client: E2EBackend>(
            mut client: Client,
        ) -> E2EResult<()> {
            let alice_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Alice);
            let bob_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Bob);
            let charlie_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Charlie);

            let mut constructor = RegistryRef::new(None);
            let contract = client
                .instantiate("registry", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<Registry>();

            let set_minter = call_builder.set_minter(alice_acc, true);
            client.call(&ink_e2e::alice(), &set_minter).submit().await?;

            let mint = call_builder.mint_n(1);
            client.call(&ink_e2e::alice(), &mint).submit().await?;

            let approve = call_builder.approve(bob_acc, 0);
            client.call(&ink_e2e::alice(), &approve).submit().await?;

            let transfer = call_builder.transfer_from(alice_acc, charlie_acc, 0);
            let transfer_res = client
                .call(&ink_e2e::bob(), &transfer)
                .submit()
                .await?
                .return_value();
            assert_eq!(transfer_res, Ok(()));

            let owner_of = call_builder.owner_of(0);
            let owner_res = client
                .call(&ink_e2e::alice(), &owner_of)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(owner_res, Ok(charlie_acc));

            let balance_of = call_builder.balance_of(alice_acc);
            let balance_res = client
                .call(&ink_e2e::alice(), &balance_of)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(balance_res, Ok(0));

            Ok(())
        }
    }
}
