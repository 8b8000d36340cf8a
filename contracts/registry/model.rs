use ink::primitives::AccountId;

pub type TokenId = u128;
pub type Result<T> = core::result::Result<T, Error>;

#[derive(scale::Encode, scale::Decode, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    AmountZero,
    Overflow,
    TokenMissing,
    TokenExists,
    NoApproval,
    InvalidOwner,
    InvalidOperator,
    InvalidRecipient,
    Unauthorized,
    OwnerMismatch,
    SelfApproval,
    NotAdmin,
}

/// The null identity is invalid as an owner, recipient, or operator target.
pub fn is_null_account(acc: AccountId) -> bool {
    acc == AccountId::from([0x0; 32])
}

#[ink::event]
pub struct Minted {
    #[ink(topic)]
    pub(crate) to_acc: AccountId,
    #[ink(topic)]
    pub(crate) token_id: TokenId,
}

#[ink::event]
pub struct Transferred {
    #[ink(topic)]
    pub(crate) from_acc: AccountId,
    #[ink(topic)]
    pub(crate) to_acc: AccountId,
    #[ink(topic)]
    pub(crate) token_id: TokenId,
}

#[ink::event]
pub struct Approved {
    #[ink(topic)]
    pub(crate) owner_acc: AccountId,
    #[ink(topic)]
    pub(crate) delegate_acc: AccountId,
    #[ink(topic)]
    pub(crate) token_id: TokenId,
}

#[ink::event]
pub struct OperatorSet {
    #[ink(topic)]
    pub(crate) owner_acc: AccountId,
    #[ink(topic)]
    pub(crate) operator_acc: AccountId,
    pub(crate) approved_flag: bool,
}

#[ink::event]
pub struct MinterSet {
    #[ink(topic)]
    pub(crate) minter_acc: AccountId,
    pub(crate) enabled_flag: bool,
}
