//! Local signers of the configured network accounts.

use crate::ChainResult;
use alloy_signer_local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};
use fund_me_config::ResolvedAccounts;

/// Builds the signers of `accounts`, in order.
///
/// Mnemonic accounts are derived at `m/44'/60'/0'/0/{index}`.
pub fn signers(accounts: &ResolvedAccounts) -> ChainResult<Vec<PrivateKeySigner>> {
    match accounts {
        ResolvedAccounts::Keys(keys) => {
            keys.iter().map(|key| Ok(key.trim().parse::<PrivateKeySigner>()?)).collect()
        }
        ResolvedAccounts::Mnemonic { phrase, count } => (0..*count)
            .map(|index| {
                Ok(MnemonicBuilder::<English>::default()
                    .phrase(phrase.as_str())
                    .index(index)?
                    .build()?)
            })
            .collect(),
    }
}
