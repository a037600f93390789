//! In-memory chain state and its snapshots.

use super::contracts::NativeContract;
use alloy_primitives::{Address, U256};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub balance: U256,
    pub nonce: u64,
}

/// Accounts, contracts and the head block of the devnet.
#[derive(Clone, Debug, Default)]
pub struct ChainState {
    pub accounts: HashMap<Address, Account>,
    pub contracts: HashMap<Address, NativeContract>,
    pub block_number: u64,
    pub timestamp: u64,
}

impl ChainState {
    pub fn account_mut(&mut self, address: Address) -> &mut Account {
        self.accounts.entry(address).or_default()
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.accounts.get(&address).map(|acc| acc.balance).unwrap_or_default()
    }

    pub fn nonce(&self, address: Address) -> u64 {
        self.accounts.get(&address).map(|acc| acc.nonce).unwrap_or_default()
    }

    pub fn has_code(&self, address: Address) -> bool {
        self.contracts.contains_key(&address)
    }

    /// Mines a new block on top of the head.
    pub fn mine(&mut self, now: u64) {
        self.block_number += 1;
        self.timestamp = now.max(self.timestamp + 1);
    }
}

/// Saved copies of the chain state, keyed by id.
///
/// Reverting to a snapshot consumes it together with every snapshot taken after it.
#[derive(Debug, Default)]
pub struct Snapshots {
    last_id: U256,
    states: BTreeMap<U256, ChainState>,
}

impl Snapshots {
    pub fn insert(&mut self, state: ChainState) -> U256 {
        self.last_id += U256::from(1);
        self.states.insert(self.last_id, state);
        self.last_id
    }

    pub fn remove(&mut self, id: U256) -> Option<ChainState> {
        let state = self.states.remove(&id)?;
        let later = self.states.split_off(&id);
        trace!(target: "devnet::memdb", %id, discarded = later.len(), "removed snapshot");
        Some(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_discards_later_snapshots() {
        let mut snapshots = Snapshots::default();
        let mut state = ChainState::default();
        let first = snapshots.insert(state.clone());
        state.mine(1);
        let second = snapshots.insert(state.clone());
        assert_eq!((first, second), (U256::from(1), U256::from(2)));

        let reverted = snapshots.remove(first).unwrap();
        assert_eq!(reverted.block_number, 0);
        assert!(snapshots.is_empty());
        assert!(snapshots.remove(second).is_none());

        // ids are never reused
        assert_eq!(snapshots.insert(state), U256::from(3));
    }

    #[test]
    fn mining_advances_time() {
        let mut state = ChainState { timestamp: 100, ..Default::default() };
        state.mine(50);
        assert_eq!((state.block_number, state.timestamp), (1, 101));
        state.mine(200);
        assert_eq!((state.block_number, state.timestamp), (2, 200));
    }
}
