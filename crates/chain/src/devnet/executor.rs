//! Message calls and contract creation against [`ChainState`].

use super::{
    contracts::{NativeContract, NativeKind},
    gas::{self, Gas},
    state::ChainState,
};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

/// Result of a message call: the return data, or the revert data if the call was rejected.
pub type CallResult = Result<Bytes, Bytes>;

/// Result of executing a transaction.
#[derive(Debug)]
pub struct Outcome<T> {
    pub result: Result<T, Bytes>,
    pub gas_used: u64,
}

/// The execution context of a native contract.
pub struct Frame<'a> {
    state: &'a mut ChainState,
    gas: &'a mut Gas,
    /// The address of the executing contract
    pub address: Address,
    /// `msg.sender`
    pub caller: Address,
    /// `msg.value`
    pub value: U256,
}

impl Frame<'_> {
    pub fn charge(&mut self, cost: u64) {
        self.gas.record(cost);
    }

    /// Charges a storage read.
    pub fn sload(&mut self) {
        self.charge(gas::COLD_SLOAD);
    }

    /// Charges a storage write of a slot that held `was_zero`.
    pub fn sstore(&mut self, was_zero: bool) {
        self.charge(if was_zero { gas::SSTORE_SET } else { gas::SSTORE_RESET });
    }

    /// `block.timestamp`
    pub fn timestamp(&self) -> u64 {
        self.state.timestamp
    }

    /// `address(this).balance`
    pub fn self_balance(&self) -> U256 {
        self.state.balance(self.address)
    }

    /// `to.call{value}(data)`
    pub fn call(&mut self, to: Address, data: &[u8], value: U256) -> CallResult {
        self.charge(gas::COLD_ACCOUNT_ACCESS);
        if !value.is_zero() {
            self.charge(gas::CALL_VALUE);
        }
        call(self.state, self.gas, self.address, to, value, data)
    }

    /// Calls a view function of another contract and decodes its return value.
    pub fn static_call<C: SolCall>(&mut self, to: Address, call: &C) -> Result<C::Return, Bytes> {
        let data = self.call(to, &call.abi_encode(), U256::ZERO)?;
        // calling an account without code returns nothing, which fails to decode like in solidity
        C::abi_decode_returns(&data).map_err(|_| Bytes::new())
    }
}

/// Executes a message call from `caller` to `to`, transferring `value`.
///
/// State changes of a rejected call are rolled back.
pub fn call(
    state: &mut ChainState,
    gas: &mut Gas,
    caller: Address,
    to: Address,
    value: U256,
    data: &[u8],
) -> CallResult {
    let checkpoint = state.clone();
    let result = call_inner(state, gas, caller, to, value, data);
    if result.is_err() {
        *state = checkpoint;
    }
    result
}

fn call_inner(
    state: &mut ChainState,
    gas: &mut Gas,
    caller: Address,
    to: Address,
    value: U256,
    data: &[u8],
) -> CallResult {
    if !value.is_zero() {
        let from = state.account_mut(caller);
        if from.balance < value {
            return Err(Bytes::new());
        }
        from.balance -= value;
        state.account_mut(to).balance += value;
    }

    // the callee is taken out of the state while it runs, calls back into it see no code
    let Some(mut contract) = state.contracts.remove(&to) else { return Ok(Bytes::new()) };
    let result = {
        let mut frame = Frame { state: &mut *state, gas: &mut *gas, address: to, caller, value };
        contract.call(&mut frame, data)
    };
    state.contracts.insert(to, contract);
    result
}

/// Executes a transaction calling `to`.
pub fn transact(
    state: &mut ChainState,
    caller: Address,
    to: Address,
    value: U256,
    input: &[u8],
) -> Outcome<Bytes> {
    let mut gas = Gas::new(gas::intrinsic_gas(input, false));
    let result = call(state, &mut gas, caller, to, value, input);
    Outcome { result, gas_used: gas.used() }
}

/// Executes a transaction creating the native contract `kind` with the ABI encoded constructor
/// `args`, at the address derived from the sender's nonce.
pub fn create(
    state: &mut ChainState,
    caller: Address,
    kind: NativeKind,
    args: &[u8],
) -> Outcome<Address> {
    let mut gas = Gas::new(gas::intrinsic_gas(args, true));
    let address = caller.create(state.nonce(caller));
    let result = {
        let mut frame =
            Frame { state: &mut *state, gas: &mut gas, address, caller, value: U256::ZERO };
        kind.construct(&mut frame, args)
    };
    let result = result.map(|contract: NativeContract| {
        gas.record(gas::CODE_DEPOSIT_PER_BYTE * kind.code_size() as u64);
        state.contracts.insert(address, contract);
        address
    });
    Outcome { result, gas_used: gas.used() }
}
