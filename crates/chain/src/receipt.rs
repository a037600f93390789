use alloy_primitives::{Address, TxHash, U256, utils::format_units};
use alloy_rpc_types_eth::TransactionReceipt;
use serde::Serialize;

/// The parts of a mined transaction's receipt the harness looks at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub from: Address,
    pub to: Option<Address>,
    pub contract_address: Option<Address>,
    pub block_number: u64,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub status: bool,
}

impl TxReceipt {
    /// Total fee paid by the sender: `gas_used * effective_gas_price`.
    pub fn gas_cost(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}

impl From<TransactionReceipt> for TxReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            from: receipt.from,
            to: receipt.to,
            contract_address: receipt.contract_address,
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used: receipt.gas_used,
            effective_gas_price: receipt.effective_gas_price,
            status: receipt.status(),
        }
    }
}

/// Formats parts of the receipt for user output
pub fn format_receipt(chain_id: u64, receipt: &TxReceipt) -> String {
    let gas_used = receipt.gas_used;
    let gas_price = receipt.effective_gas_price;
    format!(
        "\n##### {chain_id}\n{status} Hash: {tx_hash:?}{contract_address}\nBlock: {block_number}\n{gas}\n\n",
        status = if receipt.status { "✅  [Success]" } else { "❌  [Failed]" },
        tx_hash = receipt.transaction_hash,
        contract_address = if let Some(addr) = &receipt.contract_address {
            format!("\nContract Address: {}", addr.to_checksum(None))
        } else {
            String::new()
        },
        block_number = receipt.block_number,
        gas = if gas_price == 0 {
            format!("Gas Used: {gas_used}")
        } else {
            let paid = format_units(receipt.gas_cost(), 18).unwrap_or_else(|_| "N/A".into());
            let gas_price = format_units(U256::from(gas_price), 9).unwrap_or_else(|_| "N/A".into());
            format!(
                "Paid: {} ETH ({gas_used} gas * {} gwei)",
                paid.trim_end_matches('0'),
                gas_price.trim_end_matches('0').trim_end_matches('.')
            )
        },
    )
}
