use crate::scenarios::{Setup, setup};
use alloy_primitives::{Address, Bytes, U256};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use fund_me_chain::{Chain, ChainResult, ContractArtifact, Devnet, TxReceipt};
use fund_me_common::abi::FundMe;
use fund_me_harness::{ScenarioRunner, TestOutcome, suites};
use std::{collections::BTreeSet, sync::Arc};

/// How the `FundMe` of [`FaultyFundMe`] gets `withdraw` wrong.
#[derive(Clone, Copy, Debug)]
enum Fault {
    /// Anyone can withdraw, the funds still go to the owner.
    AnyoneWithdraws,
    /// Withdrawing succeeds but neither the balance nor the funders are reset.
    KeepsFunds,
}

/// A devnet whose `FundMe` contract misbehaves on `withdraw`.
#[derive(Debug)]
struct FaultyFundMe {
    devnet: Devnet,
    owner: Address,
    fault: Fault,
}

fn is_withdraw(tx: &TransactionRequest) -> bool {
    tx.input.input().is_some_and(|input| input.starts_with(&FundMe::withdrawCall::SELECTOR))
}

#[async_trait]
impl Chain for FaultyFundMe {
    fn chain_id(&self) -> u64 {
        self.devnet.chain_id()
    }

    fn accounts(&self) -> &[Address] {
        self.devnet.accounts()
    }

    fn is_ephemeral(&self) -> bool {
        true
    }

    async fn block_number(&self) -> ChainResult<u64> {
        self.devnet.block_number().await
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        self.devnet.balance(address).await
    }

    async fn has_code(&self, address: Address) -> ChainResult<bool> {
        self.devnet.has_code(address).await
    }

    async fn call(&self, tx: TransactionRequest) -> ChainResult<Bytes> {
        self.devnet.call(tx).await
    }

    async fn send(&self, mut tx: TransactionRequest, confirmations: u64) -> ChainResult<TxReceipt> {
        if is_withdraw(&tx) {
            match self.fault {
                Fault::AnyoneWithdraws => tx.from = Some(self.owner),
                Fault::KeepsFunds => {
                    let from = tx.from.unwrap_or(self.owner);
                    tx = TransactionRequest::default().from(from).to(from);
                }
            }
        }
        self.devnet.send(tx, confirmations).await
    }

    async fn deploy(
        &self,
        from: Address,
        artifact: &ContractArtifact,
        args: Bytes,
        confirmations: u64,
    ) -> ChainResult<TxReceipt> {
        self.devnet.deploy(from, artifact, args, confirmations).await
    }

    async fn snapshot(&self) -> ChainResult<U256> {
        self.devnet.snapshot().await
    }

    async fn revert_to(&self, id: U256) -> ChainResult<bool> {
        self.devnet.revert_to(id).await
    }
}

async fn run_with(fault: Fault) -> TestOutcome {
    let Setup { devnet, config, deployments, .. } = setup("hardhat", &["all"]).await;
    let owner = devnet.accounts()[0];
    let chain = Arc::new(FaultyFundMe { devnet, owner, fault });
    ScenarioRunner::new(chain, &config, &deployments).run(suites::ALL).await.unwrap()
}

fn failed_cases(outcome: &TestOutcome) -> BTreeSet<&str> {
    outcome.failures().map(|(name, _)| name.as_str()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn catches_missing_owner_check() {
    let outcome = run_with(Fault::AnyoneWithdraws).await;
    assert!(!outcome.is_ok());
    assert_eq!(failed_cases(&outcome), BTreeSet::from(["Only allows the owner to withdraw"]));

    let result = &outcome.results["FundMe withdraw"].test_results["Only allows the owner to withdraw"];
    assert_eq!(result.reason.as_deref(), Some("call did not revert as expected"));
    assert_eq!(outcome.successes().count(), 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn catches_funds_left_behind() {
    let outcome = run_with(Fault::KeepsFunds).await;
    assert_eq!(
        failed_cases(&outcome),
        BTreeSet::from([
            "Only allows the owner to withdraw",
            "is allows us to withdraw with multiple funders",
            "withdraws ETH from a single funder",
        ])
    );

    let withdraw = &outcome.results["FundMe withdraw"].test_results;
    let reason = withdraw["withdraws ETH from a single funder"].reason.as_deref().unwrap();
    assert!(reason.starts_with("assertion failed: "), "{reason}");
    // the fund suite doesn't withdraw
    assert_eq!(outcome.results["FundMe fund"].failures().count(), 0);
}
