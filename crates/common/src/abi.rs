//! Solidity bindings of the contracts the harness deploys and drives.

use alloy_sol_types::sol;

sol! {
    /// Crowdfunding contract: contributors fund it in ETH worth at least `MINIMUM_USD`, the owner
    /// withdraws the pool.
    #[derive(Debug, PartialEq, Eq)]
    contract FundMe {
        error FundMe__NotOwner();

        constructor(address priceFeed);

        function MINIMUM_USD() external view returns (uint256);

        function fund() external payable;
        function withdraw() external;
        function cheaperWithdraw() external;

        function getAddressToAmountFunded(address fundingAddress) external view returns (uint256);
        function getVersion() external view returns (uint256);
        function getFunder(uint256 index) external view returns (address);
        function getOwner() external view returns (address);
        function getPriceFeed() external view returns (address);
    }

    /// Chainlink `AggregatorV3Interface` mock with a settable answer.
    #[derive(Debug, PartialEq, Eq)]
    contract MockV3Aggregator {
        constructor(uint8 _decimals, int256 _initialAnswer);

        function decimals() external view returns (uint8);
        function description() external view returns (string memory);
        function version() external view returns (uint256);

        function latestAnswer() external view returns (int256);
        function latestRound() external view returns (uint256);
        function latestTimestamp() external view returns (uint256);
        function latestRoundData()
            external
            view
            returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound);

        function updateAnswer(int256 _answer) external;
    }
}

/// Names of the deployable contracts.
pub mod names {
    pub const FUND_ME: &str = "FundMe";
    pub const MOCK_V3_AGGREGATOR: &str = "MockV3Aggregator";
}
