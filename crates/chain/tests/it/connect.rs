use crate::init_tracing;
use fund_me_chain::connect;
use fund_me_config::{Config, LOCAL_CHAIN_ID, NetworkConfig, RpcEndpointUrl};

#[tokio::test(flavor = "multi_thread")]
async fn connects_in_process_network() {
    init_tracing();
    let config = Config::default();
    let chain = connect(&config, "hardhat").await.unwrap();
    assert_eq!(chain.chain_id(), LOCAL_CHAIN_ID);
    assert!(chain.is_ephemeral());
    assert_eq!(chain.accounts().len(), 10);
    assert_eq!(chain.block_number().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn in_process_network_uses_configured_chain_id() {
    init_tracing();
    let mut config = Config::default();
    config.networks.insert("dev".to_string(), NetworkConfig { chain_id: Some(1337), ..NetworkConfig::hardhat() });
    let chain = connect(&config, "dev").await.unwrap();
    assert_eq!(chain.chain_id(), 1337);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_network() {
    init_tracing();
    let err = connect(&Config::default(), "mainnet").await.unwrap_err();
    assert!(err.to_string().contains("mainnet"), "{err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_rpc_url() {
    init_tracing();
    let mut config = Config::default();
    config.networks.insert(
        "broken".to_string(),
        NetworkConfig { url: Some(RpcEndpointUrl::Url("not a url".to_string())), ..NetworkConfig::hardhat() },
    );
    let err = connect(&config, "broken").await.unwrap_err();
    assert!(err.to_string().contains("invalid rpc url"), "{err}");
}
