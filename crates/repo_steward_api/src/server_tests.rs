use super::*;
use crate::test_support::state;

#[test]
fn test_address_from_config() {
    let (state, _) = state(None);
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
    };

    let server = ApiServer::new(config, state);

    assert_eq!(server.address().unwrap(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
}

#[test]
fn test_invalid_host_is_rejected() {
    let (state, _) = state(None);
    let config = ServerConfig {
        host: "not-an-ip".to_string(),
        port: 3000,
    };

    let server = ApiServer::new(config, state);

    assert!(server.address().is_err());
}

#[tokio::test]
async fn test_wait_for_shutdown_completes_after_signal() {
    let (tx, rx) = watch::channel(false);
    let waiter = tokio::spawn(wait_for_shutdown(rx));

    tx.send(true).unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(5), waiter)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_wait_for_shutdown_completes_when_sender_dropped() {
    let (tx, rx) = watch::channel(false);
    drop(tx);

    tokio::time::timeout(std::time::Duration::from_secs(5), wait_for_shutdown(rx))
        .await
        .unwrap();
}
