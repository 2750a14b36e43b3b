//! Shared setup for the integration tests: a fixture server on a random port
//! and client services pointed at it.

#![allow(dead_code)]

use std::net::SocketAddr;

use placeholder_core::{ApiClient, ClientConfig, Services};

/// Start the fixture server on `127.0.0.1:0` and return its address.
pub async fn spawn_fixture() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        fixture_server::run(listener).await.unwrap();
    });
    addr
}

pub fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig::with_base_url(&format!("http://{addr}"))
}

/// Services over the default transport stack (reqwest + logging).
pub async fn services() -> Services {
    let addr = spawn_fixture().await;
    Services::new(ApiClient::from_config(&config_for(addr)).unwrap())
}
