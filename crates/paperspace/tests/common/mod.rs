//! Shared helpers for the end-to-end tests.
//!
//! The client is blocking, so every call runs on tokio's blocking pool
//! while the wiremock server keeps running on the async runtime.

#![allow(dead_code)]

use paperspace::Client;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

/// Build a client against the stub server. Must be called off the async runtime.
pub fn client_for(uri: &str) -> Client {
    Client::builder(API_KEY)
        .with_base_url(format!("{uri}/"))
        .build()
        .unwrap()
}

/// Run `f` with a client pointed at `server` on the blocking pool.
pub async fn with_client<F, T>(server: &MockServer, f: F) -> T
where
    F: FnOnce(&Client) -> T + Send + 'static,
    T: Send + 'static,
{
    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let client = client_for(&uri);
        f(&client)
    })
    .await
    .unwrap()
}
