//! In-process HTTP server for exercising the API clients.

use axum::Router;

use super::ApiClient;
use crate::config::HttpTimeouts;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn client() -> ApiClient {
    ApiClient::new(HttpTimeouts { request_secs: 5, connect_secs: 2 }).unwrap()
}
