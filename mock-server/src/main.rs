//! Standalone mock API for local development: point a client's endpoint at
//! `http://127.0.0.1:<port>/api/` and exercise it without real credentials.

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("MOCK_API_PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock Central API at http://{addr}/api/");
    mock_server::run(listener).await
}
