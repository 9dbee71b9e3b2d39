use mock_server::{Credentials, Store, API_PREFIX};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let credentials = Credentials::new(
        &std::env::var("WUNDERLIST_CLIENT_ID").unwrap_or_else(|_| "demo-client".to_string()),
        &std::env::var("WUNDERLIST_ACCESS_TOKEN").unwrap_or_else(|_| "demo-token".to_string()),
    );

    let mut store = Store::new();
    let inbox = store.add_list("inbox");
    let groceries = store.add_list("Groceries");
    for title in ["Buy milk", "Bread", "Coffee beans"] {
        store.add_task(groceries.id, title);
    }
    store.add_task(inbox.id, "Call the plumber");

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        base_url = %format!("http://{addr}{API_PREFIX}"),
        inbox = inbox.id,
        groceries = groceries.id,
        "mock task API listening"
    );
    mock_server::run(listener, credentials, store).await
}
