#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use workforce_tool::{http_api, seed};

    let addr: SocketAddr = std::env::var("WORKFORCE_TOOL_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:4000".to_string())
        .parse()?;

    let workforce = seed::seed_workforce(chrono::Utc::now().date_naive());
    println!("workforce-tool HTTP API listening on http://{addr}");
    http_api::serve(addr, workforce).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
