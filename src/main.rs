//! Site CMS Backend - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    if let Err(e) = site_cms_backend::run().await {
        tracing::error!(error = %e, "Server stopped");
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
