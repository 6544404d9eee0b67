//! Serve command handler

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use postboard_core::{Config, Store};

/// Bootstrap the board and run the HTTP API until shutdown.
///
/// A board that cannot be loaded or created is fatal.
pub async fn run(config: &Config, in_memory: bool) -> Result<()> {
    let store = if in_memory {
        Store::in_memory()
    } else {
        Store::open(config)
    };

    match store.load() {
        Ok(doc) => info!(
            posts = doc.posts.len(),
            last_id = doc.last_id,
            "Board initialized"
        ),
        Err(e) => {
            error!(error = %e, "Failed to initialize board");
            if let Some(hint) = e.recovery_suggestion() {
                error!("{}", hint);
            }
            return Err(e).context("Failed to initialize board");
        }
    }

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    postboard_server::serve(listener, Arc::new(store))
        .await
        .context("Server error")
}
