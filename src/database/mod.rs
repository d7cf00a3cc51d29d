pub mod models;

use mongodb::{options::ClientOptions, Client, Database};

use crate::config::DatabaseConfig;

/// Open a handle to the document database. The driver owns the connection
/// pool and connects lazily on first operation.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;
    Ok(client.database(&config.database))
}
