//! App Configuration

use std::path::PathBuf;

use clap::Args;

/// Connection settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Backend base URL.
    #[arg(long, env = "SPHERE_API_URL", default_value = "http://localhost:3000/api")]
    pub api_url: String,

    /// Where the session blob is persisted between invocations.
    #[arg(long, env = "SPHERE_SESSION_FILE", default_value = ".sphere/session.json")]
    pub session_file: PathBuf,

    /// Where the local cart is persisted between invocations.
    #[arg(long, env = "SPHERE_CART_FILE", default_value = ".sphere/cart.json")]
    pub cart_file: PathBuf,
}
