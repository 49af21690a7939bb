use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;

use crate::password::DEFAULT_COST;

/// Runtime settings, read from flags or the environment (a `.env` file is
/// loaded first when present).
#[derive(Parser, Debug, Clone)]
#[command(name = "easybook-api", about = "Movie, theater, show and event booking API")]
pub struct Config {
    /// MongoDB connection string
    #[arg(
        long,
        env = "MONGODB_URI",
        hide_env_values = true,
        required_unless_present = "in_memory"
    )]
    pub mongodb_uri: Option<String>,

    /// Keep all data in process instead of MongoDB; nothing survives a restart
    #[arg(long, env = "IN_MEMORY_STORE", default_value_t = false)]
    pub in_memory: bool,

    #[arg(long, env = "DATABASE_NAME", default_value = "Easy_Book_App")]
    pub database: String,

    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "SERVER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Allowed CORS origin; any origin when unset
    #[arg(long, env = "APP_URL")]
    pub app_url: Option<String>,

    /// Directory holding the single-page app (`index.html` and assets)
    #[arg(long, env = "STATIC_DIR", default_value = "templates")]
    pub static_dir: PathBuf,

    /// bcrypt work factor
    #[arg(
        long,
        env = "BCRYPT_COST",
        default_value_t = DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub bcrypt_cost: u32,

    /// Answer failed logins with 401 instead of 201
    #[arg(long, env = "STRICT_LOGIN_STATUS", default_value_t = false)]
    pub strict_login_status: bool,
}

impl Config {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn allowed_origin(&self) -> anyhow::Result<Option<HeaderValue>> {
        self.app_url
            .as_deref()
            .map(|url| url.parse::<HeaderValue>().context("APP_URL is not a valid origin"))
            .transpose()
    }
}
