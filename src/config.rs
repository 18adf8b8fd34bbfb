use std::env;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "SCHEDULE_EVALUATOR_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Runtime settings for the HTTP server. Log filtering goes through `RUST_LOG`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_addr(env::var(ADDR_VAR).ok().as_deref())
    }

    fn from_addr(addr: Option<&str>) -> Result<Self, String> {
        let raw = addr.unwrap_or(DEFAULT_ADDR);
        let addr = raw
            .parse()
            .map_err(|e| format!("{ADDR_VAR}='{raw}' is not a valid socket address: {e}"))?;
        Ok(Config { addr })
    }
}
