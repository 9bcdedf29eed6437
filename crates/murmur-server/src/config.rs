use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let db_path = std::env::var("MURMUR_DB_PATH").unwrap_or_else(|_| "murmur.db".into());
        let host = std::env::var("MURMUR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("MURMUR_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("MURMUR_PORT must be a port number")?;

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("invalid listen address {}", addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_host_and_port() {
        let config = Config {
            db_path: "murmur.db".into(),
            host: "127.0.0.1".into(),
            port: 8080,
        };
        assert_eq!(config.addr().unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bad_host_is_rejected() {
        let config = Config {
            db_path: "murmur.db".into(),
            host: "not a host".into(),
            port: 8080,
        };
        assert!(config.addr().is_err());
    }
}
