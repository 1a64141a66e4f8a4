use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::Parser;

pub const SAMPLE_ROUTES_PATH: &str = "backend/data/sample_routes.json";

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Serve normalized shipping routes, route metrics and highlight state"
)]
pub struct Args {
    /// Route payload JSON file loaded at startup
    #[arg(long, env = "ROUTES_JSON", default_value = SAMPLE_ROUTES_PATH)]
    pub routes: PathBuf,

    /// Fetch the route payload from this URL instead of the file
    #[arg(long, env = "ROUTES_URL")]
    pub routes_url: Option<String>,

    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Timeout for fetching `--routes-url`, in seconds
    #[arg(long, env = "ROUTES_FETCH_TIMEOUT", default_value_t = 10)]
    pub fetch_timeout_secs: u64,
}

impl Args {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_sample_routes() {
        let args = Args::try_parse_from(["backend"]).expect("defaults");
        assert_eq!(args.routes, PathBuf::from(SAMPLE_ROUTES_PATH));
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.fetch_timeout(), Duration::from_secs(10));
        assert!(args.routes_url.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "backend",
            "--routes",
            "/tmp/routes.json",
            "--routes-url",
            "http://localhost:5000/api/rtz/routes",
            "--bind",
            "127.0.0.1:9000",
            "--fetch-timeout-secs",
            "3",
        ])
        .expect("flags");
        assert_eq!(args.routes, PathBuf::from("/tmp/routes.json"));
        assert_eq!(args.routes_url.as_deref(), Some("http://localhost:5000/api/rtz/routes"));
        assert_eq!(args.bind.port(), 9000);
        assert_eq!(args.fetch_timeout_secs, 3);
    }
}
