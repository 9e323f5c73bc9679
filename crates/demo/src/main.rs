//! Demo application for `plain-http`.
//!
//! ```text
//! plain-http-demo [PORT] [--log-level LEVEL]
//! ```
//!
//! Serves an HTML form on every GET and echoes the posted body on POST. The process keeps
//! serving until it is killed; it exits with a failure code if the port can't be bound.

mod form;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::form::FormHandler;

#[derive(Debug, Parser)]
#[command(name = "plain-http-demo", version, about = "Serve a small HTML form over HTTP/1.0")]
struct Cli {
    /// TCP port to listen on
    #[arg(default_value_t = 8080)]
    port: u16,

    /// Maximum log level
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = cli.port, "starting demo server");
    match plain_http::server::start(cli.port, Arc::new(FormHandler)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "bind server error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_to_8080() {
        let cli = Cli::try_parse_from(["plain-http-demo"]).unwrap();
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.log_level, Level::INFO);
    }

    #[test]
    fn port_from_positional_argument() {
        let cli = Cli::try_parse_from(["plain-http-demo", "9090", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.port, 9090);
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn port_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["plain-http-demo", "70000"]).is_err());
    }
}
