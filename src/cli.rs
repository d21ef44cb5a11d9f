use crate::remote::DEFAULT_CLONE_TIMEOUT_SECS;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "repo-sentry",
    version,
    about = "HTTP service that scans public GitHub repositories for leaked secrets and dangerous code"
)]
pub struct Cli {
    /// Address to bind the HTTP listener on
    #[arg(long, default_value = "0.0.0.0", env = "REPO_SENTRY_HOST")]
    pub host: String,

    /// Port to bind the HTTP listener on
    #[arg(long, default_value_t = 8080, env = "REPO_SENTRY_PORT")]
    pub port: u16,

    /// Wall-clock limit for a single git clone, in seconds
    #[arg(long, default_value_t = DEFAULT_CLONE_TIMEOUT_SECS, env = "REPO_SENTRY_CLONE_TIMEOUT")]
    pub clone_timeout: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["repo-sentry"]).unwrap();
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.clone_timeout, DEFAULT_CLONE_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "repo-sentry",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
            "--clone-timeout",
            "60",
        ])
        .unwrap();
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 3000);
        assert_eq!(cli.clone_timeout, 60);
    }
}
