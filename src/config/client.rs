use rama::http::Uri;

/// Load dispatch configuration.
/// Models how many requests are sent and how fast they are launched.
#[derive(Debug, Clone, clap::Args)]
pub struct RunConfig {
    /// Target URL the POST probes are sent to.
    #[arg(long, value_name = "URL", default_value = "http://localhost:8080")]
    pub url: Uri,

    /// Total number of requests to send.
    #[arg(long, value_name = "N", default_value_t = 1000)]
    pub amount: u64,

    /// Number of requests launched before each one second pacing pause.
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub per_second: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, clap::Parser)]
    struct TestCli {
        #[clap(flatten)]
        config: RunConfig,
    }

    #[test]
    fn defaults_match_the_documented_invocation_parameters() {
        let cli = TestCli::try_parse_from(["postbench"]).expect("parse without flags");

        assert_eq!(Uri::from_static("http://localhost:8080"), cli.config.url);
        assert_eq!(1000, cli.config.amount);
        assert_eq!(10, cli.config.per_second);
    }

    #[test]
    fn flags_overwrite_the_defaults() {
        let cli = TestCli::try_parse_from([
            "postbench",
            "--url",
            "http://127.0.0.1:9999/ingest",
            "--amount",
            "25",
            "--per-second",
            "5",
        ])
        .expect("parse with flags");

        assert_eq!(
            Uri::from_static("http://127.0.0.1:9999/ingest"),
            cli.config.url
        );
        assert_eq!(25, cli.config.amount);
        assert_eq!(5, cli.config.per_second);
    }

    #[test]
    fn invalid_url_is_rejected_at_parse_time() {
        assert!(TestCli::try_parse_from(["postbench", "--url", "not a uri"]).is_err());
    }
}
