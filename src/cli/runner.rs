//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, QueryArgs};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::query::CallShape;
use serde_json::Value;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        match &self.cli.command {
            Commands::Get { query, pages } => {
                let client = Client::new(config);
                self.fetch_pages(&client, |n| query.to_call(n), *pages).await
            }
            Commands::Search { query, pages } => {
                let client = Client::new(config);
                self.fetch_pages(&client, |_| CallShape::query(query.as_str()), *pages)
                    .await
            }
            Commands::Url { query, pages } => self.print_urls(config, query, *pages),
            Commands::Host => {
                println!("{}", Client::without_transport(config).host());
                Ok(())
            }
        }
    }

    /// Build the client configuration from the file and flag overrides
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(host) = &self.cli.host {
            config.host.clone_from(host);
        }
        if let Some(base) = &self.cli.endpoint_base {
            config.endpoint_base.clone_from(base);
        }
        if let Some(scheme) = &self.cli.scheme {
            config.scheme.clone_from(scheme);
        }
        config.validated()
    }

    /// Request the same query `pages` times, printing each page
    async fn fetch_pages(
        &self,
        client: &Client,
        call: impl Fn(usize) -> CallShape,
        pages: usize,
    ) -> Result<()> {
        for n in 0..pages {
            let dispatch = client.get(call(n));
            if let Some(url) = dispatch.url() {
                info!("Fetching {}", url);
            }
            let page = dispatch.await?;
            self.emit(&page);
        }
        Ok(())
    }

    /// Print the URLs `pages` successive requests would use
    fn print_urls(&self, config: ClientConfig, query: &QueryArgs, pages: usize) -> Result<()> {
        let client = Client::without_transport(config);
        for n in 0..pages {
            match client.get(query.to_call(n)) {
                crate::client::Dispatch::Pending(page) => println!("{}", page.url()),
                crate::client::Dispatch::Rejected(record) => return Err(record.into()),
            }
        }
        Ok(())
    }

    fn emit(&self, page: &Value) {
        let out = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(page),
            OutputFormat::Pretty => serde_json::to_string_pretty(page),
        };
        println!("{}", out.unwrap_or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "urturn",
            "--host",
            "localhost:9000",
            "--endpoint-base",
            "v3",
            "--scheme",
            "http",
            "host",
        ]);
        let config = Runner::new(cli).load_config().unwrap();

        assert_eq!(config.host, "localhost:9000");
        assert_eq!(config.endpoint_root(), "//localhost:9000/v3/");
        assert_eq!(config.scheme, "http");
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let cli = parse(&["urturn", "-C", "/nonexistent/urturn.yaml", "host"]);
        let err = Runner::new(cli).load_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_query_args_page_only_on_first_request() {
        let cli = parse(&[
            "urturn", "url", "--type", "expression", "--selector", "username", "--query",
            "bob", "--page", "3", "--per-page", "20", "--pages", "2",
        ]);
        let Commands::Url { query, pages } = cli.command else {
            panic!("expected url command");
        };
        assert_eq!(pages, 2);

        let client = Client::without_transport(ClientConfig::default());
        let first = client.get(query.to_call(0));
        let second = client.get(query.to_call(1));
        assert_eq!(
            first.url(),
            Some("//www.urturn.com/api/expressions.json?username=bob&page=3&per_page=20")
        );
        assert_eq!(
            second.url(),
            Some("//www.urturn.com/api/expressions.json?username=bob&page=4&per_page=20")
        );
    }

    #[test]
    fn test_print_urls_rejects_bad_query() {
        let cli = parse(&["urturn", "url", "--type", "comment", "--query", "x"]);
        let runner = Runner::new(cli);
        let Commands::Url { query, pages } = &runner.cli.command else {
            panic!("expected url command");
        };
        let err = runner
            .print_urls(ClientConfig::default(), query, *pages)
            .unwrap_err();
        assert_eq!(err.error_code(), crate::report::ErrorCode::UnknownQueryType);
    }
}
