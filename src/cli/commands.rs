//! CLI commands and argument parsing

use crate::query::{
    CallShape, KEY_ID, KEY_PAGE, KEY_PER_PAGE, KEY_QUERY, KEY_QUERY_SELECTOR, KEY_QUERY_TYPE,
};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

/// urturn API client CLI
#[derive(Parser, Debug)]
#[command(name = "urturn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Override the API path prefix
    #[arg(long, global = true)]
    pub endpoint_base: Option<String>,

    /// Scheme for request URLs (http or https)
    #[arg(long, global = true)]
    pub scheme: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch successive pages of a query
    Get {
        #[command(flatten)]
        query: QueryArgs,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Free-text search over posts
    Search {
        /// Search term
        query: String,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Print the URLs a query would request, without sending anything
    Url {
        #[command(flatten)]
        query: QueryArgs,

        /// Number of pages to list
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Show the configured API host
    Host,
}

/// Query description shared by `get` and `url`
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Resource to query (post, expression)
    #[arg(long = "type", default_value = "post")]
    pub query_type: String,

    /// Selector (id, username, expression, query, expressionCreator)
    #[arg(long, default_value = "query")]
    pub selector: String,

    /// Query term
    #[arg(long)]
    pub query: String,

    /// Scope the query to an id
    #[arg(long)]
    pub id: Option<f64>,

    /// Start at this page
    #[arg(long)]
    pub page: Option<f64>,

    /// Page size
    #[arg(long)]
    pub per_page: Option<f64>,
}

impl QueryArgs {
    /// Options record for the `n`th request; the page jump only applies to the first
    pub fn to_call(&self, n: usize) -> CallShape {
        let mut options = json!({
            KEY_QUERY_TYPE: self.query_type,
            KEY_QUERY_SELECTOR: self.selector,
            KEY_QUERY: self.query,
        });
        if let Value::Object(map) = &mut options {
            if let Some(id) = self.id {
                map.insert(KEY_ID.to_string(), json!(id));
            }
            if let (0, Some(page)) = (n, self.page) {
                map.insert(KEY_PAGE.to_string(), json!(page));
            }
            if let Some(per_page) = self.per_page {
                map.insert(KEY_PER_PAGE.to_string(), json!(per_page));
            }
        }
        CallShape::options(options)
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Pretty-printed JSON
    Pretty,
}
