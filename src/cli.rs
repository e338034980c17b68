//! Drives the command-line program.

use crate::conf;
use crate::draft::{self, Drafter, Providers};
use crate::http::HTTPClientFactory;
use crate::reference;
use crate::text::rule;
use crate::view::{Briefing, SEPARATOR_WIDTH, ViewOptions, Viewable};
use crate::x::{Lookup, Post, PostFetcher};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use indoc::indoc;
use log::error;
use std::path::Path;
use std::process;

const FETCH_USAGE: &str = indoc! {"
    Please provide a post URL or ID.

    Usage:
      xdraft fetch <url>     Fetch post by URL
      xdraft fetch <id>      Fetch post by numeric ID
      xdraft fetch --id <id> Fetch post by ID

    Options:
      --json                 Show raw JSON output"};

const FETCH_EXAMPLES: &str = indoc! {"
    Invalid input. Please provide a post URL or numeric ID.

    Examples:
      xdraft fetch https://x.com/user/status/123456789
      xdraft fetch 123456789
      xdraft fetch --id 123456789"};

/// Prints `message` to standard error and exits with `error_code`.
pub fn die(error_code: i32, message: &str) -> ! {
    eprintln!("{message}");
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(
    about = "Drafts posts for X in several styles using several AI models",
    long_about = None
)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Command,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate post drafts for a given topic
    Draft {
        /// The topic or idea for the post
        topic: String,

        /// Comma-separated list of models to use (claude, gemini)
        #[arg(short, long)]
        models: Option<String>,

        /// Comma-separated list of styles to use (direct, engaging,
        /// conversational, controversial, story)
        #[arg(short, long)]
        styles: Option<String>,

        /// Print drafts without colors or line wrapping
        #[arg(long, default_value_t = false)]
        raw: bool,
    },

    /// Fetch a post by URL or ID
    Fetch {
        /// Post URL or post ID
        url_or_id: Option<String>,

        /// Fetch a specific post by ID
        #[arg(long)]
        id: Option<String>,

        /// Show raw JSON output
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Print the post without colors or line wrapping
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
}

/// Runs the command-line program with the given `config`.
pub async fn run(config: Config) {
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();
    conf::load_env_file();

    Runner::new(config).run().await
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    factory: HTTPClientFactory,
}

impl Runner {
    /// Create a new program runner using the given `config`.
    pub fn new(config: Config) -> Self {
        let factory = HTTPClientFactory::new(conf::request_timeout());
        Self { config, factory }
    }

    /// Run the command-line program using its stored configuration options.
    pub async fn run(&self) {
        match &self.config.command {
            Command::Draft {
                topic,
                models,
                styles,
                raw,
            } => {
                let opts = view_options(*raw);
                self.run_draft(topic, models.as_deref(), styles.as_deref(), &opts)
                    .await
            }
            Command::Fetch {
                url_or_id,
                id,
                json,
                raw,
            } => {
                let opts = view_options(*raw);
                self.run_fetch(url_or_id.as_deref(), id.as_deref(), *json, &opts)
                    .await
            }
        }
    }

    async fn run_draft(
        &self,
        topic: &str,
        models: Option<&str>,
        styles: Option<&str>,
        opts: &ViewOptions,
    ) {
        if topic.trim().is_empty() {
            die(1, "Error: Topic is required");
        }

        let models = draft::resolve_models(models);
        let styles = draft::resolve_styles(styles);
        let voice = load_reference(&conf::voice_dir());
        let patterns = load_reference(&conf::patterns_dir());

        let separator = rule('=', SEPARATOR_WIDTH);
        let briefing = Briefing::new(topic, &models, &styles, voice.len(), patterns.len());
        println!("\n{}", briefing.view(opts));
        println!("\n{separator}\n");

        let drafter = Drafter::new(Providers::from_env(&self.factory));
        let drafts = drafter
            .run_all(topic, &models, &styles, &voice, &patterns)
            .await;

        for draft in drafts {
            println!("{}", draft.view(opts));
            println!("\n{separator}\n");
        }
    }

    async fn run_fetch(
        &self,
        url_or_id: Option<&str>,
        id: Option<&str>,
        json: bool,
        opts: &ViewOptions,
    ) {
        let lookup = match (id, url_or_id) {
            (Some(id), _) => Lookup::Id(id.trim().to_string()),
            (None, Some(input)) => Lookup::parse(input).unwrap_or_else(|| die(1, FETCH_EXAMPLES)),
            (None, None) => die(1, FETCH_USAGE),
        };

        match &lookup {
            Lookup::Url(url) => println!("\nFetching post from: {url}\n"),
            Lookup::Id(id) => println!("\nFetching post by ID: {id}\n"),
        }

        let fetcher = PostFetcher::new(&self.factory);
        match fetcher.fetch(&lookup).await {
            Some(post) => print_post(&post, json, opts),
            None => match lookup {
                Lookup::Url(_) => die(
                    1,
                    "Failed to fetch post. It may be protected, deleted, or the URL is invalid.",
                ),
                Lookup::Id(_) => die(1, "Failed to fetch post."),
            },
        }
    }
}

fn load_reference(dir: &Path) -> Vec<String> {
    reference::load_texts(dir).unwrap_or_else(|err| {
        error!("could not read reference posts: {err}");
        let message = format!("Error: could not read {}: {err}", dir.display());
        die(1, &message)
    })
}

/// Raw output is neither styled nor wrapped.
fn view_options(raw: bool) -> ViewOptions {
    let opts = ViewOptions::build().raw(raw);
    let opts = if raw { opts.width(None) } else { opts };
    opts.build()
}

fn print_post(post: &Post, json: bool, opts: &ViewOptions) {
    println!("{}", post.view(opts));
    if json {
        println!("\n--- Raw JSON ---");
        match serde_json::to_string_pretty(post) {
            Ok(json) => println!("{json}"),
            Err(err) => die(1, &format!("Error: could not serialize post: {err}")),
        }
    }
}
