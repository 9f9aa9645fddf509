//! crema-ui - Crema tasting journal from the command line
//!
//! Loads configuration, seeds a session store and runs one command
//! against it: list the feed, draw a radar chart, publish a note, or show
//! the specimen book.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crema_common::comments::CommentBody;
use crema_common::feed::{FeedTab, FilterState};
use crema_common::models::PostDraft;
use crema_common::radar::render_svg;
use crema_common::{config, Language, PartialProfile};
use crema_ui::{render, AppStore};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "crema-ui", version, about = "Crema coffee tasting journal")]
struct Cli {
    /// Config file (overrides CREMA_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the generated mock feed
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,

    /// Display language (SC, TC, EN, JP, KR)
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the feed under a tab and filters
    Feed {
        #[arg(long, default_value_t = FeedTab::Discover)]
        tab: FeedTab,
        /// Roast level 1-5, repeatable
        #[arg(long = "roast", value_parser = clap::value_parser!(u8).range(1..=5))]
        roasts: Vec<u8>,
        #[arg(long = "method")]
        methods: Vec<String>,
        #[arg(long = "region")]
        regions: Vec<String>,
    },
    /// Render a post's flavor radar as SVG
    Radar {
        post_id: String,
        /// Canvas size in pixels (defaults to config)
        #[arg(long)]
        size: Option<f64>,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Publish a note as the signed-in user
    Publish {
        #[arg(long)]
        title: String,
        #[arg(long)]
        varietal: Option<String>,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        roast: Option<i32>,
        /// Flavor profile as JSON, possibly wrapped in other text
        #[arg(long)]
        profile: Option<String>,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Show a post's comments, optionally adding one first
    Comments {
        post_id: String,
        /// Text to post
        #[arg(long)]
        add: Option<String>,
        /// Answer this comment instead of starting a new one
        #[arg(long, requires = "add")]
        reply_to: Option<String>,
        /// Like or unlike this comment
        #[arg(long)]
        like: Option<String>,
    },
    /// Show the varietal specimen book
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config first: it supplies the default log level
    let toml_config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level)),
        )
        .init();

    info!("Starting Crema (crema-ui) v{}", env!("CARGO_PKG_VERSION"));

    let now = Utc::now();
    let mut store = AppStore::seeded(&toml_config, cli.seed, now);
    if let Some(language) = cli.lang {
        store.set_language(language);
    }
    let language = store.language();

    match cli.command {
        Command::Feed {
            tab,
            roasts,
            methods,
            regions,
        } => {
            let mut filters = FilterState::default();
            roasts.into_iter().for_each(|r| filters.toggle_roast(r));
            methods.iter().for_each(|m| filters.toggle_method(m));
            regions.iter().for_each(|r| filters.toggle_region(r));

            store.set_tab(tab, now);
            store.set_filters(filters, now);

            println!("== {} ==", language.tab_label(tab));
            for card in render::render_feed(&store.visible_feed(), language) {
                println!("{}\n", card);
            }
        }
        Command::Radar { post_id, size, out } => {
            let geometry = match size {
                Some(size) => store.radar_preview(&store.post(&post_id)?.flavor_profile, size),
                None => store.radar_for(&post_id)?,
            };
            let svg = render_svg(&geometry, language);
            match out {
                Some(path) => {
                    std::fs::write(&path, svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Radar for {} written to {}", post_id, path.display());
                }
                None => println!("{}", svg),
            }
        }
        Command::Publish {
            title,
            varietal,
            method,
            region,
            roast,
            profile,
            content,
        } => {
            let draft = PostDraft {
                title: Some(title),
                varietal_id: varietal,
                method,
                region,
                roast_level: roast,
                content,
                flavor_profile: profile
                    .as_deref()
                    .map(PartialProfile::from_model_output)
                    .unwrap_or_default(),
                ..PostDraft::default()
            };

            let receipt = store.publish(draft, now);
            let post = store.post(&receipt.post_id)?;
            println!("{}", render::render_card(post, language));
            if let Some(toast) = store.active_toast(now) {
                println!("{} {}", toast.icon, toast.message);
            }
            println!("{}", render::profile_header(store.user(), store.catalog()));
        }
        Command::Comments {
            post_id,
            add,
            reply_to,
            like,
        } => {
            if let Some(text) = add {
                let body = CommentBody::text(&text);
                let added = match reply_to {
                    Some(target) => store.reply_to_comment(&post_id, &target, body, now)?,
                    None => store.add_comment(&post_id, body, now)?,
                };
                if added.is_none() {
                    info!("Blank comment ignored");
                }
            }
            if let Some(comment_id) = like {
                store.toggle_comment_like(&post_id, &comment_id)?;
            }
            for line in render::render_comments(store.comments(&post_id)?) {
                println!("{}", line);
            }
        }
        Command::Catalog => {
            println!("{}", render::profile_header(store.user(), store.catalog()));
            for line in render::render_catalog(store.user(), store.catalog()) {
                println!("{}", line);
            }
        }
    }

    for event in store.drain_events() {
        let json = serde_json::to_string(&event)?;
        debug!(event = event.event_type(), "{}", json);
    }

    Ok(())
}
