//! Wuxia news watcher CLI
//!
//! Local execution entry point. Scheduling repeated polls is left to the
//! caller (cron, a systemd timer, a bot host).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wuxia_news::{
    error::{AppError, Result},
    models::{Config, PageCatalog, PageIndex},
    pipeline::{self, NoticePoller, PollOutcome},
    services::NewsService,
    storage::LocalStorage,
};

/// wuxia-news - Wuxia official news watcher
#[derive(Parser, Debug)]
#[command(name = "wuxia-news", version, about = "Wuxia official news watcher")]
struct Cli {
    /// Path to storage directory containing config.toml and state files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover how many listing pages exist
    Discover,

    /// List recent notices
    List {
        /// Page to list (`2`, `57`, `n12`); defaults to the most recent notices
        #[arg(short, long)]
        page: Option<String>,

        /// Maximum number of notices
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print the newest notice as Markdown
    Latest,

    /// Poll once and print the newest notice if it is new
    Poll {
        /// Poll even when notify.enable is false
        #[arg(long)]
        force: bool,
    },

    /// Archive a listing page as Markdown files
    Archive {
        /// Page to archive; defaults to the first page
        #[arg(short, long)]
        page: Option<String>,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Resolve page text, discovering the catalog only when it is needed.
async fn resolve_page(news: &NewsService, raw: Option<&str>) -> Result<PageIndex> {
    let Some(raw) = raw else {
        return Ok(PageIndex::FIRST);
    };
    if let Ok(ordinal) = raw.trim().parse::<u32>() {
        if let Ok(index) = PageIndex::current(ordinal) {
            return Ok(index);
        }
    }
    let catalog: PageCatalog = news.listing().discover().await?;
    catalog.resolve(raw)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let news = NewsService::new(&config)?;
    let storage = LocalStorage::with_paths(&cli.storage_dir, config.paths.clone());

    match cli.command {
        Command::Discover => {
            let catalog = news.listing().discover().await?;
            println!("{}", catalog.total());
        }

        Command::List { page, limit } => {
            let stubs = match page.as_deref() {
                Some(raw) => {
                    let index = resolve_page(&news, Some(raw)).await?;
                    let mut stubs = news.fetch_stubs(index).await?;
                    stubs.truncate(limit);
                    stubs
                }
                None => news.list_recent(limit).await?,
            };
            println!("最近{}条公告如下：", stubs.len());
            for stub in &stubs {
                println!("{}", stub.summary());
            }
        }

        Command::Latest => {
            let notice = news.fetch_latest().await?;
            println!("{}", notice.format("# {title}\n\n{tag} {time}\n{url}\n\n{content}"));
        }

        Command::Poll { force } => {
            if !config.notify.enable && !force {
                log::info!("Polling disabled (notify.enable = false)");
                return Ok(());
            }

            let mut poller = NoticePoller::new(news, storage.clone());
            if config.notify.archive {
                poller = poller.with_archive(storage);
            }

            let template = config.notify.mode.template();
            let outcome = poller
                .poll_once(|notice| async move {
                    if !notice.has_content() {
                        log::warn!("'{}' is delivered without content", notice.title);
                    }
                    println!("{}", notice.format(template));
                    Ok::<_, AppError>(notice.title)
                })
                .await?;

            match outcome {
                PollOutcome::Delivered(title) => log::info!("Delivered '{}'", title),
                PollOutcome::Unchanged => log::info!("Nothing new"),
            }
        }

        Command::Archive { page } => {
            let index = resolve_page(&news, page.as_deref()).await?;
            let summary = pipeline::run_archive(&news, &storage, index).await?;
            log::info!(
                "Archive complete: {} written, {} skipped",
                summary.archived,
                summary.skipped
            );
        }

        Command::Validate => {
            log::info!("✓ Config OK");
            log::info!("Listing: {}{}", config.provider.base_url, config.provider.list_path);
            log::info!(
                "Notify: enable={} mode={:?} interval={}s archive={}",
                config.notify.enable,
                config.notify.mode,
                config.notify.interval_secs,
                config.notify.archive
            );
        }
    }

    Ok(())
}
