use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toc_outline::block::{self, RequestContext};
use toc_outline::cache::{self, CacheStats, NavigationCache};
use toc_outline::menu::{self, MenuError, MenuStore, UrlActiveTrail};
use toc_outline::types::NavigationResult;
use toc_outline::{config, navigation, output, render};
use tracing::Level;

/// Shared flags for commands that read or write the render cache.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Directory holding the render cache
    #[arg(long, default_value = ".toc-outline-cache")]
    cache_dir: PathBuf,

    /// Ignore and overwrite cached renders
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
#[command(name = "toc-outline")]
#[command(about = "Previous / up / next navigation for table-of-contents outlines")]
#[command(long_about = "\
Previous / up / next navigation for table-of-contents outlines

Menus are read from a JSON document mapping group containers to menu
instances and menu ids to trees:

  {
    \"containers\": { \"collection/joinup\": \"12\" },
    \"menus\": {
      \"ogmenu-12\": [
        { \"id\": \"1\", \"title\": \"Overview\", \"url\": \"/collection/joinup\",
          \"route_name\": \"entity.rdf_entity.canonical\" },
        { \"id\": \"2\", \"title\": \"Guide\", \"url\": \"/collection/joinup/guide\",
          \"children\": [ ... ] }
      ]
    }
  }

Reading order is the tree read top to bottom, parents before children.
Placeholder links (see [strip] in the config) and links marked
\"inaccessible\": true are skipped by previous/next.

Run 'toc-outline gen-config' to generate a documented outline.toml.")]
#[command(version)]
struct Cli {
    /// Menu document (JSON)
    #[arg(long, default_value = "menus.json", global = true)]
    menus: PathBuf,

    /// Directory containing outline.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a menu tree and its reading order
    Flatten {
        /// Menu id, e.g. ogmenu-12
        menu_id: String,
    },
    /// Show previous / up / next for a page
    Navigate {
        /// Group container owning the menu
        container: String,
        /// Request path of the page
        path: String,
    },
    /// Render the outline links of a page as HTML
    Render {
        container: String,
        path: String,
        /// Wrap the links in a standalone preview document
        #[arg(long)]
        page: bool,
        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Drop cached renders carrying a cache tag
    Invalidate {
        /// e.g. ogmenu_instance:12
        tag: String,
        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Validate the menu document
    Check,
    /// Print a stock outline.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Flatten { menu_id } => {
            let config = config::load_config(&cli.config_dir)?;
            let store = MenuStore::load(&cli.menus)?;
            let tree = store
                .get(&menu_id)
                .ok_or_else(|| MenuError::UnknownMenu(menu_id.clone()))?;
            output::print_outline(&menu_id, tree, &config.strip);
        }
        Command::Navigate { container, path } => {
            let config = config::load_config(&cli.config_dir)?;
            let store = MenuStore::load(&cli.menus)?;
            let ctx = resolve_request(&store, &config, &container, &path)?;
            let nav = match ctx.active_id.as_deref() {
                Some(active) => navigation::compute_navigation(&ctx.tree, active, &config.strip),
                None => NavigationResult::default(),
            };
            output::print_navigation(&nav);
        }
        Command::Render {
            container,
            path,
            page,
            cache: cache_args,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let store = MenuStore::load(&cli.menus)?;
            let ctx = resolve_request(&store, &config, &container, &path)?;

            let mut render_cache = if cache_args.no_cache {
                NavigationCache::empty()
            } else {
                NavigationCache::load(&cache_args.cache_dir)
            };
            let mut stats = CacheStats::default();
            let fingerprint = cache::fingerprint(&ctx.tree, &config)?;
            let key = if page {
                format!("{}|page", ctx.cache_key())
            } else {
                ctx.cache_key()
            };

            let html = render_cache.get_or_render(&key, &fingerprint, &mut stats, || {
                let build = block::build_block(&ctx, &config);
                let markup = if page {
                    render::render_page(&ctx.path, &build)
                } else {
                    render::render_links(&build)
                };
                (markup.into_string(), build.cache_tags)
            });
            render_cache.save(&cache_args.cache_dir)?;

            println!("{}", html);
            eprintln!("Cache: {}", stats);
        }
        Command::Invalidate {
            tag,
            cache: cache_args,
        } => {
            let mut render_cache = NavigationCache::load(&cache_args.cache_dir);
            let dropped = render_cache.invalidate_tag(&tag);
            render_cache.save(&cache_args.cache_dir)?;
            println!("Invalidated {} cached renders tagged {}", dropped, tag);
        }
        Command::Check => {
            let config = config::load_config(&cli.config_dir)?;
            let store = MenuStore::load(&cli.menus)?;
            println!("==> Checking {}", cli.menus.display());
            let problems = menu::check_store(&store, |instance| config.menu_id(instance));
            output::print_check(store.menus.len(), &problems);
            if !problems.is_empty() {
                return Err(format!("{} problems in {}", problems.len(), cli.menus.display()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `--verbose` shows debug events.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Resolve one request against the store, using URL matching for the
/// active link.
fn resolve_request(
    store: &MenuStore,
    config: &config::OutlineConfig,
    container: &str,
    path: &str,
) -> Result<RequestContext, block::BlockError> {
    let trail = UrlActiveTrail::new(store, path);
    RequestContext::resolve(container, path, config, store, store, &trail)
}
