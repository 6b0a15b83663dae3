//! Forkful CLI
//!
//! Command-line interface for browsing TheMealDB through the cached resolver.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use forkful_api::{ApiConfig, ApiServer, MealsResponse, Page};
use forkful_cache::TtlCache;
use forkful_client::{MealDbClient, MealDbConfig};
use forkful_core::constants::{DEFAULT_PAGE_SIZE, MEALDB_TEST_API_KEY};
use forkful_core::types::{FilterRequest, Meal, MealSummary};
use forkful_resolver::MealResolver;

/// Forkful - recipe browsing over TheMealDB
#[derive(Parser)]
#[command(name = "forkful")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// TheMealDB API key
    #[arg(long, global = true, env = "MEALDB_API_KEY")]
    api_key: Option<String>,

    /// Upstream base URL (overrides the key-derived URL)
    #[arg(long, global = true, env = "MEALDB_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Category and area selection shared by `search` and `filter`.
#[derive(Args, Debug)]
struct Selection {
    /// Category to include (repeatable)
    #[arg(short, long = "category")]
    categories: Vec<String>,
    /// Area to include (repeatable)
    #[arg(short, long = "area")]
    areas: Vec<String>,
}

impl Selection {
    fn request(&self) -> FilterRequest {
        FilterRequest::new()
            .with_categories(self.categories.iter().map(String::as_str))
            .with_areas(self.areas.iter().map(String::as_str))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Search meals by name, optionally narrowed by category and area
    Search {
        /// Name search text
        query: String,
        #[command(flatten)]
        selection: Selection,
    },

    /// List meals by category and/or area
    Filter {
        #[command(flatten)]
        selection: Selection,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Meals per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        per_page: usize,
    },

    /// Show a meal with its ingredients
    Meal {
        /// Meal id
        id: String,
    },

    /// List category names
    Categories,

    /// List area names
    Areas,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "forkful=debug,info"
    } else {
        "forkful=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &cli.command {
        Commands::Serve { port, bind } => cmd_serve(&cli, *port, bind).await,
        Commands::Search { query, selection } => {
            let request = selection.request().with_search(query.as_str());
            cmd_list(&cli, &request, None).await
        }
        Commands::Filter {
            selection,
            page,
            per_page,
        } => cmd_list(&cli, &selection.request(), Some(Page::new(*page, *per_page))).await,
        Commands::Meal { id } => cmd_meal(&cli, id).await,
        Commands::Categories => {
            let names = cli.resolver()?.categories().await.context("Failed to list categories")?;
            print_names(&cli, "Categories", &names)
        }
        Commands::Areas => {
            let names = cli.resolver()?.areas().await.context("Failed to list areas")?;
            print_names(&cli, "Areas", &names)
        }
    }
}

impl Cli {
    fn mealdb_config(&self) -> MealDbConfig {
        let mut config = MealDbConfig::new(self.api_key.as_deref().unwrap_or(MEALDB_TEST_API_KEY));
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        config
    }

    fn resolver(&self) -> Result<MealResolver> {
        let config = self.mealdb_config();
        debug!(endpoint = %config.endpoint(), "Using upstream");

        let client =
            MealDbClient::with_config(config).context("Failed to create TheMealDB client")?;
        Ok(MealResolver::new(Arc::new(client), TtlCache::new()))
    }
}

/// Run API server
async fn cmd_serve(cli: &Cli, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting Forkful API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let mut config = ApiConfig::from_env();
    if let Some(key) = &cli.api_key {
        config.api_key = key.clone();
    }
    if let Some(url) = &cli.base_url {
        config.base_url = Some(url.clone());
    }

    let server = ApiServer::new(config).context("Invalid server configuration")?;

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;
    server.run(addr).await?;

    Ok(())
}

/// Resolve a filter request and print one page
async fn cmd_list(cli: &Cli, request: &FilterRequest, page: Option<Page>) -> Result<()> {
    if !request.has_filters() {
        println!("{}", "Nothing to filter: give a search, --category or --area.".yellow());
        return Ok(());
    }

    let resolver = cli.resolver()?;
    let meals = resolver
        .resolve(request)
        .await
        .context("Failed to resolve meals")?;

    let page = page.unwrap_or_else(|| Page::new(1, meals.len().max(1)));
    let response = MealsResponse::paginate(&meals, page, true);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.total == 0 {
        println!("{}", "No meals found.".yellow());
        return Ok(());
    }

    println!(
        "{} {} meal(s), page {}/{}",
        "🍽️ ".green(),
        response.total,
        response.page,
        response.total_pages.max(1)
    );
    for meal in &response.meals {
        print_summary(meal);
    }

    Ok(())
}

/// Show one meal
async fn cmd_meal(cli: &Cli, id: &str) -> Result<()> {
    let resolver = cli.resolver()?;
    let meal = resolver
        .meal(id)
        .await
        .with_context(|| format!("Failed to look up meal {}", id))?;

    let Some(meal) = meal else {
        println!("{} {}", "❌ No meal with id".red(), id);
        return Ok(());
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
        return Ok(());
    }

    print_meal(&meal);
    Ok(())
}

/// Print a reference list
fn print_names(cli: &Cli, title: &str, names: &[String]) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(names)?);
        return Ok(());
    }

    println!("{} ({})", title.cyan().bold(), names.len());
    for name in names {
        println!("   {}", name);
    }
    Ok(())
}

fn print_summary(meal: &MealSummary) {
    let tags: Vec<&str> = [meal.category.as_deref(), meal.area.as_deref()]
        .into_iter()
        .flatten()
        .collect();

    println!(
        "   {} {} {}",
        format!("[{}]", meal.id).dimmed(),
        meal.name.bold(),
        tags.join(" · ").yellow()
    );
}

fn print_meal(meal: &Meal) {
    println!("{} {}", meal.name.cyan().bold(), format!("#{}", meal.id).dimmed());
    if let Some(category) = &meal.category {
        println!("   {} {}", "Category:".dimmed(), category);
    }
    if let Some(area) = &meal.area {
        println!("   {} {}", "Area:".dimmed(), area);
    }
    if !meal.tags.is_empty() {
        println!("   {} {}", "Tags:".dimmed(), meal.tags.join(", "));
    }

    println!("\n{}", "Ingredients:".yellow().bold());
    for ingredient in &meal.ingredients {
        if ingredient.measure.is_empty() {
            println!("   • {}", ingredient.name);
        } else {
            println!("   • {} {}", ingredient.measure, ingredient.name);
        }
    }

    if let Some(instructions) = &meal.instructions {
        println!("\n{}", "Instructions:".yellow().bold());
        println!("{}", instructions);
    }
    if let Some(url) = &meal.youtube_url {
        println!("\n   {} {}", "Video:".dimmed(), url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_args() {
        let cli = Cli::try_parse_from([
            "forkful", "filter", "-c", "Beef", "-c", "Chicken", "-a", "Italian", "--page", "2",
        ])
        .unwrap();

        let Commands::Filter { selection, page, per_page } = cli.command else {
            panic!("expected filter command");
        };
        let request = selection.request();
        assert_eq!(request.categories.len(), 2);
        assert!(request.areas.contains("Italian"));
        assert_eq!(page, 2);
        assert_eq!(per_page, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_base_url_flag_overrides_key() {
        let cli = Cli::try_parse_from([
            "forkful", "--base-url", "http://localhost:8080/api", "categories",
        ])
        .unwrap();
        assert_eq!(cli.mealdb_config().endpoint(), "http://localhost:8080/api");
    }
}
