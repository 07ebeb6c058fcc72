use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use mealmatch::{api, match_recipes, AppConfig, MealMatchClient, Recipe, RecipeScraper};

#[derive(Parser)]
#[command(name = "mealmatch")]
#[command(about = "Scrape recipes and match them against your pantry", long_about = None)]
struct Cli {
    /// Path to a mealmatch.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the recipe API server
    Serve,
    /// Scrape a search term and print the recipes as JSON
    Scrape {
        #[arg(default_value = "ayam masak merah")]
        term: String,
    },
    /// List recipes from the server
    Recipes,
    /// Ask the server to scrape a search term
    Search { term: String },
    /// Delete a recipe by id
    Delete { id: String },
    /// Manage the ingredients you have at hand
    Pantry {
        #[command(subcommand)]
        command: PantryCommands,
    },
    /// Rank recipes by how much of each one your pantry covers
    Match,
}

#[derive(Subcommand)]
enum PantryCommands {
    /// Add one or more ingredients
    Add {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Remove an ingredient
    Remove { ingredient: String },
    /// Remove every ingredient
    Clear,
    /// Show the pantry
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => api::serve(&config).await?,
        Commands::Scrape { term } => scrape_to_stdout(&config, &term).await?,
        Commands::Recipes => {
            let client = MealMatchClient::from_config(&config)?;
            let outcome = client.load_recipes().await;
            report(outcome.error);
            for recipe in &outcome.data {
                print_recipe(recipe);
            }
        }
        Commands::Search { term } => {
            if term.trim().is_empty() {
                return Err("Search term is required".into());
            }
            let client = MealMatchClient::from_config(&config)?;
            let outcome = client.scrape(term.trim()).await?;
            report(outcome.error);
            println!("Added {} recipes", outcome.data.len());
            for recipe in &outcome.data {
                print_recipe(recipe);
            }
        }
        Commands::Delete { id } => {
            let client = MealMatchClient::from_config(&config)?;
            report(client.delete(&id).await.error);
        }
        Commands::Pantry { command } => {
            let client = MealMatchClient::from_config(&config)?;
            match command {
                PantryCommands::Add { ingredients } => {
                    for ingredient in client.add_ingredients(&ingredients).await? {
                        println!("+ {}", ingredient);
                    }
                }
                PantryCommands::Remove { ingredient } => {
                    if !client.remove_ingredient(&ingredient).await? {
                        println!("'{}' is not in the pantry", ingredient);
                    }
                }
                PantryCommands::Clear => client.clear_ingredients().await?,
                PantryCommands::List => {
                    for ingredient in client.pantry().await.items() {
                        println!("{}", ingredient);
                    }
                }
            }
        }
        Commands::Match => {
            let client = MealMatchClient::from_config(&config)?;
            let pantry = client.pantry().await;
            let outcome = client.load_recipes().await;
            report(outcome.error);

            for found in match_recipes(&pantry, &outcome.data) {
                match &found.score {
                    Some(score) => {
                        println!("{:>3.0}%  {}", score.match_percentage, found.recipe.title);
                        println!("      have: {}", score.matched_ingredients.join(", "));
                        println!("      need: {}", score.missing_ingredients.join(", "));
                    }
                    None => println!("      {}", found.recipe.title),
                }
            }
        }
    }

    Ok(())
}

/// The standalone scraper run: scrape once and print the records as JSON.
async fn scrape_to_stdout(
    config: &AppConfig,
    term: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = RecipeScraper::from_config(config)?;
    let recipes = scraper.scrape(term).await?;

    info!("Scraping completed, {} recipes", recipes.len());
    println!("{}", serde_json::to_string_pretty(&recipes)?);
    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!(
        "{}  {} [{}, serves {}]",
        recipe.id, recipe.title, recipe.cook_time, recipe.servings
    );
}

fn report(error: Option<&str>) {
    if let Some(message) = error {
        eprintln!("{}", message);
    }
}
