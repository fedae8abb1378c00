use smart_eats::commands::{CommandHandler, Flow};
use smart_eats::config::{parse_coordinate, ClientConfig};
use smart_eats::food::api::BackendClient;
use smart_eats::food::models::Coordinates;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "SmartEats pantry recipe finder", long_about = None)]
struct Args {
    /// Backend API base URL (overrides SMARTEATS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Latitude used for restaurant search (overrides SMARTEATS_LAT)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<String>,

    /// Longitude used for restaurant search (overrides SMARTEATS_LNG)
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<String>,

    /// Disable the progress spinner
    #[arg(long)]
    no_spinner: bool,
}

fn build_config(args: &Args) -> Result<ClientConfig> {
    let env_config = ClientConfig::from_env().context("Invalid SMARTEATS_* environment")?;

    let lat = match &args.lat {
        Some(raw) => parse_coordinate("latitude", raw)?,
        None => env_config.location.lat,
    };
    let lng = match &args.lng {
        Some(raw) => parse_coordinate("longitude", raw)?,
        None => env_config.location.lng,
    };
    let api_url = args.api_url.as_deref().unwrap_or(&env_config.api_url);

    Ok(ClientConfig::new(api_url, Coordinates { lat, lng })?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(
        "Using backend {} at ({}, {})",
        config.api_url, config.location.lat, config.location.lng
    );

    let client = BackendClient::new(&config);
    let mut command_handler =
        CommandHandler::new(client, config.location).with_spinner(!args.no_spinner);

    println!(
        "{} {}",
        "SmartEats".red().bold(),
        "| pantry recipe finder".dimmed()
    );
    println!("{}", smart_eats::commands::help_text());

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("🍳 ") {
            Ok(line) => {
                let input = line.trim();
                if !input.is_empty() {
                    let _ = rl.add_history_entry(input);
                }

                match command_handler.handle_command(input).await {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => println!("{}", e.red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
