//! Here2Home CLI
//!
//! Command-line interface for the Here2Home API.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use here2home_client::Here2HomeClient;
use here2home_types::{
    ConversionDirection, ConversionResponse, ConversionStatus, CurrencyCode, LocationReport,
    RatesFreshness,
};

#[derive(Parser)]
#[command(name = "here2home")]
#[command(author, version, about = "Here2Home currency converter CLI", long_about = None)]
struct Cli {
    /// Base URL of the Here2Home API
    #[arg(
        long,
        env = "HERE2HOME_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount
    ///
    /// With --from and --to, converts between that pair. Otherwise uses the
    /// server's local/home pair and direction.
    Convert {
        /// Amount, e.g. 250000 or 1,250.50
        amount: String,
        #[arg(long, requires = "to")]
        from: Option<CurrencyCode>,
        #[arg(long, requires = "from")]
        to: Option<CurrencyCode>,
    },
    /// Exchange-rate cache operations
    Rates {
        #[command(subcommand)]
        action: RatesCommands,
    },
    /// Local currency detection
    Location {
        #[command(subcommand)]
        action: LocationCommands,
    },
    /// Home currency and direction
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// List supported currencies
    Currencies,
    /// List countries and their currencies
    Countries,
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum RatesCommands {
    /// Show how fresh the cached rates are
    Status,
    /// Force a refresh attempt
    Refresh,
    /// Tell the server the device is online
    Online,
    /// Tell the server the device is offline
    Offline,
}

#[derive(Subcommand)]
enum LocationCommands {
    /// Show the remembered location preference
    Show,
    /// Report a position and detect the local currency
    Report {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Report that the user refused the location prompt
    Deny,
    /// Forget a remembered refusal
    Forget,
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show settings and the current currency pair
    Show,
    /// Change settings
    Set {
        /// Home currency code
        #[arg(long)]
        home: Option<CurrencyCode>,
        #[arg(long, value_enum)]
        direction: Option<Direction>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    LocalToHome,
    HomeToLocal,
}

impl From<Direction> for ConversionDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::LocalToHome => ConversionDirection::LocalToHome,
            Direction::HomeToLocal => ConversionDirection::HomeToLocal,
        }
    }
}

fn describe_rates(rates: &RatesFreshness) -> String {
    match rates {
        RatesFreshness::Fresh { fetched_at } => format!("rates updated {}", fetched_at),
        RatesFreshness::Stale { fetched_at } => {
            format!("offline: using rates from {}", fetched_at)
        }
        RatesFreshness::Unavailable => "no rates cached".to_string(),
    }
}

fn print_conversion(response: &ConversionResponse) {
    match (response.status, response.formatted.as_deref()) {
        (ConversionStatus::Converted, Some(formatted)) => println!(
            "{} -> {}: {}  ({})",
            response.source,
            response.target,
            formatted,
            describe_rates(&response.rates)
        ),
        _ => println!(
            "{} -> {}: enter a positive amount",
            response.source, response.target
        ),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = Here2HomeClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert { amount, from, to } => {
            let response = match (from, to) {
                (Some(from), Some(to)) => client.convert(&amount, from, to).await?,
                _ => client.submit(&amount).await?,
            };
            if cli.json {
                print_json(&response)?;
            } else {
                print_conversion(&response);
            }
        }

        Commands::Rates { action } => {
            let status = match action {
                RatesCommands::Status => client.rates_status().await?,
                RatesCommands::Refresh => client.refresh_rates().await?,
                RatesCommands::Online => client.set_online(true).await?,
                RatesCommands::Offline => client.set_online(false).await?,
            };
            if cli.json {
                print_json(&status)?;
            } else {
                println!(
                    "{} ({} currencies, {})",
                    describe_rates(&status.freshness),
                    status.currencies,
                    if status.online { "online" } else { "offline" }
                );
            }
        }

        Commands::Location { action } => match action {
            LocationCommands::Show => print_json(&client.location().await?)?,
            LocationCommands::Report { lat, lon } => {
                let detection = client.report_position(lat, lon).await?;
                if cli.json {
                    print_json(&detection)?;
                } else {
                    println!(
                        "Local currency: {} ({})",
                        detection.currency,
                        detection
                            .preference
                            .last_detected_country
                            .as_deref()
                            .unwrap_or("unknown country")
                    );
                }
            }
            LocationCommands::Deny => {
                let report = LocationReport {
                    denied: true,
                    ..Default::default()
                };
                let detection = client.report_location(&report).await?;
                println!("Local currency: {}", detection.currency);
            }
            LocationCommands::Forget => {
                client.forget_denial().await?;
                println!("✓ Location permission reset");
            }
        },

        Commands::Settings { action } => {
            let settings = match action {
                SettingsCommands::Show => client.settings().await?,
                SettingsCommands::Set { home, direction } => {
                    if home.is_none() && direction.is_none() {
                        anyhow::bail!("Nothing to change: pass --home and/or --direction");
                    }
                    client
                        .update_settings(home, direction.map(Into::into))
                        .await?
                }
            };
            if cli.json {
                print_json(&settings)?;
            } else {
                println!(
                    "Home: {} ({})  Local: {}  Converting {} -> {}",
                    settings.home_currency,
                    settings.home_country,
                    settings.local_currency,
                    settings.source,
                    settings.target
                );
            }
        }

        Commands::Currencies => {
            let currencies = client.currencies().await?;
            if cli.json {
                print_json(&currencies)?;
            } else {
                for c in currencies {
                    println!("{}  {:<4} {}", c.code, c.symbol, c.name);
                }
            }
        }

        Commands::Countries => {
            let countries = client.countries().await?;
            if cli.json {
                print_json(&countries)?;
            } else {
                for c in countries {
                    println!("{:<24} {}", c.country_name, c.currency_code);
                }
            }
        }
    }

    Ok(())
}
