//! Wetterfrosch chat CLI
//!
//! Thin inbound adapter: reads one query per line, hands it to the
//! orchestrator, and prints the returned string. All business logic
//! lives behind `WeatherQueryService`.

#![allow(clippy::print_stdout)]

use std::sync::Arc;
use std::time::Duration;

use application::{ResponseCache, UnitPreferenceStore, WeatherQueryService};
use clap::Parser;
use domain::UserId;
use infrastructure::{AppConfig, WeatherAdapter};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Wetterfrosch weather chat
#[derive(Parser)]
#[command(name = "wetterfrosch")]
#[command(version, about = "Weather chat bot REPL", long_about = None)]
struct Cli {
    /// OpenWeather API key (overrides configuration)
    #[arg(long, env = "WETTERFROSCH_WEATHER_API_KEY")]
    api_key: Option<String>,

    /// User id to converse as (preferences are stored per user)
    #[arg(long, default_value = "1")]
    user_id: i64,
}

const PROMPT_HELP: &str = "Commands:\n  \
    /units <metric|imperial>  choose units\n  \
    /weather <city>           weather for a city\n  \
    <lat>, <lon>              weather for coordinates\n  \
    <city>                    weather for a city\n  \
    /quit                     exit";

const UNITS_USAGE: &str = "Usage: /units <metric|imperial>";
const WEATHER_USAGE: &str = "Usage: /weather <city>";

/// One parsed line of REPL input
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Help,
    Usage(&'static str),
    SetUnits(&'a str),
    CityQuery(&'a str),
    FreeText(&'a str),
}

/// Map a trimmed input line onto an orchestrator call
///
/// Commands are recognized by their word alone, so a bare `/units` or
/// `/weather` gets usage help instead of being forwarded upstream as
/// if it were a city name.
fn parse_input(input: &str) -> Input<'_> {
    let (command, arg) = match input.split_once(' ') {
        Some((command, arg)) => (command, arg.trim()),
        None => (input, ""),
    };

    match command {
        "/quit" | "/exit" => Input::Quit,
        "/help" => Input::Help,
        "/units" if arg.is_empty() => Input::Usage(UNITS_USAGE),
        "/units" => Input::SetUnits(arg),
        "/weather" if arg.is_empty() => Input::Usage(WEATHER_USAGE),
        "/weather" => Input::CityQuery(arg),
        _ => Input::FreeText(input),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wetterfrosch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });
    if let Some(api_key) = cli.api_key {
        config.weather.api_key = api_key;
    }
    anyhow::ensure!(
        !config.weather.api_key.is_empty(),
        "No API key configured. Set WETTERFROSCH_WEATHER_API_KEY or weather.api_key in config.toml"
    );

    info!(
        default_units = %config.default_units,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    let provider = WeatherAdapter::new(config.weather.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?;

    let service = WeatherQueryService::new(
        Arc::new(provider),
        ResponseCache::new(Duration::from_secs(config.cache.ttl_secs)),
        UnitPreferenceStore::new(config.default_units),
    );

    let user = UserId::new(cli.user_id);
    println!("Wetterfrosch v{} — type /help for commands", env!("CARGO_PKG_VERSION"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = match parse_input(input) {
            Input::Quit => break,
            Input::Help => PROMPT_HELP.to_string(),
            Input::Usage(usage) => usage.to_string(),
            Input::SetUnits(value) => {
                service.set_units(user, value);
                format!("Units set to {}", service.units_for(user))
            },
            Input::CityQuery(city) => service.city_query(user, city).await,
            Input::FreeText(text) => match service.free_text_query(user, text).await {
                Some(reply) => reply,
                // Not a coordinate attempt; treat the line as a city name.
                None => service.city_query(user, text).await,
            },
        };

        println!("{reply}\n");
    }

    Ok(())
}
