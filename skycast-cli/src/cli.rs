use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::{Confirm, Password, PasswordDisplayMode};
use skycast_core::{
    Config, Dashboard, DeniedGeolocator, FixedGeolocator, ForecastWindow, Geolocator, ProviderId,
    Units, debounce, location, provider::provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitsArg {
    C,
    F,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::C => Units::Celsius,
            UnitsArg::F => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    /// 4-day forecast list.
    Short,
    /// 9-day forecast list.
    Long,
}

impl From<WindowArg> for ForecastWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Short => ForecastWindow::Short,
            WindowArg::Long => ForecastWindow::Long,
        }
    }
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// City name. Falls back to geolocation, then the configured default city.
    pub city: Option<String>,

    /// Latitude of a pre-granted geolocation fix.
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude of a pre-granted geolocation fix.
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,

    /// Temperature units override.
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Forecast window override.
    #[arg(long, value_enum)]
    pub window: Option<WindowArg>,

    /// Provider short name, e.g. "weatherapi" or "openweather".
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "weatherapi" or "openweather".
        provider: String,
    },

    /// Render the dashboard once.
    Show {
        #[command(flatten)]
        args: DisplayArgs,
    },

    /// Keep the dashboard fresh: re-fetch on an interval, and read city
    /// searches from stdin (debounced like the search box).
    Watch {
        #[command(flatten)]
        args: DisplayArgs,

        /// Seconds between automatic refreshes.
        #[arg(long, default_value_t = 600)]
        interval: u64,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { args } => show(args).await,
            Command::Watch { args, interval } => watch(args, interval).await,
        }
    }
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new("API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt failed")?;

    config.upsert_provider_api_key(id, api_key);

    if config.default_provider_id().ok() != Some(id) {
        let make_default = Confirm::new(&format!("Make {id} the default provider?"))
            .with_default(true)
            .prompt()
            .unwrap_or(false);
        if make_default {
            config.set_default_provider(id);
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Build the dashboard and dispatch the first fetch from the resolved location.
async fn setup(args: &DisplayArgs, config: &Config) -> Result<Dashboard> {
    let id = match &args.provider {
        Some(p) => ProviderId::try_from(p.as_str())?,
        None => config.default_provider_id()?,
    };
    let provider = provider_from_config(id, config)?;

    let geolocator: Box<dyn Geolocator> = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Box::new(FixedGeolocator { lat, lon }),
        _ => Box::new(DeniedGeolocator),
    };
    let query =
        location::resolve(geolocator.as_ref(), args.city.as_deref(), &config.default_city).await;

    let mut dashboard = Dashboard::new(provider, config);
    if let Some(units) = args.units {
        dashboard.set_units(units.into());
    }
    if let Some(window) = args.window {
        dashboard.set_window(window.into());
    }

    dashboard.fetch(query).await;
    Ok(dashboard)
}

fn print_dashboard(dashboard: &mut Dashboard) {
    if let Some(notice) = dashboard.take_notice() {
        eprintln!("{}", notice.message());
    }
    println!("{}", render::render(dashboard, Local::now().naive_local()));
}

async fn show(args: DisplayArgs) -> Result<()> {
    let config = Config::load()?;
    let mut dashboard = setup(&args, &config).await?;
    print_dashboard(&mut dashboard);
    Ok(())
}

async fn watch(args: DisplayArgs, interval: u64) -> Result<()> {
    let config = Config::load()?;
    let mut dashboard = setup(&args, &config).await?;
    print_dashboard(&mut dashboard);

    // Stdin lines are city searches; a typing burst collapses to its last
    // line before a fetch fires.
    let (debouncer, mut searches) = debounce::debounce::<String>(debounce::DEFAULT_DELAY);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if !debouncer.submit(line) {
                break;
            }
        }
    });

    let mut searches_open = true;
    loop {
        tokio::select! {
            city = searches.recv(), if searches_open => match city {
                Some(city) => {
                    dashboard.submit_search(&city).await;
                    print_dashboard(&mut dashboard);
                }
                // Stdin closed; keep refreshing on the interval.
                None => searches_open = false,
            },
            () = tokio::time::sleep(Duration::from_secs(interval)) => {
                tracing::debug!(interval, "interval refresh");
                dashboard.refresh().await;
                print_dashboard(&mut dashboard);
            }
        }
    }
}
