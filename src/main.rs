use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;

use portfolio_desk::config::{ConfigError, DesktopConfig, load_repository};
use portfolio_desk::constants::{
    DEFAULT_HOSTNAME, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_USER, DOCK_HEIGHT,
};
use portfolio_desk::desktop::Desktop;
use portfolio_desk::window::Screen;
use portfolio_desk::{host, tracing_sub};

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simulated desktop with a portfolio terminal, file browser and windows"
)]
struct Cli {
    /// Width of the simulated screen in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_SCREEN_WIDTH)]
    width: f64,

    /// Height of the simulated screen in pixels, dock included.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_SCREEN_HEIGHT)]
    height: f64,

    #[arg(long, value_name = "PX", default_value_t = DOCK_HEIGHT)]
    dock_height: f64,

    /// User name shown in the shell prompt.
    #[arg(short = 'u', long, default_value = DEFAULT_USER)]
    user: String,

    #[arg(long, default_value = DEFAULT_HOSTNAME)]
    hostname: String,

    /// JSON file mapping collection names to records.
    #[arg(short = 's', long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Append logs to FILE. Logs are discarded otherwise, since the
    /// terminal belongs to the desktop.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    log_level: Level,
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        DesktopConfig {
            screen: Screen::new(cli.width, cli.height, cli.dock_height),
            user: cli.user.clone(),
            hostname: cli.hostname.clone(),
            ..DesktopConfig::default()
        }
        .validated()
    }
}

fn invalid_input(err: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log_file.as_deref(), cli.log_level)?;

    let config = DesktopConfig::try_from(&cli).map_err(invalid_input)?;
    let repository = load_repository(cli.seed.as_deref()).map_err(invalid_input)?;
    tracing::info!(
        width = config.screen.width,
        height = config.screen.height,
        seeded = cli.seed.is_some(),
        "starting desktop"
    );

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    host::run(Desktop::new(config, Arc::new(repository)), &runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_full_hd_screen() {
        let cli = Cli::parse_from(["portfolio-desk"]);
        let config = DesktopConfig::try_from(&cli).unwrap();
        assert_eq!(config.screen, Screen::new(1920.0, 1080.0, 64.0));
        assert_eq!(config.user, "developer");
        assert_eq!(cli.log_level, Level::INFO);
    }

    #[test]
    fn flags_override_identity_and_geometry() {
        let cli = Cli::parse_from([
            "portfolio-desk",
            "--width",
            "1280",
            "--height",
            "720",
            "-u",
            "ada",
            "--hostname",
            "lovelace",
            "--log-level",
            "debug",
        ]);
        let config = DesktopConfig::try_from(&cli).unwrap();
        assert_eq!(config.screen.width, 1280.0);
        assert_eq!(config.hostname, "lovelace");
        assert_eq!(config.user, "ada");
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn undersized_screens_are_rejected() {
        let cli = Cli::parse_from(["portfolio-desk", "--width", "100"]);
        assert!(matches!(
            DesktopConfig::try_from(&cli),
            Err(ConfigError::ScreenTooSmall { .. })
        ));
    }
}
