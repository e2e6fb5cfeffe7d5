//! Settings for the interactive demo.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "term-dock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Draggable, dockable terminal windows"
)]
pub struct ChromeCli {
    /// Number of floating windows to open at startup.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 3)]
    pub windows: usize,

    /// Width of the dock column as a percentage of the terminal width.
    #[arg(short = 'd', long = "dock-width", value_name = "PERCENT", default_value_t = 25)]
    pub dock_width_percent: u16,

    /// Input poll interval.
    #[arg(long = "tick", value_name = "MILLIS", default_value_t = 16)]
    pub tick_millis: u64,

    /// Write tracing output here. Logging is discarded otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Start with the first window docked.
    #[arg(long = "start-docked")]
    pub start_docked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeConfig {
    pub windows: usize,
    pub dock_width_percent: u16,
    pub tick: Duration,
    pub log_file: Option<PathBuf>,
    pub start_docked: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            windows: 3,
            dock_width_percent: 25,
            tick: Duration::from_millis(16),
            log_file: None,
            start_docked: false,
        }
    }
}

impl TryFrom<&ChromeCli> for ChromeConfig {
    type Error = String;

    fn try_from(cli: &ChromeCli) -> Result<Self, Self::Error> {
        if cli.windows > 16 {
            return Err("windows must be at most 16".to_string());
        }
        if cli.dock_width_percent > 80 {
            return Err("dock width must be between 0 and 80 percent".to_string());
        }
        if !(1..=1000).contains(&cli.tick_millis) {
            return Err("tick must be between 1 and 1000 milliseconds".to_string());
        }
        Ok(Self {
            windows: cli.windows,
            dock_width_percent: cli.dock_width_percent,
            tick: Duration::from_millis(cli.tick_millis),
            log_file: cli.log_file.clone(),
            start_docked: cli.start_docked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let cli = ChromeCli::parse_from(["term-dock"]);
        assert_eq!(ChromeConfig::try_from(&cli), Ok(ChromeConfig::default()));
    }

    #[test]
    fn parses_flags() {
        let cli = ChromeCli::parse_from([
            "term-dock",
            "-w",
            "5",
            "--dock-width",
            "40",
            "--tick",
            "50",
            "--log-file",
            "/tmp/dock.log",
            "--start-docked",
        ]);
        let config = ChromeConfig::try_from(&cli).unwrap();
        assert_eq!(config.windows, 5);
        assert_eq!(config.dock_width_percent, 40);
        assert_eq!(config.tick, Duration::from_millis(50));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/dock.log")));
        assert!(config.start_docked);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let wide = ChromeCli::parse_from(["term-dock", "--dock-width", "90"]);
        assert!(ChromeConfig::try_from(&wide).is_err());
        let slow = ChromeCli::parse_from(["term-dock", "--tick", "0"]);
        assert!(ChromeConfig::try_from(&slow).is_err());
        let many = ChromeCli::parse_from(["term-dock", "-w", "17"]);
        assert!(ChromeConfig::try_from(&many).is_err());
    }
}
