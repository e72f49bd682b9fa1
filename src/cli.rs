use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobwatch")]
#[command(version, about = "Forward new nonprofit job listings to a Telegram chat")]
#[command(
    long_about = "Fetches the job board once, keeps the listings updated since the last successful run, and sends each one to a Telegram chat. Meant to be run from a scheduler such as cron."
)]
pub struct Cli {
    /// Path to the TOML config file (defaults to $XDG_CONFIG_HOME/jobwatch/config.toml)
    #[arg(short = 'f', long = "file-name", value_name = "PATH")]
    pub file_name: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_and_long_flag() {
        let cli = Cli::try_parse_from(["jobwatch", "-f", "conf.toml"]).unwrap();
        assert_eq!(cli.file_name, Some(PathBuf::from("conf.toml")));

        let cli = Cli::try_parse_from(["jobwatch", "--file-name", "other.toml"]).unwrap();
        assert_eq!(cli.file_name, Some(PathBuf::from("other.toml")));
    }

    #[test]
    fn test_flag_is_optional() {
        let cli = Cli::try_parse_from(["jobwatch"]).unwrap();
        assert!(cli.file_name.is_none());
    }

    #[test]
    fn test_unknown_flags_rejected() {
        assert!(Cli::try_parse_from(["jobwatch", "--dry-run"]).is_err());
    }
}
