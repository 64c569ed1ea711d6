use crate::config::toml_config::TomlConfig;
use crate::config::{select_regions, WatcherConfig, BUCKET_ENV, DEFAULT_INTERVAL_MINUTES, WEBHOOK_URL_ENV};
use crate::utils::error::{Result, WatcherError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "aws-service-watcher")]
#[command(about = "Notify a Slack channel when new AWS services appear in a region")]
pub struct CliConfig {
    /// S3 bucket holding `<region>/services.json` snapshots
    #[arg(long, env = BUCKET_ENV)]
    pub bucket: Option<String>,

    #[arg(long, env = WEBHOOK_URL_ENV, hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Keep snapshots in a local directory instead of S3
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Only check these regions (comma separated)
    #[arg(long = "region", value_delimiter = ',')]
    pub regions: Vec<String>,

    #[arg(long, help = "TOML config file with a [watcher] table")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Keep running and check every --interval-minutes")]
    pub watch: bool,

    #[arg(long)]
    pub interval_minutes: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<WatcherConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        }
        .watcher;

        let webhook_url = self
            .webhook_url
            .clone()
            .or(file.webhook_url)
            .ok_or_else(|| WatcherError::MissingConfigError {
                field: WEBHOOK_URL_ENV.to_string(),
            })?;

        let region_codes = if self.regions.is_empty() {
            file.regions.unwrap_or_default()
        } else {
            self.regions.clone()
        };

        let mut config = WatcherConfig::new(self.bucket.clone().or(file.bucket), webhook_url)
            .with_regions(select_regions(&region_codes)?);
        config.state_dir = self
            .state_dir
            .clone()
            .or_else(|| file.state_dir.map(PathBuf::from));
        config.interval_minutes = self
            .interval_minutes
            .or(file.interval_minutes)
            .unwrap_or(DEFAULT_INTERVAL_MINUTES);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["aws-service-watcher"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_resolve_from_arguments() {
        let cli = parse(&[
            "--bucket",
            "service-watcher-state",
            "--webhook-url",
            "https://hooks.example.com/x",
            "--region",
            "us-east-1,us-east-2",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.bucket.as_deref(), Some("service-watcher-state"));
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.interval_minutes, DEFAULT_INTERVAL_MINUTES);
    }

    #[test]
    fn test_arguments_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[watcher]
bucket = "from-file"
webhook_url = "https://hooks.example.com/file"
regions = ["us-west-1"]
interval_minutes = 10"#
        )
        .unwrap();

        let cli = parse(&[
            "--config",
            file.path().to_str().unwrap(),
            "--bucket",
            "from-args",
            "--interval-minutes",
            "5",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.bucket.as_deref(), Some("from-args"));
        assert_eq!(config.webhook_url, "https://hooks.example.com/file");
        assert_eq!(config.regions[0].code, "us-west-1");
        assert_eq!(config.interval_minutes, 5);
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let cli = parse(&[
            "--webhook-url",
            "https://hooks.example.com/x",
            "--region",
            "mars-north-1",
        ]);
        assert!(matches!(
            cli.resolve(),
            Err(WatcherError::InvalidConfigValueError { .. })
        ));
    }
}
