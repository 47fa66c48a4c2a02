use crate::cli::Cli;
use crate::command::{remote_args, split_options};
use crate::executor::task_executor::DEFAULT_PROGRAM;
use crate::executor::Concurrency;
use crate::hosts::{parse_host_file, parse_host_string};
use crate::output::ColorChoice;
use anyhow::{bail, Context, Result};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::Path;

/// Defaults read from a YAML settings file. Command-line flags take precedence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub program: Option<String>,
    pub user: Option<String>,
    pub options: Vec<String>,
    pub workers: Option<usize>,
    pub color: Option<ColorChoice>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading settings file: {}", path.display());
        let f = std::fs::File::open(path)
            .with_context(|| format!("could not open settings file {}", path.display()))?;
        Self::from_reader(f)
            .with_context(|| format!("could not parse settings file {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let settings: Option<Settings> = serde_yaml::from_reader(reader)?;
        Ok(settings.unwrap_or_default())
    }
}

/// Everything a run needs, resolved once before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    hosts: Vec<String>,
    remote_args: Vec<String>,
    program: String,
    concurrency: Concurrency,
    color: ColorChoice,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings = match &cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Self::resolve(cli, settings)
    }

    pub fn resolve(cli: &Cli, settings: Settings) -> Result<Self> {
        let hosts = match (&cli.host_string, &cli.host_file) {
            (Some(hosts), _) => parse_host_string(hosts)?,
            (None, Some(path)) => parse_host_file(path)?,
            (None, None) => bail!("Please specify -h or -H option"),
        };

        let command = match cli.command.as_deref() {
            Some(command) if !command.is_empty() => command,
            _ if cli.list_hosts => "",
            _ => bail!("Please specify command to execute"),
        };

        let user = cli.user.as_deref().or(settings.user.as_deref());
        let options = match &cli.ssh_options {
            Some(options) => split_options(options),
            None => settings.options,
        };

        let workers = match (cli.workers, settings.workers) {
            (Some(workers), _) => Some(workers),
            (None, Some(workers)) => Some(
                NonZeroUsize::new(workers).context("`workers` in settings must be at least 1")?,
            ),
            (None, None) => None,
        };

        Ok(RunConfig {
            hosts,
            remote_args: remote_args(command, user, &options),
            program: cli
                .program
                .clone()
                .or(settings.program)
                .unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            concurrency: Concurrency::from_workers(workers),
            color: cli.color.or(settings.color).unwrap_or_default(),
        })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn remote_args(&self) -> &[String] {
        &self.remote_args
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    pub fn color(&self) -> ColorChoice {
        self.color
    }
}
