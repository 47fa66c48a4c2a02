use anyhow::Result;
use clap::Parser;
use sshfan::cli::Cli;
use sshfan::config::RunConfig;
use sshfan::output::OutputSink;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli)?;

    if cli.list_hosts {
        sshfan::list_hosts(config.hosts(), std::io::stdout().lock())?;
        return Ok(());
    }

    sshfan::run(&config, OutputSink::stdout()).await
}
