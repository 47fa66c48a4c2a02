pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod hosts;
pub mod output;

use crate::config::RunConfig;
use crate::executor::{Dispatcher, TaskExecutor};
use crate::output::{OutputSink, Palette, ResultFormatter};
use anyhow::Result;
use log::{debug, info};
use std::io::{self, Write};

pub fn dispatcher(config: &RunConfig, sink: OutputSink) -> Dispatcher {
    Dispatcher::new(
        TaskExecutor::new(config.program()),
        ResultFormatter::new(Palette::from_choice(config.color())),
        sink,
    )
    .with_concurrency(config.concurrency())
}

/// Dispatches the configured command to every host and waits for all results.
pub async fn run(config: &RunConfig, sink: OutputSink) -> Result<()> {
    let dispatcher = dispatcher(config, sink);
    let synchronizer = dispatcher.dispatch(config.hosts(), config.remote_args())?;
    let expected = synchronizer.expected();

    synchronizer.wait().await;
    info!("all {} hosts reported", expected);

    Ok(())
}

/// Writes one host per line. A closed reader (e.g. `| head -1`) ends the listing quietly.
pub fn list_hosts<W: Write>(hosts: &[String], mut writer: W) -> io::Result<()> {
    let result = hosts
        .iter()
        .try_for_each(|host| writeln!(writer, "{}", host))
        .and_then(|_| writer.flush());

    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("host listing stopped: {}", e);
            Ok(())
        }
        other => other,
    }
}
