use super::task::Task;
use super::task_result::{Outcome, TaskResult};
use log::debug;
use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

pub const DEFAULT_PROGRAM: &str = "ssh";

/// Runs a task by invoking the remote-execution program as `program host argv...`.
#[derive(Clone, Debug)]
pub struct TaskExecutor {
    program: OsString,
}

impl Default for TaskExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl TaskExecutor {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Never fails: launch errors and non-zero exits become `Outcome::Failure`.
    pub async fn run(&self, task: &Task) -> TaskResult {
        debug!(
            "executor run() - task {}, host: {}",
            task.id(),
            task.host()
        );

        let mut cmd = Command::new(&self.program);
        cmd.arg(task.host())
            .args(task.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!("task {} failed to launch: {}", task.id(), e);
                return TaskResult::launch_failure(
                    task,
                    format!(
                        "failed to launch {}: {}",
                        self.program.to_string_lossy(),
                        e
                    ),
                );
            }
        };

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        capture(task, stdout_pipe, stderr_pipe, child.wait()).await
    }
}

/// Drains both pipes while waiting for the process; reading one after the
/// other deadlocks once the unread pipe's buffer fills.
async fn capture<O, E, W>(
    task: &Task,
    stdout: Option<O>,
    stderr: Option<E>,
    wait: W,
) -> TaskResult
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
    W: Future<Output = io::Result<ExitStatus>>,
{
    let (stdout, stderr, status) = tokio::join!(
        drain(stdout, task, "stdout"),
        drain(stderr, task, "stderr"),
        wait
    );

    let outcome = match status {
        Ok(status) if status.success() => Outcome::Success,
        Ok(status) => Outcome::Failure(describe_exit(status)),
        Err(e) => Outcome::Failure(format!("failed to wait for process: {}", e)),
    };

    debug!("task {} ({}) finished: {:?}", task.id(), task.host(), outcome);
    TaskResult::new(task, outcome, stdout, stderr)
}

/// Reads a pipe to the end. A read error discards the whole stream.
async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>, task: &Task, stream: &str) -> Vec<u8> {
    let mut buf = Vec::new();

    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf).await {
            debug!(
                "task {} ({}): discarding {} after read error: {}",
                task.id(),
                task.host(),
                stream,
                e
            );
            buf.clear();
        }
    }

    buf
}

fn describe_exit(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {}", signal);
        }
    }

    status.to_string()
}
