use super::synchronizer::{CompletionToken, Synchronizer};
use super::task::Task;
use super::task_executor::TaskExecutor;
use crate::error::DispatchError;
use crate::output::{OutputSink, ResultFormatter};
use log::{debug, info, warn};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Concurrency {
    /// One concurrent task per host.
    #[default]
    Unbounded,
    /// A fixed number of workers draining a task queue.
    Bounded(NonZeroUsize),
}

impl Concurrency {
    pub fn from_workers(workers: Option<NonZeroUsize>) -> Self {
        workers.map_or(Concurrency::Unbounded, Concurrency::Bounded)
    }
}

/// Fans a command out to every host and reports each result as it completes.
pub struct Dispatcher {
    executor: Arc<TaskExecutor>,
    formatter: Arc<ResultFormatter>,
    sink: Arc<OutputSink>,
    concurrency: Concurrency,
}

impl Dispatcher {
    pub fn new(executor: TaskExecutor, formatter: ResultFormatter, sink: OutputSink) -> Self {
        Dispatcher {
            executor: Arc::new(executor),
            formatter: Arc::new(formatter),
            sink: Arc::new(sink),
            concurrency: Concurrency::Unbounded,
        }
    }

    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Launches one task per host and returns without waiting for them.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn dispatch(
        &self,
        hosts: &[String],
        argv: &[String],
    ) -> Result<Synchronizer, DispatchError> {
        if hosts.is_empty() {
            return Err(DispatchError::NoHosts);
        }

        let tasks = Task::from_hosts(hosts, argv);
        let synchronizer = Synchronizer::new(tasks.len());

        info!("dispatching to {} hosts ({:?})", tasks.len(), self.concurrency);

        match self.concurrency {
            Concurrency::Unbounded => {
                for task in tasks {
                    let token = synchronizer.token();
                    tokio::spawn(run_task(
                        Arc::clone(&self.executor),
                        Arc::clone(&self.formatter),
                        Arc::clone(&self.sink),
                        task,
                        token,
                    ));
                }
            }
            Concurrency::Bounded(workers) => {
                self.spawn_workers(tasks, &synchronizer, workers.get());
            }
        }

        Ok(synchronizer)
    }

    fn spawn_workers(&self, tasks: Vec<Task>, synchronizer: &Synchronizer, workers: usize) {
        let workers = workers.min(tasks.len());
        let (sender, receiver) = mpsc::unbounded_channel();

        for task in tasks {
            // The receiver is still alive, so this cannot fail.
            let _ = sender.send((task, synchronizer.token()));
        }
        drop(sender);

        let queue = Arc::new(Mutex::new(receiver));

        for worker in 0..workers {
            let queue = Arc::clone(&queue);
            let executor = Arc::clone(&self.executor);
            let formatter = Arc::clone(&self.formatter);
            let sink = Arc::clone(&self.sink);

            tokio::spawn(async move {
                debug!("worker {} started", worker);
                loop {
                    let next = queue.lock().await.recv().await;
                    let Some((task, token)) = next else {
                        break;
                    };
                    run_task(
                        Arc::clone(&executor),
                        Arc::clone(&formatter),
                        Arc::clone(&sink),
                        task,
                        token,
                    )
                    .await;
                }
                debug!("worker {} finished", worker);
            });
        }
    }
}

async fn run_task(
    executor: Arc<TaskExecutor>,
    formatter: Arc<ResultFormatter>,
    sink: Arc<OutputSink>,
    task: Task,
    token: CompletionToken,
) {
    let result = executor.run(&task).await;

    // Writing to a slow stdout blocks under the sink lock; keep that off the
    // runtime threads that drain other hosts' pipes.
    if let Err(e) = tokio::task::spawn_blocking(move || formatter.emit(result, &sink)).await {
        warn!(
            "failed to emit result of task {} ({}): {}",
            task.id(),
            task.host(),
            e
        );
    }
    token.complete();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_rejects_empty_host_list() {
        let dispatcher = Dispatcher::new(
            TaskExecutor::default(),
            ResultFormatter::default(),
            OutputSink::new(Box::new(std::io::sink())),
        );

        let result = dispatcher.dispatch(&[], &[String::from("uptime")]);
        assert_eq!(result.err(), Some(DispatchError::NoHosts));
    }

    #[test]
    fn test_concurrency_from_workers() {
        assert_eq!(Concurrency::from_workers(None), Concurrency::Unbounded);
        let four = NonZeroUsize::new(4).unwrap();
        assert_eq!(
            Concurrency::from_workers(Some(four)),
            Concurrency::Bounded(four)
        );
    }

    #[cfg(unix)]
    mod blocked_sink {
        use super::*;
        use std::io::{self, Write};
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::{Condvar, Mutex as StdMutex};
        use std::time::Duration;

        /// Writer that blocks every write until opened.
        #[derive(Clone, Default)]
        struct Gate {
            open: Arc<(StdMutex<bool>, Condvar)>,
            entered: Arc<AtomicBool>,
        }

        impl Gate {
            fn open(&self) {
                let (lock, cvar) = &*self.open;
                *lock.lock().unwrap() = true;
                cvar.notify_all();
            }

            fn is_open(&self) -> bool {
                *self.open.0.lock().unwrap()
            }

            fn entered(&self) -> bool {
                self.entered.load(Ordering::SeqCst)
            }
        }

        impl Write for Gate {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.entered.store(true, Ordering::SeqCst);
                let (lock, cvar) = &*self.open;
                let mut open = lock.lock().unwrap();
                while !*open {
                    open = cvar.wait(open).unwrap();
                }
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        #[tokio::test]
        async fn test_blocked_sink_does_not_stall_runtime() {
            let gate = Gate::default();
            let dispatcher = Dispatcher::new(
                TaskExecutor::new("true"),
                ResultFormatter::default(),
                OutputSink::new(Box::new(gate.clone())),
            );

            // Releases the writer eventually even if the runtime is stalled.
            let fallback = gate.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_secs(5));
                fallback.open();
            });

            let synchronizer = dispatcher.dispatch(&[String::from("web1")], &[]).unwrap();

            while !gate.entered() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            assert!(
                !gate.is_open(),
                "runtime was stalled while the sink write was blocked"
            );

            gate.open();
            synchronizer.wait().await;
        }
    }
}
