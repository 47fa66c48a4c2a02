use super::task::Task;
use chrono::{DateTime, Local};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(detail) => Some(detail),
        }
    }
}

/// Completed outcome of one task, produced once its process has exited and
/// both output streams are drained.
#[derive(Clone, Debug)]
pub struct TaskResult {
    task_id: usize,
    host: String,
    outcome: Outcome,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    completed_at: DateTime<Local>,
}

impl TaskResult {
    pub fn new(task: &Task, outcome: Outcome, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        TaskResult {
            task_id: task.id(),
            host: task.host().to_string(),
            outcome,
            stdout,
            stderr,
            completed_at: Local::now(),
        }
    }

    pub fn launch_failure(task: &Task, detail: String) -> Self {
        TaskResult::new(task, Outcome::Failure(detail), Vec::new(), Vec::new())
    }

    #[cfg(test)]
    pub(crate) fn with_completed_at(mut self, completed_at: DateTime<Local>) -> Self {
        self.completed_at = completed_at;
        self
    }

    pub fn task_id(&self) -> usize {
        self.task_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    pub fn completed_at(&self) -> DateTime<Local> {
        self.completed_at
    }
}
