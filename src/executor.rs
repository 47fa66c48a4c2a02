pub mod dispatcher;
pub mod synchronizer;
pub mod task;
pub mod task_executor;
pub mod task_result;

pub use dispatcher::{Concurrency, Dispatcher};
pub use synchronizer::{CompletionToken, Synchronizer};
pub use task::Task;
pub use task_executor::TaskExecutor;
pub use task_result::{Outcome, TaskResult};
