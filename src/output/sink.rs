use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Shared destination for rendered blocks. Each block is written and flushed
/// while holding the lock, so blocks from concurrent tasks never interleave.
pub struct OutputSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl OutputSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        OutputSink {
            writer: Mutex::new(writer),
        }
    }

    pub fn stdout() -> Self {
        OutputSink::new(Box::new(io::stdout()))
    }

    pub fn write_block(&self, block: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(block.as_bytes())?;
        writer.flush()
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        OutputSink::stdout()
    }
}
