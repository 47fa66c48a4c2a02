use sshfan::output::OutputSink;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory writer shared between the sink and the test.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn sink(&self) -> OutputSink {
        OutputSink::new(Box::new(self.clone()))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Short writes make any missing lock around a block show up as interleaving.
        let n = buf.len().min(7);
        self.0.lock().unwrap().extend_from_slice(&buf[..n]);
        std::thread::yield_now();
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes an executable shell script standing in for `ssh`. It receives the
/// host as `$1` and the remote arguments after it.
pub fn mock_remote(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("mock-ssh");
    std::fs::write(&path, format!("#!/bin/sh\nhost=\"$1\"\nshift\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn hosts(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

/// Splits sink output into blocks, each starting at a `[id] ` header line.
pub fn blocks(output: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    for line in output.lines() {
        if line.starts_with('[') && line.contains("] ") && is_header(line) {
            blocks.push(String::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push_str(line);
            block.push('\n');
        }
    }
    blocks
}

fn is_header(line: &str) -> bool {
    line.contains("[SUCCESS]") || line.contains("[FAILURE]")
}

pub fn block_id(block: &str) -> usize {
    let end = block.find(']').unwrap();
    block[1..end].parse().unwrap()
}
