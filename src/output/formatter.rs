use super::palette::Palette;
use super::sink::OutputSink;
use crate::executor::{Outcome, TaskResult};
use log::warn;

const TIME_FORMAT: &str = "%H:%M:%S";

/// Renders task results as blocks like:
///
/// ```text
/// [1] 15:04:00 [SUCCESS] web1.example.com
/// [0] 21:18:57 [FAILURE] db1.example.com exit status 127
/// ```
///
/// followed by optional `Stdout:` and `Stderr:` sections.
#[derive(Clone, Debug)]
pub struct ResultFormatter {
    palette: Palette,
}

impl ResultFormatter {
    pub fn new(palette: Palette) -> Self {
        ResultFormatter { palette }
    }

    pub fn render(&self, result: &TaskResult) -> String {
        let palette = &self.palette;

        let status = match result.outcome() {
            Outcome::Success => format!("{} {}", palette.success(), result.host()),
            Outcome::Failure(detail) => format!(
                "{} {} {}",
                palette.failure(),
                result.host(),
                palette.failure_detail(detail)
            ),
        };

        let mut block = format!(
            "{} {} {}",
            palette.task_id(result.task_id()),
            result.completed_at().format(TIME_FORMAT),
            status
        );

        if !result.stdout().is_empty() {
            block.push('\n');
            block.push_str(&palette.stdout_label());
            block.push(' ');
            block.push_str(&String::from_utf8_lossy(result.stdout()));
        }

        if !result.stderr().is_empty() {
            if !block.ends_with('\n') {
                block.push('\n');
            }
            block.push_str(&palette.stderr_label());
            block.push(' ');
            block.push_str(&String::from_utf8_lossy(result.stderr()));
        }

        if !block.ends_with('\n') {
            block.push('\n');
        }

        block
    }

    /// Renders outside the sink lock, then writes the block in one piece.
    pub fn emit(&self, result: TaskResult, sink: &OutputSink) {
        let block = self.render(&result);
        if let Err(e) = sink.write_block(&block) {
            warn!(
                "failed to write result of task {} ({}): {}",
                result.task_id(),
                result.host(),
                e
            );
        }
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(Palette::plain())
    }
}
