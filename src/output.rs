pub mod formatter;
pub mod palette;
pub mod sink;

pub use formatter::ResultFormatter;
pub use palette::{ColorChoice, Palette};
pub use sink::OutputSink;
