//! Colored terminal output for publishing runs

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    /// Write one line prefixed by a colored marker
    fn marked(&self, marker: &str, spec: &ColorSpec, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(spec);
        let _ = write!(&mut buffer, "{}", marker);
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        );
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.marked(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        );
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = writeln!(&mut buffer, "═══ {} ═══", title);
        let _ = buffer.reset();
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        self.println(&format!("    {}", message));
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        let _ = self.bufwtr.print(&buffer);
    }
}
