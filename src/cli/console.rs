use std::io::{BufRead, Write};

/// Line-oriented terminal used by the session loop.
///
/// Keeping the loop behind this trait lets it run against in-memory buffers.
pub trait Console {
    /// Next line of input without the trailing newline; `None` at end of input.
    fn read_line(&mut self) -> std::io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> std::io::Result<()>;

    /// Print `message` without a newline and flush.
    fn prompt(&mut self, message: &str) -> std::io::Result<()>;

    fn ask(&mut self, message: &str) -> std::io::Result<Option<String>> {
        self.prompt(message)?;
        self.read_line()
    }
}

/// A console over any buffered reader and writer.
pub struct IoConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    fn prompt(&mut self, message: &str) -> std::io::Result<()> {
        write!(self.output, "{}", message)?;
        self.output.flush()
    }
}

/// Console bound to the process's stdin and stdout.
pub fn stdio_console() -> IoConsole<std::io::StdinLock<'static>, std::io::Stdout> {
    IoConsole::new(std::io::stdin().lock(), std::io::stdout())
}
