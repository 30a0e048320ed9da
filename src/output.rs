
use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Stdout, Write},
    path::{Path, PathBuf},
};

/// Standard output, which is shared with the rest of the process.
///
/// Releasing it only flushes, the stream stays usable for later writers.
#[derive(Debug)]
pub struct SharedStdout(Stdout);

impl Write for SharedStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl Drop for SharedStdout {
    fn drop(&mut self) {
        let _ = self.0.flush();
    }
}

/// Destination for compiler output.
///
/// Dropping the sink releases it: standard output is flushed, a file is
/// flushed and closed. Use [`OutputSink::release`] to observe flush errors.
#[derive(Debug)]
pub enum OutputSink {
    Stdout(SharedStdout),
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
}

impl OutputSink {
    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputSink::Stdout(_))
    }

    pub fn release(self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(mut stdout) => stdout.flush(),
            OutputSink::File { writer, .. } => {
                let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
                drop(file);
                Ok(())
            }
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(stdout) => stdout.write(buf),
            OutputSink::File { writer, .. } => writer.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            OutputSink::Stdout(stdout) => stdout.write_all(buf),
            OutputSink::File { writer, .. } => writer.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(stdout) => stdout.flush(),
            OutputSink::File { writer, .. } => writer.flush(),
        }
    }
}

impl Display for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSink::Stdout(_) => write!(f, "stdout"),
            OutputSink::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Opens the output file, creating or truncating it, or falls back to stdout.
pub fn resolve(path: Option<&Path>) -> io::Result<OutputSink> {
    let Some(path) = path else {
        return Ok(OutputSink::Stdout(SharedStdout(io::stdout())));
    };
    let file = File::create(path)?;
    Ok(OutputSink::File {
        path: path.to_owned(),
        writer: BufWriter::new(file),
    })
}
