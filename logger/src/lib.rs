use std::error::Error as StdError;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, stderr, stdout, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::Sender;

/// Logs a message at the named level, formatting it like `format!`.
///
/// # Examples
///
/// ```
/// # use logger::{log, Logger, Level};
/// #
/// let mut logger = Logger::new(Level::Warning);
/// log!(logger, Debug, "hello {}", "world");
/// ```
#[macro_export]
macro_rules! log {
    ($logger: expr, $level: ident, $($arg:tt)*) => ({
        $logger.log($crate::Level::$level, format!($($arg)*))
    })
}

/// Where the lines end up.
enum Sink {
    Channel(Sender<Vec<u8>>),
    Stdout,
    Stderr,
    File { file: File, path: String },
}

impl Sink {
    fn open(path: &str) -> io::Result<Sink> {
        Ok(Sink::File {
            file: File::create(Path::new(path))?,
            path: path.to_owned(),
        })
    }

    fn emit(&mut self, line: &[u8]) -> io::Result<()> {
        match *self {
            Sink::Channel(ref tx) => tx
                .send(line.to_vec())
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "log receiver hung up")),
            Sink::Stdout => stdout().write_all(line),
            Sink::Stderr => stderr().write_all(line),
            Sink::File { ref mut file, .. } => file.write_all(line),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Sink::Channel(_) => f.write_str("Channel"),
            Sink::Stdout => f.write_str("Stdout"),
            Sink::Stderr => f.write_str("Stderr"),
            Sink::File { ref path, .. } => write!(f, "File({})", path),
        }
    }
}

impl Clone for Sink {
    fn clone(&self) -> Self {
        match *self {
            Sink::Channel(ref tx) => Sink::Channel(tx.clone()),
            Sink::Stdout => Sink::Stdout,
            Sink::Stderr => Sink::Stderr,
            // clones append to the same file, or give up on it
            Sink::File { ref path, .. } => {
                match OpenOptions::new().append(true).create(true).open(path) {
                    Ok(file) => Sink::File {
                        file: file,
                        path: path.clone(),
                    },
                    Err(_) => Sink::Stderr,
                }
            }
        }
    }
}

/// Severity of a message, from the chattiest to the most important.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Level {
    Debug,
    Verbose,
    Notice,
    Warning,
}

impl Level {
    /// Whether a logger set to this level writes messages of level `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logger::Level;
    /// #
    /// assert!(Level::Debug.contains(&Level::Warning));
    /// assert!(Level::Notice.contains(&Level::Notice));
    /// assert!(!Level::Warning.contains(&Level::Verbose));
    /// ```
    pub fn contains(&self, other: &Level) -> bool {
        self <= other
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown log level {:?}", self.0)
    }
}

impl StdError for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Case-insensitive level names, as written in configuration files.
    ///
    /// ```
    /// # use logger::Level;
    /// #
    /// assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warning);
    /// assert!("loud".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Level, ParseLevelError> {
        match &*s.to_ascii_lowercase() {
            "debug" => Ok(Level::Debug),
            "verbose" => Ok(Level::Verbose),
            "notice" => Ok(Level::Notice),
            "warning" => Ok(Level::Warning),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

/// A leveled logger.  Each message becomes one line, written on the caller's thread.
#[derive(Clone, Debug)]
pub struct Logger {
    level: Level,
    sink: Sink,
}

impl Logger {
    /// A logger writing to the standard output.
    pub fn new(level: Level) -> Self {
        Logger {
            level: level,
            sink: Sink::Stdout,
        }
    }

    /// A logger writing to the standard error.
    pub fn new_err(level: Level) -> Self {
        Logger {
            level: level,
            sink: Sink::Stderr,
        }
    }

    /// A logger sending every line to `tx`.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// # use std::sync::mpsc::channel;
    /// #
    /// let (tx, rx) = channel();
    /// let mut logger = Logger::channel(Level::Debug, tx);
    /// logger.log(Level::Debug, "hello world".to_owned());
    /// assert_eq!(rx.recv().unwrap(), b"hello world\n".to_vec());
    /// ```
    pub fn channel(level: Level, tx: Sender<Vec<u8>>) -> Self {
        Logger {
            level: level,
            sink: Sink::Channel(tx),
        }
    }

    /// A logger writing to a freshly created file at `path`.
    pub fn file(level: Level, path: &str) -> io::Result<Self> {
        Ok(Logger {
            level: level,
            sink: Sink::open(path)?,
        })
    }

    /// Redirects the output to a freshly created file at `path`.
    pub fn set_logfile(&mut self, path: &str) -> io::Result<()> {
        self.sink = Sink::open(path)?;
        Ok(())
    }

    pub fn set_loglevel(&mut self, level: Level) {
        self.level = level;
    }

    pub fn loglevel(&self) -> Level {
        self.level
    }

    /// Whether a message at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        self.level.contains(&level)
    }

    /// Writes `msg` as one line if `level` is enabled.  Lines which cannot be written are reported
    /// on the standard error.
    pub fn log(&mut self, level: Level, msg: String) {
        if !self.enabled(level) {
            return;
        }
        let line = format!("{}\n", msg);
        if let Err(e) = self.sink.emit(line.as_bytes()) {
            let _ = write!(stderr(), "Failed to log {:?} {}", e, line);
        }
    }
}
