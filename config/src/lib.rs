use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Error as IOError;
use std::path::Path;
use std::str::FromStr;

use logger::{Level, Logger};

/// Number of levels a freshly constructed set starts with.
pub const DEFAULT_INITIAL_LEVELS: usize = 8;

/// Settings for a skip-list set, usually read from a file of `directive value` lines:
///
/// ```text
/// # levels used before the first insertion
/// initial-levels 8
/// seed 42
/// loglevel verbose
/// logfile ""
/// include more.conf
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub initial_levels: usize,
    pub seed: Option<u64>,
    pub loglevel: Level,
    pub logfile: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    InvalidParameter,
    UnknownDirective(String),
    IOError(IOError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidFormat => f.write_str("invalid configuration line"),
            ConfigError::InvalidParameter => f.write_str("invalid configuration value"),
            ConfigError::UnknownDirective(ref name) => {
                write!(f, "unknown configuration directive {:?}", name)
            }
            ConfigError::IOError(ref e) => write!(f, "cannot read configuration: {}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::IOError(ref e) => Some(e),
            _ => None,
        }
    }
}

/// Splits a configuration line into whitespace separated arguments. Arguments may be wrapped in
/// double quotes, in which case `\"` and `\\` are unescaped.
fn splitargs(line: &str) -> Result<Vec<String>, ConfigError> {
    let mut args = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }
        let first = match chars.next() {
            Some(c) => c,
            None => break,
        };
        let mut current = String::new();
        if first == '"' {
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some(escaped) => current.push(escaped),
                        None => return Err(ConfigError::InvalidFormat),
                    },
                    c => current.push(c),
                }
            }
            // closing quote must be followed by a space or nothing at all
            if !closed || chars.peek().map_or(false, |c| !c.is_whitespace()) {
                return Err(ConfigError::InvalidFormat);
            }
        } else {
            current.push(first);
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                current.push(c);
                chars.next();
            }
        }
        args.push(current);
    }
    Ok(args)
}

fn read_string(args: &[String]) -> Result<String, ConfigError> {
    if args.len() != 2 {
        Err(ConfigError::InvalidFormat)
    } else {
        Ok(args[1].clone())
    }
}

fn read_parse<T>(args: &[String]) -> Result<T, ConfigError>
where
    T: FromStr,
{
    let s = read_string(args)?;
    match s.parse() {
        Ok(f) => Ok(f),
        Err(_) => Err(ConfigError::InvalidParameter),
    }
}

impl Config {
    pub fn new() -> Config {
        Config {
            initial_levels: DEFAULT_INITIAL_LEVELS,
            seed: None,
            loglevel: Level::Notice,
            logfile: None,
        }
    }

    /// Applies every directive in the file at `fname`.
    pub fn parsefile<P: AsRef<Path>>(&mut self, fname: P) -> Result<(), ConfigError> {
        let file = BufReader::new(File::open(fname.as_ref())?);
        for line in file.lines() {
            self.parseline(&line?)?;
        }
        Ok(())
    }

    /// Applies every directive in `text`.
    pub fn parse_str(&mut self, text: &str) -> Result<(), ConfigError> {
        for line in text.lines() {
            self.parseline(line)?;
        }
        Ok(())
    }

    fn parseline(&mut self, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let args = splitargs(line)?;
        match &*args[0] {
            "initial-levels" => {
                let levels = read_parse(&args)?;
                if levels == 0 {
                    return Err(ConfigError::InvalidParameter);
                }
                self.initial_levels = levels;
            }
            "seed" => self.seed = Some(read_parse(&args)?),
            "loglevel" => self.loglevel = read_parse(&args)?,
            "logfile" => {
                let path = read_string(&args)?;
                self.logfile = if path.is_empty() { None } else { Some(path) };
            }
            "include" => self.parsefile(read_string(&args)?)?,
            name => return Err(ConfigError::UnknownDirective(name.to_owned())),
        }
        Ok(())
    }

    /// Builds the logger described by `loglevel` and `logfile`. Without a log file messages go to
    /// the standard output.
    pub fn logger(&self) -> Result<Logger, IOError> {
        match self.logfile {
            Some(ref path) => Logger::file(self.loglevel, path),
            None => Ok(Logger::new(self.loglevel)),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> ConfigError {
        ConfigError::IOError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::random;
    use std::env::temp_dir;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(contents: &[u8]) -> PathBuf {
        let filepath = temp_dir().join(format!("{}.conf", random::<u64>()));
        File::create(&filepath).unwrap().write_all(contents).unwrap();
        filepath
    }

    macro_rules! config {
        ($str: expr) => {{
            let filepath = write_config($str);
            let mut config = Config::new();
            config.parsefile(&filepath).unwrap();
            config
        }};
    }

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.initial_levels, 8);
        assert_eq!(config.seed, None);
        assert_eq!(config.loglevel, Level::Notice);
        assert_eq!(config.logfile, None);
    }

    #[test]
    fn parse_initial_levels() {
        let config = config!(b"initial-levels 12");
        assert_eq!(config.initial_levels, 12);
    }

    #[test]
    fn parse_seed() {
        let config = config!(b"seed 12345");
        assert_eq!(config.seed, Some(12345));
    }

    #[test]
    fn parse_seed_quotes() {
        let config = config!(b"seed \"123\"");
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn parse_loglevel() {
        let config = config!(b"loglevel verbose");
        assert_eq!(config.loglevel, Level::Verbose);
    }

    #[test]
    fn parse_logfile() {
        let config = config!(b"logfile /tmp/skipset.log");
        assert_eq!(config.logfile, Some("/tmp/skipset.log".to_owned()));
        let config = config!(b"logfile /tmp/skipset.log\nlogfile \"\"");
        assert_eq!(config.logfile, None);
    }

    #[test]
    fn parse_comments_and_blank_lines() {
        let config = config!(b"# a comment\n\n   \ninitial-levels 3\n  # indented comment\nseed 9");
        assert_eq!(config.initial_levels, 3);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn parse_include() {
        let included = write_config(b"seed 77\nloglevel debug");
        let text = format!("initial-levels 4\ninclude \"{}\"", included.display());
        let config = config!(text.as_bytes());
        assert_eq!(config.initial_levels, 4);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.loglevel, Level::Debug);
    }

    #[test]
    fn parse_str_directives() {
        let mut config = Config::new();
        config.parse_str("seed 5\ninitial-levels 2").unwrap();
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.initial_levels, 2);
    }

    #[test]
    fn reject_zero_levels() {
        let mut config = Config::new();
        match config.parse_str("initial-levels 0") {
            Err(ConfigError::InvalidParameter) => (),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
        assert_eq!(config.initial_levels, 8);
    }

    #[test]
    fn reject_bad_values() {
        let mut config = Config::new();
        assert!(matches!(config.parse_str("seed x"), Err(ConfigError::InvalidParameter)));
        assert!(matches!(config.parse_str("loglevel loud"), Err(ConfigError::InvalidParameter)));
        assert!(matches!(config.parse_str("seed 1 2"), Err(ConfigError::InvalidFormat)));
        assert!(matches!(config.parse_str("seed \"1"), Err(ConfigError::InvalidFormat)));
        assert!(matches!(config.parse_str("seed \"1\"2"), Err(ConfigError::InvalidFormat)));
    }

    #[test]
    fn reject_out_of_range_numbers() {
        let mut config = Config::new();
        assert!(matches!(
            config.parse_str("initial-levels 99999999999999999999999"),
            Err(ConfigError::InvalidParameter)
        ));
        assert!(matches!(config.parse_str("seed -1"), Err(ConfigError::InvalidParameter)));
        assert_eq!(config, Config::new());
    }

    #[test]
    fn reject_unknown_directive() {
        let mut config = Config::new();
        match config.parse_str("port 6379") {
            Err(ConfigError::UnknownDirective(name)) => assert_eq!(name, "port"),
            other => panic!("Expected UnknownDirective, got {:?}", other),
        }
    }

    #[test]
    fn missing_file() {
        let mut config = Config::new();
        let path = temp_dir().join(format!("missing-{}.conf", random::<u64>()));
        assert!(matches!(config.parsefile(path), Err(ConfigError::IOError(_))));
    }

    #[test]
    fn splitargs_quotes() {
        assert_eq!(splitargs("a  \"b c\" d").unwrap(), vec!["a", "b c", "d"]);
        assert_eq!(splitargs("\"\"").unwrap(), vec![""]);
        assert_eq!(splitargs("\"say \\\"hi\\\"\"").unwrap(), vec!["say \"hi\""]);
        assert!(splitargs("\"a").is_err());
    }
}
