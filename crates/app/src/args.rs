use std::fmt;
use std::time::Duration;

use services::DEFAULT_LOAD_DELAY;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDelay { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--catalog <path|url>] [--delay-ms <ms>] [--seed <n>] [--fail-load]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --catalog  built-in questions");
    eprintln!("  --delay-ms {}", DEFAULT_LOAD_DELAY.as_millis());
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG, QUIZ_LOAD_DELAY_MS, QUIZ_SEED, QUIZ_FAIL_LOAD, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub catalog: Option<String>,
    pub load_delay: Duration,
    pub seed: Option<u64>,
    pub fail_load: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            catalog: None,
            load_delay: DEFAULT_LOAD_DELAY,
            seed: None,
            fail_load: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Run(Args),
    Help,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_delay(raw: String) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidDelay { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Args {
    /// Parse flags, falling back to environment variables read through `env`.
    ///
    /// Flags win over the environment. Invalid environment values are errors too, so
    /// a typo never silently falls back to a default.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut parsed = Args {
            catalog: env("QUIZ_CATALOG").filter(|value| !value.trim().is_empty()),
            ..Args::default()
        };
        if let Some(raw) = env("QUIZ_LOAD_DELAY_MS") {
            parsed.load_delay = parse_delay(raw)?;
        }
        if let Some(raw) = env("QUIZ_SEED") {
            parsed.seed = Some(parse_seed(raw)?);
        }
        if let Some(raw) = env("QUIZ_FAIL_LOAD") {
            parsed.fail_load = is_truthy(&raw);
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => parsed.catalog = Some(require_value(&mut args, "--catalog")?),
                "--delay-ms" => {
                    parsed.load_delay = parse_delay(require_value(&mut args, "--delay-ms")?)?;
                }
                "--seed" => parsed.seed = Some(parse_seed(require_value(&mut args, "--seed")?)?),
                "--fail-load" => parsed.fail_load = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(parsed))
    }
}
