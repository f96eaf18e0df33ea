use crate::config::TelemetryConfig;
use std::borrow::Cow;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "log filter '{value}' is not a level or directive list")
            }
            TelemetryError::Subscriber(err) => write!(f, "log subscriber not installed: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Installs the global fmt subscriber on stderr. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// Like [`init`], but quietly keeps an already-installed subscriber. Used by CLI
/// subcommands that may run inside a process that configured tracing itself.
pub fn try_init_quiet(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    match init(config) {
        Ok(()) | Err(TelemetryError::Subscriber(_)) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Targets a bare level applies to. Everything else stays at `warn`.
const MEDISYNC_TARGETS: [&str; 2] = ["medisync", "medisync_api"];

/// A bare level such as `debug` is scoped to the MediSync crates so dependency
/// chatter (hyper, tower) stays quiet. Full directive lists pass through untouched.
fn scoped_directives(log_level: &str) -> Cow<'_, str> {
    let level = log_level.trim();
    if level.is_empty() || level.contains('=') || level.contains(',') {
        return Cow::Borrowed(log_level);
    }

    let scoped: Vec<String> = MEDISYNC_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    Cow::Owned(format!("warn,{}", scoped.join(",")))
}

fn configured_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(scoped_directives(&config.log_level)).map_err(|source| {
        TelemetryError::EnvFilter {
            value: config.log_level.clone(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_accepts_directives() {
        let config = TelemetryConfig {
            log_level: "info,medisync=debug".to_string(),
        };
        assert!(configured_filter(&config).is_ok());
    }

    #[test]
    fn bare_level_is_scoped_to_medisync_crates() {
        assert_eq!(
            scoped_directives("debug"),
            "warn,medisync=debug,medisync_api=debug"
        );
        assert_eq!(scoped_directives("info,hyper=warn"), "info,hyper=warn");

        let config = TelemetryConfig {
            log_level: "trace".to_string(),
        };
        assert!(configured_filter(&config).is_ok());
    }

    #[test]
    fn configured_filter_reports_invalid_level() {
        let config = TelemetryConfig {
            log_level: "medisync=verbose".to_string(),
        };
        let error = configured_filter(&config).expect_err("filter should not parse");
        assert!(error.to_string().contains("medisync=verbose"));

        let config = TelemetryConfig {
            log_level: "loud".to_string(),
        };
        let error = configured_filter(&config).expect_err("bare word is not a level");
        assert!(error.to_string().contains("'loud'"));
    }
}
