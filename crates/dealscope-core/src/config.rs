use crate::record::Source;
use crate::ConfigError;

/// Runtime configuration for the scrape pipeline.
///
/// Every variable has a default; an empty environment yields a fully
/// working configuration scraping all five sites.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Log filter string handed to the embedding application
    /// (this library never installs a subscriber itself).
    pub log_level: String,
    /// Sites visited when a run does not name its own selection.
    pub sources: Vec<Source>,
    /// Records with a normalized price below this are dropped from the
    /// merged result set. Rejects nonsensical/placeholder prices.
    pub price_floor: u64,
    /// Global overrides applied on top of the per-site profile tables.
    pub tuning: SiteTuning,
}

/// Optional global overrides for per-site profile values.
///
/// Site profiles carry tuned defaults (settle waits, container caps); these
/// knobs exist because the "correct" values drift with site behavior and
/// should be adjustable without a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteTuning {
    /// When set, replaces every site's settle-wait bounds (milliseconds).
    pub settle_ms: Option<(u64, u64)>,
    /// When set, caps the number of containers scanned per site.
    pub max_containers: Option<usize>,
}

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading.
///
/// # Errors
///
/// Returns [`ConfigError`] if a variable holds an unparseable value.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from variables already present in the process.
///
/// Unlike [`load_config`], this does NOT read `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns [`ConfigError`] if a variable holds an unparseable value.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration from the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so
/// tests can drive it with a plain `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_opt_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let parse_opt_usize = |var: &str| -> Result<Option<usize>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<usize>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let log_level = or_default("DEALSCOPE_LOG_LEVEL", "info");

    let sources = match lookup("DEALSCOPE_SOURCES") {
        Ok(raw) => parse_sources(&raw)?,
        Err(_) => Source::ALL.to_vec(),
    };

    let price_floor = parse_u64("DEALSCOPE_PRICE_FLOOR", "10")?;

    let settle_min = parse_opt_u64("DEALSCOPE_SETTLE_MIN_MS")?;
    let settle_max = parse_opt_u64("DEALSCOPE_SETTLE_MAX_MS")?;
    let settle_ms = match (settle_min, settle_max) {
        (None, None) => None,
        (Some(min), Some(max)) if min <= max => Some((min, max)),
        (Some(_), Some(_)) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "DEALSCOPE_SETTLE_MAX_MS".to_string(),
                reason: "must be >= DEALSCOPE_SETTLE_MIN_MS".to_string(),
            })
        }
        _ => {
            return Err(ConfigError::InvalidEnvVar {
                var: "DEALSCOPE_SETTLE_MIN_MS".to_string(),
                reason: "DEALSCOPE_SETTLE_MIN_MS and DEALSCOPE_SETTLE_MAX_MS must be set together"
                    .to_string(),
            })
        }
    };

    let max_containers = parse_opt_usize("DEALSCOPE_MAX_CONTAINERS")?;

    Ok(AppConfig {
        log_level,
        sources,
        price_floor,
        tuning: SiteTuning {
            settle_ms,
            max_containers,
        },
    })
}

/// Parse a comma-separated source list. Unknown tokens are an error rather
/// than being silently skipped — a typo must not quietly shrink coverage.
fn parse_sources(raw: &str) -> Result<Vec<Source>, ConfigError> {
    let mut sources = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let source: Source = token.parse().map_err(|e| ConfigError::InvalidEnvVar {
            var: "DEALSCOPE_SOURCES".to_string(),
            reason: format!("{e}"),
        })?;
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    if sources.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALSCOPE_SOURCES".to_string(),
            reason: "no sources listed".to_string(),
        });
    }
    Ok(sources)
}
