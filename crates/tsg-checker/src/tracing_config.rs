//! Log output for the checker.
//!
//! Nothing is installed unless a filter is configured. `TSG_LOG` holds the
//! filter directives (`RUST_LOG` is read when it is absent) and
//! `TSG_LOG_FORMAT` picks the layout:
//!
//! | value  | layout                          |
//! |--------|---------------------------------|
//! | `text` | one line per event (default)    |
//! | `tree` | events nested under their spans |
//! | `json` | one JSON object per line        |
//!
//! The engine logs clone creation and evictions at `debug`, cache hits and
//! link edits at `trace`:
//!
//! ```bash
//! TSG_LOG=tsg_solver=debug TSG_LOG_FORMAT=tree cargo test -p tsg-checker
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Logging settings taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter directives such as `tsg_solver=debug,tsg_symbols=trace`.
    pub directives: String,
    pub format: LogFormat,
}

impl TracingConfig {
    /// `None` when neither `TSG_LOG` nor `RUST_LOG` is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = lookup("TSG_LOG").or_else(|| lookup("RUST_LOG"))?;
        let format = lookup("TSG_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Some(Self { directives, format })
    }

    /// Install as the global subscriber, writing to stderr. Fails when a
    /// subscriber is already installed.
    pub fn install(&self) -> Result<(), TryInitError> {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);
        let tree = (self.format == LogFormat::Tree).then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true)
        });
        let json = (self.format == LogFormat::Json)
            .then(|| fmt::layer().json().with_writer(std::io::stderr));
        let text =
            (self.format == LogFormat::Text).then(|| fmt::layer().with_writer(std::io::stderr));

        Registry::default()
            .with(filter)
            .with(tree)
            .with(json)
            .with(text)
            .try_init()
    }
}

/// Install logging if the environment asks for it. Safe to call from
/// every test; only the first call in a process installs anything.
pub fn init_tracing() {
    let Some(config) = TracingConfig::from_env() else {
        return;
    };
    if let Err(err) = config.install() {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
