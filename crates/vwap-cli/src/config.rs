//! Runtime settings resolved from CLI flags and the environment.

use std::env;

use vwap_core::AggregationOptions;

use crate::cli::Cli;

/// Log filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "VWAP_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "vwap_core=debug,vwap=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub aggregation: AggregationOptions,
    pub log_filter: String,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli, |key| env::var(key).ok())
    }

    fn resolve(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            aggregation: AggregationOptions::default().with_zero_volume(cli.zero_volume.into()),
            log_filter: resolve_log_filter(cli.verbose, lookup),
        }
    }
}

fn resolve_log_filter(verbose: bool, lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(LOG_ENV)
        .or_else(|| lookup("RUST_LOG"))
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| {
            let filter = if verbose {
                VERBOSE_LOG_FILTER
            } else {
                DEFAULT_LOG_FILTER
            };
            filter.to_owned()
        })
}
