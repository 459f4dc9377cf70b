//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources override these key by key; lists are replaced, not appended.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("runner.invocation_prefix", "x run")?
        .set_default("runner.timeout_secs", 30_i64)?
        .set_default("runner.default_page_size", 5_i64)?
        .set_default("templates.sources", Vec::<String>::new())
}
