use tracing_subscriber::EnvFilter;

/// Overrides `-v` when set, e.g. `GH_SPONSORS_LOG=gh_sponsors=trace`.
pub const LOG_ENV_VAR: &str = "GH_SPONSORS_LOG";

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8, from_env: Option<String>) -> EnvFilter {
    from_env
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbosity)))
}

/// Install a stderr logger. Stdout is reserved for command output.
pub fn init(verbosity: u8) {
    let filter = build_filter(verbosity, std::env::var(LOG_ENV_VAR).ok());
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(7), "trace");
    }

    #[test]
    fn env_filter_overrides_verbosity() {
        let filter = build_filter(0, Some("gh_sponsors=trace".into()));
        assert_eq!(filter.to_string(), "gh_sponsors=trace");
    }

    #[test]
    fn blank_env_uses_verbosity() {
        let filter = build_filter(2, Some("  ".into()));
        assert_eq!(filter.to_string(), "debug");
    }
}
