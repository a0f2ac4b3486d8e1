/// Crate-level constants
pub const CRATE_NAME: &str = "geosift";
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset: quiet dependencies,
/// verbose extraction internals.
pub fn default_log_filter() -> String {
    format!("info,{CRATE_NAME}=debug")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_covers_crate() {
        let filter = default_log_filter();
        assert!(filter.contains(CRATE_NAME));
        assert!(filter.starts_with("info"));
    }

    #[test]
    fn version_matches_cargo() {
        assert_eq!(CRATE_VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!CRATE_VERSION.is_empty());
    }
}
