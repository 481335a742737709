/// Build-time metadata exposed at runtime.
///
/// `FROZEN_RQID` and `FROZEN_BUILD_NUMBER` are captured by the build script
/// from `RQID` / `BUILD_NUMBER`, with the defaults already substituted.
pub const FROZEN_RQID: &str = env!("APP_FROZEN_RQID");
pub const FROZEN_BUILD_NUMBER: &str = env!("APP_FROZEN_BUILD_NUMBER");
pub const BUILD_COMMIT: &str = env!("APP_BUILD_COMMIT");
pub const BUILD_TIMESTAMP: &str = env!("APP_BUILD_TIMESTAMP");

/// Human-readable summary combining Cargo version and build metadata.
pub fn summary() -> String {
    format!(
        "{} (rqid {}, build #{}, commit {}, built at {})",
        env!("CARGO_PKG_VERSION"),
        FROZEN_RQID,
        FROZEN_BUILD_NUMBER,
        BUILD_COMMIT,
        BUILD_TIMESTAMP
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_values_are_never_empty() {
        assert!(!FROZEN_RQID.is_empty());
        assert!(!FROZEN_BUILD_NUMBER.is_empty());
        assert!(!BUILD_COMMIT.is_empty());
    }

    #[test]
    fn summary_mentions_frozen_identity() {
        let text = summary();
        assert!(text.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(text.contains(&format!("build #{}", FROZEN_BUILD_NUMBER)));
        assert!(text.contains(FROZEN_RQID));
    }
}
