//! `peerlink --version`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `peerlink <version>`, as printed by `--version`.
pub fn version_line() -> String {
    format!("peerlink {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_is_semver() {
        let line = version_line();
        let version = line.strip_prefix("peerlink ").unwrap();
        assert_eq!(version, VERSION);
        assert!(version.split('.').count() >= 3);
    }
}
