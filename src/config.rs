use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "VerifyPro";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the portal server binds to. Loopback only: the portal is a
/// single-user local application and is never exposed to the network.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4820";

/// Get the application data directory
/// ~/VerifyPro/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("VerifyPro")
}

/// Path of the local store database.
pub fn store_path() -> PathBuf {
    app_data_dir().join("verifypro.db")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,verifypro=debug"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("VerifyPro"));
    }

    #[test]
    fn store_path_under_app_data() {
        let path = store_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("verifypro.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
