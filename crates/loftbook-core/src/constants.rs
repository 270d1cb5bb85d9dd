//! Application-wide constants
//!
//! Shared by the server, the client, and the tests so wire-level names
//! stay in one place.

/// Storage constants
pub mod storage {
    /// Fixed id of the single persisted skills document.
    pub const SKILLS_DOC_ID: &str = "default";

    /// On-device cache key; also the cache file stem.
    pub const CACHE_KEY: &str = "skills-table-v1";
}

/// Session cookie constants
pub mod session {
    /// Cookie name carrying the admin flag.
    pub const ADMIN_COOKIE: &str = "isAdmin";

    /// Cookie value meaning "admin session".
    pub const ADMIN_FLAG: &str = "1";

    /// Session lifetime in days.
    pub const SESSION_TTL_DAYS: i64 = 30;
}

/// Client-side timing constants
pub mod timing {
    use std::time::Duration;

    /// Quiescence window after the last edit before a remote save fires.
    pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

    /// How long the "Saved" indicator lingers before reverting to idle.
    pub const SAVED_LINGER: Duration = Duration::from_millis(1500);
}

/// UI constants
pub mod ui {
    /// Config directory name under the home dir.
    pub const CONFIG_DIR_NAME: &str = ".loftbook";
}
