//! Key layout inside the key-value store.
//!
//! | Key pattern        | Value                 |
//! |--------------------|-----------------------|
//! | `short:<alias>`    | destination URL       |
//! | `admin:pw:<alias>` | admin password digest |
//! | `conf:addr`        | `host:port` to bind   |
//!
//! Keys are byte-exact: no case folding or trimming is applied to aliases.

/// Prefix of destination keys.
pub const SHORT_PREFIX: &str = "short:";

/// Prefix of admin credential digest keys.
pub const ADMIN_PW_PREFIX: &str = "admin:pw:";

/// Singleton key holding the persisted listen address.
pub const CONF_ADDR_KEY: &str = "conf:addr";

/// Key storing the destination URL for `alias`.
pub fn short_key(alias: &str) -> String {
    format!("{SHORT_PREFIX}{alias}")
}

/// Key storing the admin credential digest for `alias`.
pub fn admin_pw_key(alias: &str) -> String {
    format!("{ADMIN_PW_PREFIX}{alias}")
}

/// Both keys owned by `alias`, destination first.
pub fn link_keys(alias: &str) -> Vec<String> {
    vec![short_key(alias), admin_pw_key(alias)]
}
