//! Live-environment smoke tests. Every test skips itself unless the
//! `FEISHU_*` variables point at a real base.

use feishu_bitable_admin::config::Config;

/// Connection settings from the environment, or `None` to skip the test.
pub fn live_config() -> Option<Config> {
    Config::from_env().ok()
}
