//! Init command implementation

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

/// Default configuration content for rally init
pub const DEFAULT_CONFIG: &str = r#"# Rally Configuration
# ===================
#
# Rally talks to a remote challenge API when one is configured here.
# With no base_url, all commands run against an in-memory backend seeded
# with demo friends - useful for trying out the creation wizard.

[api]
# Base URL of the challenge API, e.g. "https://api.rally.fit"
base_url = ""
# Bearer token sent with every request (leave empty to disable auth)
token = ""

[settings]
# Seconds between server-time refreshes (the wizard validates start
# instants against server time, not the local clock)
time_sync_secs = 300
# Maximum number of results shown by friend search
friend_search_limit = 10
"#;

/// Write the default config file into `<work_dir>/.rally/`
pub fn init_command(work_dir: &Path, force: bool) -> Result<()> {
    let config_dir = work_dir.join(".rally");
    let config_path = config_dir.join("config.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    info!("Created config file: {}", config_path.display());
    println!("Created {}", config_path.display());

    Ok(())
}
