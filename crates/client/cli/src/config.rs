//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub scenario: String,
    pub silent: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenario: "ambush".to_string(),
            silent: true,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AMMO_DATA_DIR` - Directory holding rules, templates and scenarios (default: `data`)
    /// - `AMMO_SCENARIO` - Scenario file name without extension (default: `ambush`)
    /// - `AMMO_SILENT` - Keep per-weapon warnings out of the output (default: true)
    ///
    /// A first positional argument overrides the scenario name.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("AMMO_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(scenario) = env::var("AMMO_SCENARIO") {
            config.scenario = scenario;
        }
        if let Some(silent) = read_env::<bool>("AMMO_SILENT") {
            config.silent = silent;
        }
        if let Some(scenario) = env::args().nth(1) {
            config.scenario = scenario;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
