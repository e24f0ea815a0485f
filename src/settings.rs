//! Agent settings: documented defaults layered under an optional config
//! file and `AGENT_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::collectors::cpu::CpuConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cpu: CpuConfig,
}

impl Settings {
    /// Load settings, lowest precedence first: built-in defaults, then the
    /// file at `path` (if given), then environment variables such as
    /// `AGENT_CPU__PERCPU=false`.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder
            .add_source(
                Environment::with_prefix("AGENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(content: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn absent_keys_take_documented_defaults() {
        let settings = from_toml("");
        assert!(settings.cpu.percpu);
        assert!(settings.cpu.totalcpu);
        assert!(!settings.cpu.collect_cpu_time);
        assert!(settings.cpu.report_active);
    }

    #[test]
    fn cpu_table_overrides_individual_keys() {
        let settings = from_toml(
            r#"
            [cpu]
            percpu = false
            report_active = false
            "#,
        );
        assert!(!settings.cpu.percpu);
        assert!(settings.cpu.totalcpu);
        assert!(!settings.cpu.report_active);
    }

    #[test]
    fn environment_variables_override_file_values() {
        std::env::set_var("AGENT_CPU__TOTALCPU", "false");
        let settings = Settings::load(None).unwrap();
        std::env::remove_var("AGENT_CPU__TOTALCPU");

        assert!(!settings.cpu.totalcpu);
        assert!(settings.cpu.percpu);
    }
}
