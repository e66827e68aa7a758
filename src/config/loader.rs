use super::types::Config;
use crate::billing::{pricing, Catalog, DiscountMode, Strategy};
use crate::debug_println;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const STRATEGY_ENV: &str = "TOKENPLAN_STRATEGY";
pub const DISCOUNT_MODE_ENV: &str = "TOKENPLAN_DISCOUNT_MODE";

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from default location, then apply env overrides
    pub fn load() -> Result<Config> {
        let config_path = Self::get_config_path();
        Self::load_or_default(&config_path)
    }

    /// Load from `path` if it exists, built-in defaults otherwise.
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        let mut config = Self::read_or_default(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn read_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            debug_println!("config: loading {}", path.display());
            ConfigLoader::load_from_path(path)
        } else {
            debug_println!("config: {} not found, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// `TOKENPLAN_STRATEGY` and `TOKENPLAN_DISCOUNT_MODE` override the file
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; a value outside its enumeration is an error
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(STRATEGY_ENV) {
            self.defaults.strategy = value.parse::<Strategy>()?;
            debug_println!("config: strategy overridden to {}", self.defaults.strategy);
        }

        if let Some(value) = lookup(DISCOUNT_MODE_ENV) {
            self.defaults.discount_mode = value.parse::<DiscountMode>()?;
            debug_println!(
                "config: discount mode overridden to {}",
                self.defaults.discount_mode
            );
        }

        Ok(())
    }

    /// Build the validated catalog this configuration describes
    pub fn catalog(&self) -> Result<Catalog> {
        let services = self
            .services
            .clone()
            .unwrap_or_else(pricing::builtin_services);
        let plans = self.plans.clone().unwrap_or_else(pricing::builtin_plans);
        Catalog::new(services, plans)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.tokenplan/config.toml)
    pub fn get_config_path() -> PathBuf {
        Self::config_path_in(dirs::home_dir())
    }

    fn config_path_in(home: Option<PathBuf>) -> PathBuf {
        match home {
            Some(home) => home.join(".tokenplan").join("config.toml"),
            None => PathBuf::from(".tokenplan/config.toml"),
        }
    }

    /// Create a config file with defaults and the built-in catalogs spelled out
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(false);
        }

        let config = Config {
            services: Some(pricing::builtin_services()),
            plans: Some(pricing::builtin_plans()),
            ..Config::default()
        };
        config.save_to(path)?;
        println!("Created config at {}", path.display());
        Ok(true)
    }

    /// Validate configuration
    pub fn check(&self) -> Result<()> {
        self.catalog().map(|_| ())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}
