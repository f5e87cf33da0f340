use std::env;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub environment: String,
    pub seed_demo_cart: bool,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            environment: "development".to_string(),
            seed_demo_cart: true,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup, `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let seed_demo_cart = match lookup("SHOP_SEED_DEMO_CART") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                anyhow::anyhow!("SHOP_SEED_DEMO_CART must be true or false, got '{}'", value)
            })?,
            None => defaults.seed_demo_cart,
        };

        let config = Config {
            log_level: lookup("LOG_LEVEL")
                .unwrap_or(defaults.log_level)
                .to_lowercase(),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            seed_demo_cart,
            currency_symbol: lookup("SHOP_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency_symbol.trim().is_empty() {
            return Err(anyhow::anyhow!("SHOP_CURRENCY_SYMBOL must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL must be one of {}",
                LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
