use super::*;

/// Published location of the shared tariff document
pub const RATES_URL: &str = "https://www.oeb.ca/_html/calculator/data/GasBillData.xml";

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: RATES_URL.to_string(),
            timeout_secs: 10,
            refresh_interval_secs: 86_400,
        }
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            profile: "natural_gas".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: "/tmp/hestia.log".to_string(),
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            company: CompanyConfig::default(),
            logging: LoggingConfig::default(),
            timezone: "America/Toronto".to_string(),
            region: "ON".to_string(),
        }
    }
}
