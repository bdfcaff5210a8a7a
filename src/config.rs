/// Extension settings. There is no options page, so these are compile-time defaults.

/// Settings for the content script injected into the translation page
#[derive(Debug, Clone, PartialEq)]
pub struct ContentConfig {
    /// Key of the collection in synchronized storage
    pub storage_key: String,
    /// Id of the injected chip container, reused on every render
    pub container_id: String,
    /// Landmark the container is inserted after
    pub anchor_selector: String,
    /// Host button whose classes the chips copy
    pub reference_button_selector: String,
    /// Event name used when reporting quick link usage
    pub analytics_category: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            storage_key: "items".to_string(),
            container_id: "items-container".to_string(),
            anchor_selector: "nav".to_string(),
            reference_button_selector: r#"button[aria-label="Image translation"]"#.to_string(),
            analytics_category: "quick_link".to_string(),
        }
    }
}

/// GA4 Measurement Protocol settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub measurement_id: String,
    pub api_secret: String,
    pub endpoint: String,
    pub debug_endpoint: String,
    /// Send to the validation endpoint instead (responses describe payload errors)
    pub use_debug_endpoint: bool,
    pub engagement_time_msec: u64,
    pub session_expiration_min: f64,
    pub client_id_key: String,
    pub session_key: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            measurement_id: "G-T70LYSTSCD".to_string(),
            api_secret: "hVhFjWkpRRqewCS5-l37Lg".to_string(),
            endpoint: "https://www.google-analytics.com/mp/collect".to_string(),
            debug_endpoint: "https://www.google-analytics.com/debug/mp/collect".to_string(),
            use_debug_endpoint: false,
            engagement_time_msec: 100,
            session_expiration_min: 30.0,
            client_id_key: "clientId".to_string(),
            session_key: "sessionData".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Collector URL with the measurement credentials in the query string
    pub fn collect_url(&self) -> String {
        let endpoint = if self.use_debug_endpoint {
            &self.debug_endpoint
        } else {
            &self.endpoint
        };

        format!(
            "{}?measurement_id={}&api_secret={}",
            endpoint, self.measurement_id, self.api_secret
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_url() {
        let config = AnalyticsConfig {
            measurement_id: "G-TEST".to_string(),
            api_secret: "secret".to_string(),
            ..AnalyticsConfig::default()
        };

        assert_eq!(
            config.collect_url(),
            "https://www.google-analytics.com/mp/collect?measurement_id=G-TEST&api_secret=secret"
        );
    }

    #[test]
    fn test_collect_url_debug() {
        let config = AnalyticsConfig {
            use_debug_endpoint: true,
            ..AnalyticsConfig::default()
        };

        assert!(config.collect_url().starts_with("https://www.google-analytics.com/debug/mp/collect?"));
    }
}
