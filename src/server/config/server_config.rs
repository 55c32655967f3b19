use crate::config::Config;

/// Options for the metadata server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1", "0.0.0.0")
    pub address: String,

    /// Port to listen on (e.g., 4000)
    pub port: u16,

    /// Whether the admin API accepts mutations
    pub admin: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 4000,
            admin: true,
        }
    }
}

impl ServerConfig {
    pub fn new(address: &str, port: u16) -> Self {
        ServerConfig {
            address: address.to_string(),
            port,
            ..Default::default()
        }
    }

    /// Host and port from the `server` section of the site configuration
    pub fn from_site_config(config: &Config) -> Self {
        ServerConfig::new(&config.server.host, config.server.port)
    }

    /// Set whether the admin API accepts mutations
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Get the full address string (e.g., "127.0.0.1:4000")
    pub fn address_string(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Get the full URL (e.g., "http://localhost:4000/")
    pub fn url(&self) -> String {
        let address = if self.address == "127.0.0.1" {
            "localhost".to_string()
        } else if self.address.contains(':') {
            format!("[{}]", self.address)
        } else {
            self.address.clone()
        };

        format!("http://{}:{}/", address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_and_url() {
        let config = ServerConfig::new("127.0.0.1", 4000);
        assert_eq!(config.address_string(), "127.0.0.1:4000");
        assert_eq!(config.url(), "http://localhost:4000/");

        let v6 = ServerConfig::new("::1", 8080);
        assert_eq!(v6.url(), "http://[::1]:8080/");
    }

    #[test]
    fn test_from_site_config() {
        let mut site = Config::default();
        site.server.host = "0.0.0.0".to_string();
        site.server.port = 9000;

        let config = ServerConfig::from_site_config(&site).with_admin(false);
        assert_eq!(config.address_string(), "0.0.0.0:9000");
        assert!(!config.admin);
    }
}
