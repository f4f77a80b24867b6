//! HTTP Server Configuration
//!
//! Host, port, CORS origins, and the seeded admin account.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (empty means permissive, for development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Seeded admin account email
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Seeded admin account password (should come from secrets)
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_admin_email() -> String {
    "admin@tripdesk.local".to_string()
}

fn default_admin_password() -> String {
    "change-me-now".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
