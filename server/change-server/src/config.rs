use clap::Parser;

/// Change intake HTTP server
///
/// `PORT` is the only setting read from the environment; the rest are flags.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "change-server")]
#[command(about = "Validates and acknowledges Change requests over HTTP")]
pub struct ServerConfig {
    /// Server bind address (IP literal or hostname)
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Runtime environment; anything but `development` logs JSON
    #[arg(long, default_value = "development")]
    pub environment: String,
}

impl ServerConfig {
    /// Host and port for `TcpListener::bind`, which resolves hostnames
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            verbose: false,
            environment: "development".to_string(),
        }
    }
}
