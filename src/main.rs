//! tripdesk server entry point
//!
//! Parses CLI arguments, initializes tracing, and runs the HTTP server.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tripdesk::http_server::{HttpServer, HttpServerConfig};
use tripdesk::notify::EmailConfig;

/// Corporate travel-request approval backend
#[derive(Debug, Parser)]
#[command(name = "tripdesk", version)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Seeded admin account email
    #[arg(long, default_value = "admin@tripdesk.local")]
    admin_email: String,

    /// Seeded admin account password
    #[arg(long, env = "TRIPDESK_ADMIN_PASSWORD", default_value = "change-me-now")]
    admin_password: String,

    /// SMTP host; omit to log emails through the mock sender
    #[arg(long)]
    smtp_host: Option<String>,

    /// SMTP port
    #[arg(long, default_value_t = 587)]
    smtp_port: u16,

    /// SMTP username
    #[arg(long, default_value = "")]
    smtp_user: String,

    /// SMTP password
    #[arg(long, env = "TRIPDESK_SMTP_PASSWORD", default_value = "")]
    smtp_password: String,

    /// From address for notification emails
    #[arg(long, default_value = "noreply@tripdesk.local")]
    from_email: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HttpServerConfig {
        host: args.host,
        port: args.port,
        cors_origins: Vec::new(),
        admin_email: args.admin_email,
        admin_password: args.admin_password,
    };

    let smtp = args.smtp_host.map(|smtp_host| EmailConfig {
        smtp_host,
        smtp_port: args.smtp_port,
        smtp_user: args.smtp_user,
        smtp_password: args.smtp_password,
        from_email: args.from_email,
        from_name: "TripDesk".to_string(),
    });

    if let Err(e) = HttpServer::with_config(config, smtp).start().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
