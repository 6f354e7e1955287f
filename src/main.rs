use std::process::ExitCode;

use tracing::info;

use contact_relay::{mail, Config, WebServer};

const CONFIG_PATH: &str = "config.toml";

fn print_help() {
    println!(
        "contact-relay {}\n\n\
         Relays contact form submissions by email.\n\n\
         USAGE:\n    contact-relay [--help | --version]\n\n\
         Settings are read from {} and overridden by environment variables\n\
         (a .env file in the working directory is loaded first).",
        env!("CARGO_PKG_VERSION"),
        CONFIG_PATH
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "-V" | "--version" => {
                println!("contact-relay {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                return ExitCode::FAILURE;
            }
        }
    }

    dotenvy::dotenv().ok();

    // Load configuration
    // A missing file means defaults; a broken one is fatal
    let mut config = match Config::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.apply_env_overrides() {
        eprintln!("Invalid environment: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = contact_relay::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        contact_relay::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    info!("contact-relay {}", env!("CARGO_PKG_VERSION"));

    let transport = match mail::from_config(&config.mail) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!("Failed to create mail transport: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match WebServer::new(&config, transport) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
