#![deny(clippy::all)]

pub mod cons;
pub mod config;
pub mod error;
pub mod llm;


pub use cons::provider_cons::Provider;
pub use error::{Error, Result};
pub use llm::models::provider_base::{PromptRequest, PromptResponse, ProviderClient};
pub use llm::models::provider_handle::{client_for, AnyProviderClient};

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        use log::LevelFilter;
        use log4rs::append::console::ConsoleAppender;
        use log4rs::config::{Appender, Config, Root};
        use log4rs::encode::pattern::PatternEncoder;

        // Prefer an explicit log4rs configuration file when one is present
        let config_path =
            std::env::var("LOG4RS_CONFIG").unwrap_or_else(|_| "log4rs.yaml".to_string());
        if log4rs::init_file(config_path, Default::default()).is_ok() {
            return;
        }

        let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}\n";
        let stderr = ConsoleAppender::builder()
            .target(log4rs::append::console::Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build();

        let config = match Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[INIT] Failed to build logger config: {}", e);
                return;
            }
        };

        if let Err(e) = log4rs::init_config(config) {
            eprintln!("[INIT] Failed to initialize logger: {}", e);
        }
    });
}
