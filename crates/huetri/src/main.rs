use huetri_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = huetri::run() {
        log::error!("huetri: {err:#}");
        std::process::exit(-1);
    }
}
