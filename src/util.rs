use simple_error::SimpleError;

pub fn init_log() {
    if let Ok(logger) = flexi_logger::Logger::try_with_env_or_str("debug") {
        // a second start() fails, which is fine for tests sharing one process
        let _ = logger.log_to_stdout().start();
    }
}

pub fn to_simple<E: std::error::Error>(e: E) -> SimpleError {
    SimpleError::new(e.to_string())
}
