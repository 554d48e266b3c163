pub mod cancel;
pub mod logger;
