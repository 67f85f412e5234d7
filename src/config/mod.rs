mod settings;

pub use settings::{ConversionConfig, HistoryConfig, LoggingConfig, Settings};
