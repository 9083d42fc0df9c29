pub mod export;
pub mod scoring;
pub mod settings;
pub mod utils;
