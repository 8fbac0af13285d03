pub mod logger;
pub mod prnu;
