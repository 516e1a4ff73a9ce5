pub mod driver;
pub mod manager;
pub mod search;
pub mod traits;

pub use driver::DriverConfig;
pub use manager::{AppConfig, ConfigManager};
pub use search::SearchConfig;
pub use traits::ConfigSection;
