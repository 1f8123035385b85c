pub mod platform;
pub mod wlan;

pub use platform::{AdapterSource, SourceError, create_adapter_source};
pub use wlan::WlanCollector;
