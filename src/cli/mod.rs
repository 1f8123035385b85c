pub mod commands;
pub mod dashboard;
pub mod poller;
pub mod scan_commands;

pub use commands::Cli;
pub use scan_commands::ScanCommandHandler;
