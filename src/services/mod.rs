pub mod audit_service;
pub mod daily_report_service;
pub mod game_service;
pub mod inventory_service;
pub mod scan_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use audit_service::*;
pub use daily_report_service::*;
pub use game_service::*;
pub use inventory_service::*;
pub use scan_service::*;
