mod key_service;
mod provision_service;
mod telemetry_service;

pub use key_service::*;
pub use provision_service::*;
pub use telemetry_service::*;
