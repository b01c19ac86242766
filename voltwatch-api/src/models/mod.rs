mod config;
mod reading;
mod response;

pub use config::*;
pub use reading::*;
pub use response::*;

use serde::{Deserialize, Serialize};

pub type Id = i32;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Success,
    Error,
}
