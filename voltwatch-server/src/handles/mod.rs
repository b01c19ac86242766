mod docs_handle;
mod hardware_handle;

pub use docs_handle::*;
pub use hardware_handle::*;
