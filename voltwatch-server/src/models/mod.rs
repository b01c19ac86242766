mod api_key;
mod energy_record;
mod facility;

pub use api_key::{ApiKey, ApiKeyTable};
pub use energy_record::{EnergyRecord, EnergyRecordTable};
pub use facility::{Facility, FacilityTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
