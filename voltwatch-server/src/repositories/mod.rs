mod api_key;
mod energy_record;
mod facility;

pub use api_key::ApiKeyRepository;
pub use energy_record::EnergyRecordRepository;
pub use facility::FacilityRepository;
