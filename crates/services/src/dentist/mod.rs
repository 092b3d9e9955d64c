mod repository;
mod service;

pub use repository::DentistRepository;
pub use service::DentistService;

const ENTITY: &str = "dentist";
const KEY: &str = "license";
