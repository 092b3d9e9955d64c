mod repository;
mod service;

pub use repository::PatientRepository;
pub use service::PatientService;

const ENTITY: &str = "patient";
const KEY: &str = "dni";
