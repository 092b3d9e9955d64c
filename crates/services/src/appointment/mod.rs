mod repository;
mod service;

pub use repository::AppointmentRepository;
pub use service::AppointmentService;

const ENTITY: &str = "appointment";
