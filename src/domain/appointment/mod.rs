pub mod model;
pub mod repository;

pub use model::{Appointment, AppointmentStatus, ServiceKind};
pub use repository::AppointmentRepository;
