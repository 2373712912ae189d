pub mod model;
pub mod repository;

pub use model::TimeSlot;
pub use repository::TimeSlotRepository;
