pub mod appointments;
pub mod catalog;
pub mod health;
pub mod payments;
pub mod slots;
