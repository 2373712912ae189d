pub mod model;
pub mod repository;

pub use model::ModificationItem;
pub use repository::ModificationItemRepository;
