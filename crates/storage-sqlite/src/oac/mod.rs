mod model;
mod repository;

pub use model::{NewOacRecordDB, OacRecordDB};
pub use repository::OacRepository;
