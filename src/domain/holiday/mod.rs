//! Holiday aggregate

pub mod model;
pub mod repository;

pub use model::{Holiday, HolidayInput};
pub use repository::HolidayRepository;
