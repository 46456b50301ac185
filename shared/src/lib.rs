pub mod models;
pub mod utils;

pub use utils::ars_format;
