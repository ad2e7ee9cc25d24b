pub mod save;
pub mod scaled;
