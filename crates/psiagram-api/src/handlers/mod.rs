pub mod health;
pub mod posts;
pub mod relocation;
pub mod uploads;
