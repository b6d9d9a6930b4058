pub mod health;
pub mod owners;
pub mod welcome;
