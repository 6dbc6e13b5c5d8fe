pub mod change;
pub mod health;
