pub mod check;
pub mod diff;
pub mod generate;
pub mod services;
