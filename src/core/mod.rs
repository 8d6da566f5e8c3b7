pub mod budget_manager;
pub mod clock;
pub mod services;
pub mod utils;
