pub mod model_spec;
pub mod models;
pub mod retry;
pub mod utils;
