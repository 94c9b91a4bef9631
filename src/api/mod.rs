pub mod rest;

pub use rest::{ApiState, create_router};
