pub mod location;
pub mod stats;
pub mod transaction;
