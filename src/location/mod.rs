pub mod gate;

pub use gate::{LocationGate, AUTHORIZED_CITY};
