// Adapters layer: concrete implementations for external systems (people API, output files).

pub mod apollo;
pub mod sink;
