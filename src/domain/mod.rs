// Domain layer: core models and ports (interfaces). No I/O beyond reading the names file.

pub mod credentials;
pub mod model;
pub mod names;
pub mod ports;
