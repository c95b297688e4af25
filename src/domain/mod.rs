// Domain layer: core models and ports (interfaces). No external service
// dependencies; adapters implement the ports.

pub mod model;
pub mod ports;
