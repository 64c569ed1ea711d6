// Domain layer: core models and ports (interfaces). No AWS or HTTP types here.

pub mod model;
pub mod ports;
