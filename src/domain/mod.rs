// Domain layer: run models and ports. Filesystem and console access live elsewhere.

pub mod model;
pub mod ports;
