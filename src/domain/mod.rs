// Domain layer: the contact record and the ports the store talks through.

pub mod model;
pub mod ports;
