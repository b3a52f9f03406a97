// Domain layer: storm records, query results and the remote source port.

pub mod model;
pub mod ports;
