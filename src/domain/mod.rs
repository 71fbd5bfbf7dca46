// Domain layer: form state, wire models and ports. No HTTP or filesystem here.

pub mod form;
pub mod model;
pub mod ports;
