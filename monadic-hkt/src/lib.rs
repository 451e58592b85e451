mod hkt;

pub use hkt::*;
