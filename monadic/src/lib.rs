mod convert;
mod error;
#[cfg(test)]
mod laws;
mod optional;
mod outcome;
#[cfg(feature = "serde")]
mod serde_support;

pub use error::*;
pub use monadic_hkt::{Applicative, Functor, Monad, UnaryTy};
pub use optional::*;
pub use outcome::*;
