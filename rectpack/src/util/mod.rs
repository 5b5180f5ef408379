/// Set of functions used throughout to assure the correctness of the free-space bookkeeping.
pub mod assertions;

mod decimal;

#[doc(inline)]
pub use decimal::float_to_dec;
