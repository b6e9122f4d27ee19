//! Record builders.
//!
//! All three builders share the `HeldRecord` slot and its state machine:
//! empty until a create or load, then loaded for good. Replacing a held
//! record requires `overwrite`; add operations mutate it in place.

pub mod event;
pub mod fulfillment;
pub mod held;
pub mod route;
