//! Register transaction tracing.
//!
//! Forwards to `defmt::trace!` when the `defmt` feature is enabled and expands
//! to nothing otherwise, so tracing never alters behavior or timing.

#[cfg(feature = "defmt")]
macro_rules! trace_access {
    ($($arg:tt)*) => {
        defmt::trace!($($arg)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace_access {
    ($($arg:tt)*) => {{}};
}

pub(crate) use trace_access;
