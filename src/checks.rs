//! Precondition macros.
//!
//! `must_have!` guards conditions that correct callers never violate
//! (uninitialized operands, undersized buffers, capacity overflow). It is
//! always compiled in and returns the given error immediately.
//!
//! `should_have!` guards algorithmic contracts that are expensive to check,
//! such as "operands already reduced modulo p". It is only compiled in
//! debug builds or when the `strict-checks` feature is enabled; the
//! condition is not evaluated otherwise.

macro_rules! must_have {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

macro_rules! should_have {
    ($cond:expr, $err:expr) => {
        #[cfg(any(debug_assertions, feature = "strict-checks"))]
        {
            if !($cond) {
                return Err($err);
            }
        }
    };
}

pub(crate) use must_have;
pub(crate) use should_have;
