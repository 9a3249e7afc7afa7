//! Stack growth for deeply nested programs.
//!
//! Statement bodies and expressions are walked recursively; a generated IR
//! can nest far deeper than the default thread stack allows. WASM manages
//! its own stack, so there the closure runs directly.

/// Grow when less than this much stack remains.
#[cfg(not(target_arch = "wasm32"))]
const MIN_REMAINING: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` with enough stack for one more level of nesting.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(not(target_arch = "wasm32"))]
    {
        stacker::maybe_grow(MIN_REMAINING, SEGMENT_SIZE, f)
    }
    #[cfg(target_arch = "wasm32")]
    {
        f()
    }
}
