//! Stack growth for recursive walks over token trees.
//!
//! Blocks nest to arbitrary depth: `((((...))))` with a hundred thousand
//! levels is valid input and the assembler builds it without recursion. The
//! walks that come afterwards (round-trip reconstruction, error search,
//! pattern matching inside blocks, cloning and comparing tokens) recurse
//! once per nesting level, so each recursive step goes through
//! [`ensure_sufficient_stack`]. Dropping a tree does not recurse.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn depth(token: &Token) -> usize {
///     ensure_sufficient_stack(|| {
///         1 + token.children().iter().map(depth).max().unwrap_or(0)
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
