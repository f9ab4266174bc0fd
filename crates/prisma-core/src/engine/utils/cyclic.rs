//! Wrap-around stepping over an optional index.
//!
//! The domain is `None, 0, 1, …, len - 1`, walked as a ring:
//! `None → 0 → … → len-1 → None` forwards and the mirror image backwards.
//! An empty domain collapses to `None`.

pub fn next_cyclic(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        _ if len == 0 => None,
        None => Some(0),
        Some(i) if i + 1 >= len => None,
        Some(i) => Some(i + 1),
    }
}

pub fn prev_cyclic(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        _ if len == 0 => None,
        None => Some(len - 1),
        Some(0) => None,
        Some(i) => Some(i.min(len) - 1),
    }
}

pub fn step_cyclic(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if forward {
        next_cyclic(current, len)
    } else {
        prev_cyclic(current, len)
    }
}
