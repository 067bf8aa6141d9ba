//! Index-based wrap-around navigation.

use geom::Direction;

/// Step from `current` through a list of `len` elements.
///
/// Up and left step backwards, down and right step forwards, wrapping at
/// either end. Lists of zero or one element have nowhere to go and yield
/// `None`. A `current` past the end is treated as the last index.
pub fn advance(current: usize, direction: Direction, len: usize) -> Option<usize> {
    if len <= 1 {
        return None;
    }
    let current = current.min(len - 1);
    Some(if direction.is_backward() {
        if current == 0 { len - 1 } else { current - 1 }
    } else if current + 1 == len {
        0
    } else {
        current + 1
    })
}
