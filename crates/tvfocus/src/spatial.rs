//! Geometric resolution of directional moves.

use geom::{Direction, Rect};

use crate::{ElementId, FocusableElement, config::SpatialConfig};

/// Is `to` positioned in `direction` from `from`? Edges may overlap by up to
/// `tolerance` pixels, absorbing sub-pixel layout jitter.
pub fn in_direction(from: Rect, to: Rect, direction: Direction, tolerance: i64) -> bool {
    match direction {
        Direction::Up => to.bottom() <= from.top() + tolerance,
        Direction::Down => to.top() >= from.bottom() - tolerance,
        Direction::Left => to.right() <= from.left() + tolerance,
        Direction::Right => to.left() >= from.right() - tolerance,
    }
}

/// Score a candidate for a move from `from` in `direction`. Lower is better.
///
/// The score is the center-to-center distance along the travel axis plus the
/// perpendicular center offset scaled by `secondary_weight`. Returns `None`
/// when the travel-axis distance is not strictly positive.
pub fn score(from: Rect, to: Rect, direction: Direction, secondary_weight: f64) -> Option<f64> {
    let (fx, fy) = from.center();
    let (tx, ty) = to.center();
    let (primary, secondary) = match direction {
        Direction::Up => (fy - ty, (fx - tx).abs()),
        Direction::Down => (ty - fy, (fx - tx).abs()),
        Direction::Left => (fx - tx, (fy - ty).abs()),
        Direction::Right => (tx - fx, (fy - ty).abs()),
    };
    (primary > 0.0).then_some(primary + secondary * secondary_weight)
}

/// Find the best focus target in the specified direction.
///
/// `current` is the geometry of the focused element, which is skipped by id.
/// Ties go to the candidate that comes first. `None` means nothing lies in
/// that direction, and the caller should fall back to linear navigation.
pub fn resolve<'a>(
    current: Rect,
    direction: Direction,
    candidates: impl IntoIterator<Item = &'a FocusableElement>,
    exclude: ElementId,
    config: &SpatialConfig,
) -> Option<ElementId> {
    let mut best: Option<(f64, ElementId)> = None;
    for c in candidates {
        if c.id == exclude || !in_direction(current, c.rect, direction, config.tolerance) {
            continue;
        }
        let Some(s) = score(current, c.rect, direction, config.secondary_weight) else {
            continue;
        };
        if best.is_none_or(|(b, _)| s < b) {
            best = Some((s, c.id));
        }
    }
    best.map(|(_, id)| id)
}
