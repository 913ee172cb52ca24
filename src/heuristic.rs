//! Distance estimates between grid cells.
use bevy::math::UVec2;

/// Cost of one axis aligned step when diagonal movement is enabled.
pub const STRAIGHT_COST: u32 = 10;
/// Cost of one diagonal step when diagonal movement is enabled.
pub const DIAGONAL_COST: u32 = 14;

#[inline(always)]
fn deltas(a: UVec2, b: UVec2) -> (u32, u32) {
    (a.x.abs_diff(b.x), a.y.abs_diff(b.y))
}

/// Manhattan distance scaled by `step_cost`.
#[inline(always)]
pub fn manhattan(a: UVec2, b: UVec2, step_cost: u32) -> u32 {
    let (dx, dy) = deltas(a, b);
    (dx + dy) * step_cost
}

/// Octile distance for 8-way movement with the given straight and diagonal step costs.
/// Never overestimates when diagonal steps cost less than two straight steps.
#[inline(always)]
pub fn octile(a: UVec2, b: UVec2, straight: u32, diagonal: u32) -> u32 {
    let (dx, dy) = deltas(a, b);
    let (long, short) = if dx > dy { (dx, dy) } else { (dy, dx) };
    straight * (long - short) + diagonal * short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(UVec2::new(0, 0), UVec2::new(4, 4), 1), 8);
        assert_eq!(manhattan(UVec2::new(4, 1), UVec2::new(0, 3), 1), 6);
        assert_eq!(manhattan(UVec2::new(2, 2), UVec2::new(2, 2), 1), 0);
        assert_eq!(manhattan(UVec2::new(0, 0), UVec2::new(1, 2), 10), 30);
    }

    #[test]
    fn test_octile() {
        let h = |a, b| octile(a, b, STRAIGHT_COST, DIAGONAL_COST);
        assert_eq!(h(UVec2::new(0, 0), UVec2::new(4, 4)), 56);
        assert_eq!(h(UVec2::new(0, 0), UVec2::new(3, 0)), 30);
        assert_eq!(h(UVec2::new(0, 0), UVec2::new(3, 1)), 34);
        assert_eq!(h(UVec2::new(5, 5), UVec2::new(5, 5)), 0);
    }

    #[test]
    fn test_estimates_are_symmetric() {
        let a = UVec2::new(7, 2);
        let b = UVec2::new(1, 9);
        assert_eq!(manhattan(a, b, 1), manhattan(b, a, 1));
        assert_eq!(octile(a, b, 10, 14), octile(b, a, 10, 14));
    }
}
