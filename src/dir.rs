//! Fixed direction ordering used when expanding grid neighbors.
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Directions on the grid plane. Grid `y` grows toward NORTH.
///
/// The declaration order is the neighbor expansion order, which keeps search results reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Dir {
    NORTH = 0,
    SOUTH = 1,
    EAST = 2,
    WEST = 3,
    NORTHEAST = 4,
    NORTHWEST = 5,
    SOUTHEAST = 6,
    SOUTHWEST = 7,
}

pub use self::Dir::*;

impl Dir {
    /// The four axis aligned directions in expansion order.
    pub fn cardinal() -> std::iter::Copied<std::slice::Iter<'static, Dir>> {
        [NORTH, SOUTH, EAST, WEST].iter().copied()
    }

    /// The four diagonal directions in expansion order.
    pub fn ordinal() -> std::iter::Copied<std::slice::Iter<'static, Dir>> {
        [NORTHEAST, NORTHWEST, SOUTHEAST, SOUTHWEST].iter().copied()
    }

    pub fn all() -> DirIter {
        Dir::iter()
    }

    pub fn vector(self) -> (i32, i32) {
        match self {
            NORTH => (0, 1),
            SOUTH => (0, -1),
            EAST => (1, 0),
            WEST => (-1, 0),
            NORTHEAST => (1, 1),
            NORTHWEST => (-1, 1),
            SOUTHEAST => (1, -1),
            SOUTHWEST => (-1, -1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            NORTH => SOUTH,
            SOUTH => NORTH,
            EAST => WEST,
            WEST => EAST,
            NORTHEAST => SOUTHWEST,
            NORTHWEST => SOUTHEAST,
            SOUTHEAST => NORTHWEST,
            SOUTHWEST => NORTHEAST,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(self, NORTHEAST | NORTHWEST | SOUTHEAST | SOUTHWEST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_order_is_fixed() {
        let all: Vec<Dir> = Dir::all().collect();
        assert_eq!(all.len(), Dir::COUNT);
        assert_eq!(
            all,
            vec![NORTH, SOUTH, EAST, WEST, NORTHEAST, NORTHWEST, SOUTHEAST, SOUTHWEST]
        );
    }

    #[test]
    fn test_opposite_cancels_vector() {
        for dir in Dir::all() {
            let (x, y) = dir.vector();
            let (ox, oy) = dir.opposite().vector();
            assert_eq!((x + ox, y + oy), (0, 0));
            assert_eq!(dir.is_diagonal(), dir.opposite().is_diagonal());
        }
    }

    #[test]
    fn test_cardinal_and_ordinal_partition() {
        assert!(Dir::cardinal().all(|d| !d.is_diagonal()));
        assert!(Dir::ordinal().all(|d| d.is_diagonal()));
        assert_eq!(Dir::cardinal().count() + Dir::ordinal().count(), Dir::COUNT);
    }
}
