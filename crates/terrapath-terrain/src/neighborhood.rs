use terrapath_geom::Point;

/// The 8 cells around a point: cardinals, then diagonals.
const MOORE: [Point; 8] = [
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

/// Knight-move ring at Chebyshev distance 2.
const RING2: [Point; 8] = [
    Point::new(1, 2),
    Point::new(2, 1),
    Point::new(2, -1),
    Point::new(1, -2),
    Point::new(-1, -2),
    Point::new(-2, -1),
    Point::new(-2, 1),
    Point::new(-1, 2),
];

/// Ring at Chebyshev distance 3, skipping the directions already covered
/// by shorter moves.
const RING3: [Point; 16] = [
    Point::new(1, 3),
    Point::new(2, 3),
    Point::new(3, 2),
    Point::new(3, 1),
    Point::new(3, -1),
    Point::new(3, -2),
    Point::new(2, -3),
    Point::new(1, -3),
    Point::new(-1, -3),
    Point::new(-2, -3),
    Point::new(-3, -2),
    Point::new(-3, -1),
    Point::new(-3, 1),
    Point::new(-3, 2),
    Point::new(-2, 3),
    Point::new(-1, 3),
];

const MOORE_RINGS: &[&[Point]] = &[&MOORE];
const JUMP2_RINGS: &[&[Point]] = &[&MOORE, &RING2];
const JUMP3_RINGS: &[&[Point]] = &[&MOORE, &RING2, &RING3];

/// Which cells count as one step away.
///
/// The jump variants add concentric rings of longer links so routes can
/// take headings other than the eight compass directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Neighborhood {
    /// 8-connected.
    #[default]
    Moore,
    /// Moore plus the 8 knight moves.
    Jump2,
    /// Jump2 plus the 16 primitive moves at distance 3.
    Jump3,
}

impl Neighborhood {
    /// Number of offsets.
    pub const fn size(self) -> usize {
        match self {
            Self::Moore => 8,
            Self::Jump2 => 16,
            Self::Jump3 => 32,
        }
    }

    /// Offsets from the centre cell, shortest rings first.
    pub fn offsets(self) -> impl Iterator<Item = Point> {
        let rings = match self {
            Self::Moore => MOORE_RINGS,
            Self::Jump2 => JUMP2_RINGS,
            Self::Jump3 => JUMP3_RINGS,
        };
        rings.iter().flat_map(|r| r.iter().copied())
    }

    /// Append the in-range neighbours of `p` for which `keep` holds.
    pub fn neighbors(self, p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
        buf.extend(self.offsets().map(|d| p + d).filter(|&n| keep(n)));
    }
}
