//! Table geometry for one round
//!
//! A board is an axis-aligned rectangle in screen coordinates (y grows
//! downward): four corners, the four cushions between them, a pocket at each
//! corner and the interior grid crossings the player can aim at.

use serde::{Deserialize, Serialize};

use crate::geom::{GeometryError, GeometryResult, Point, Segment};
use crate::settings::Settings;

/// Identity of a cushion
///
/// Wall exclusion during a bounce compares sides, never coordinates, so two
/// walls sharing a corner are never confused for one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Top,
    Left,
    Right,
    Bottom,
}

impl WallSide {
    /// Fixed probing order; the first wall hit wins at shared corners
    pub const ALL: [WallSide; 4] = [
        WallSide::Top,
        WallSide::Left,
        WallSide::Right,
        WallSide::Bottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallSide::Top => "top",
            WallSide::Left => "left",
            WallSide::Right => "right",
            WallSide::Bottom => "bottom",
        }
    }
}

/// Coordinate flipped when the ball bounces off a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorAxis {
    /// Vertical cushion: horizontal motion reverses
    X,
    /// Horizontal cushion: vertical motion reverses
    Y,
}

impl MirrorAxis {
    /// The `(ax, ay)` mask, one of `(1, 0)` or `(0, 1)`
    #[inline]
    pub fn components(self) -> (f64, f64) {
        match self {
            MirrorAxis::X => (1.0, 0.0),
            MirrorAxis::Y => (0.0, 1.0),
        }
    }
}

/// One cushion of the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    pub segment: Segment,
    pub axis: MirrorAxis,
}

impl Wall {
    /// Mirror a far aim target through the wall at the contact point
    ///
    /// Only the masked coordinate moves: the target ends up as far past the
    /// hit point on the other side as it was before.
    pub fn reflect(&self, hit: Point, target: Point) -> Point {
        let (ax, ay) = self.axis.components();
        let delta = hit - target;
        Point::new(target.x + ax * delta.x * 2.0, target.y + ay * delta.y * 2.0)
    }
}

/// An interior grid crossing, addressed by cell indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// `(column, row)`, both starting at 1
    pub cell: (u32, u32),
    pub point: Point,
}

/// Table geometry, immutable for the lifetime of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Left-top, right-top, left-bottom, right-bottom
    pub corners: [Point; 4],
    /// In `WallSide::ALL` order
    pub walls: [Wall; 4],
    /// Pocket centres, one per corner
    pub pockets: [Point; 4],
    /// Aim targets, column-major
    pub grid: Vec<GridPoint>,
}

impl Board {
    /// Bare rectangle with its top-left corner at `origin`, no aim grid
    pub fn rectangle(origin: Point, width: f64, height: f64) -> GeometryResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(GeometryError::InvalidArgument(format!(
                "board size {width}x{height} must be positive and finite"
            )));
        }

        let left_top = origin;
        let right_top = Point::new(origin.x + width, origin.y);
        let left_bottom = Point::new(origin.x, origin.y + height);
        let right_bottom = Point::new(origin.x + width, origin.y + height);
        let corners = [left_top, right_top, left_bottom, right_bottom];

        let wall = |side, start, end, axis| Wall {
            side,
            segment: Segment::new(start, end),
            axis,
        };
        let walls = [
            wall(WallSide::Top, left_top, right_top, MirrorAxis::Y),
            wall(WallSide::Left, left_top, left_bottom, MirrorAxis::X),
            wall(WallSide::Right, right_top, right_bottom, MirrorAxis::X),
            wall(WallSide::Bottom, left_bottom, right_bottom, MirrorAxis::Y),
        ];

        Ok(Self {
            corners,
            walls,
            pockets: corners,
            grid: Vec::new(),
        })
    }

    /// Board of `width_cells` x `height_cells` cells centred on the screen
    ///
    /// The table spans `cells * cell_size + (cells - 1) * line_thickness`
    /// pixels per axis; grid crossings sit at
    /// `origin + index * (cell_size + line_thickness)`. A table larger than
    /// the screen on either axis is rejected.
    pub fn from_layout(
        settings: &Settings,
        width_cells: u32,
        height_cells: u32,
    ) -> GeometryResult<Self> {
        if width_cells == 0 || height_cells == 0 {
            return Err(GeometryError::InvalidArgument(format!(
                "board of {width_cells}x{height_cells} cells has no area"
            )));
        }

        let board_width = settings.board_extent(width_cells);
        let board_height = settings.board_extent(height_cells);
        if board_width > u64::from(settings.screen_width)
            || board_height > u64::from(settings.screen_height)
        {
            return Err(GeometryError::InvalidArgument(format!(
                "{width_cells}x{height_cells} board ({board_width}x{board_height}px) does not fit the {}x{} screen",
                settings.screen_width, settings.screen_height
            )));
        }
        // Centred with whole-pixel offsets
        let origin_x = (u64::from(settings.screen_width) - board_width) / 2;
        let origin_y = (u64::from(settings.screen_height) - board_height) / 2;
        let origin = Point::new(origin_x as f64, origin_y as f64);

        let mut board = Self::rectangle(origin, board_width as f64, board_height as f64)?;

        let pitch = settings.grid_pitch();
        board.grid = (1..width_cells)
            .flat_map(|column| {
                (1..height_cells).map(move |row| GridPoint {
                    cell: (column, row),
                    point: Point::new(
                        origin.x + f64::from(column) * pitch,
                        origin.y + f64::from(row) * pitch,
                    ),
                })
            })
            .collect();

        Ok(board)
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        self.corners[0]
    }

    pub fn width(&self) -> f64 {
        self.corners[1].x - self.corners[0].x
    }

    pub fn height(&self) -> f64 {
        self.corners[2].y - self.corners[0].y
    }

    pub fn wall(&self, side: WallSide) -> &Wall {
        // `walls` is laid out in `WallSide::ALL` order
        &self.walls[side as usize]
    }

    /// True when `p` is on or inside the rectangle
    pub fn contains(&self, p: Point) -> bool {
        let lt = self.corners[0];
        let rb = self.corners[3];
        lt.x <= p.x && p.x <= rb.x && lt.y <= p.y && p.y <= rb.y
    }

    /// The corner `p` falls into, if any, under a per-axis tolerance
    pub fn corner_near(&self, p: Point, tolerance: f64) -> Option<Point> {
        self.corners
            .iter()
            .copied()
            .find(|corner| corner.near(p, tolerance))
    }

    /// Grid crossing of a cell
    pub fn grid_point(&self, cell: (u32, u32)) -> Option<Point> {
        self.grid.iter().find(|g| g.cell == cell).map(|g| g.point)
    }

    /// First grid crossing within `radius` of `pos` on both axes
    pub fn pick_grid_point(&self, pos: Point, radius: f64) -> Option<GridPoint> {
        self.grid.iter().copied().find(|g| g.point.near(pos, radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_walls() {
        let board = Board::rectangle(Point::new(10.0, 20.0), 100.0, 50.0).unwrap();
        assert_eq!(board.origin(), Point::new(10.0, 20.0));
        assert_eq!(board.width(), 100.0);
        assert_eq!(board.height(), 50.0);

        let top = board.wall(WallSide::Top);
        assert_eq!(top.side, WallSide::Top);
        assert_eq!(top.axis, MirrorAxis::Y);
        assert_eq!(top.segment.end, Point::new(110.0, 20.0));

        let right = board.wall(WallSide::Right);
        assert_eq!(right.axis, MirrorAxis::X);
        assert_eq!(right.segment, Segment::new(Point::new(110.0, 20.0), Point::new(110.0, 70.0)));

        // Every wall endpoint is a corner
        for wall in &board.walls {
            assert!(board.corners.contains(&wall.segment.start));
            assert!(board.corners.contains(&wall.segment.end));
        }
        for (wall, side) in board.walls.iter().zip(WallSide::ALL) {
            assert_eq!(wall.side, side);
        }
        assert_eq!(board.pockets, board.corners);
    }

    #[test]
    fn test_rectangle_rejects_empty() {
        assert!(Board::rectangle(Point::ORIGIN, 0.0, 10.0).is_err());
        assert!(Board::rectangle(Point::ORIGIN, 10.0, -1.0).is_err());
        assert!(Board::rectangle(Point::ORIGIN, f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_from_layout() {
        let settings = Settings::default();
        let board = Board::from_layout(&settings, 5, 7).unwrap();

        // 5 cells: 5*50 + 4*1 = 254 wide; 7 cells: 7*50 + 6 = 356 high
        assert_eq!(board.width(), 254.0);
        assert_eq!(board.height(), 356.0);
        assert_eq!(board.origin(), Point::new(273.0, 222.0));

        assert_eq!(board.grid.len(), 4 * 6);
        assert_eq!(board.grid[0].cell, (1, 1));
        assert_eq!(board.grid_point((1, 1)), Some(Point::new(324.0, 273.0)));
        assert_eq!(board.grid_point((4, 6)), Some(Point::new(477.0, 528.0)));
        assert_eq!(board.grid_point((5, 1)), None);
        assert!(board.grid.iter().all(|g| board.contains(g.point)));
    }

    #[test]
    fn test_from_layout_rejects_zero_cells() {
        let settings = Settings::default();
        assert!(matches!(
            Board::from_layout(&settings, 0, 5),
            Err(GeometryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_layout_rejects_board_larger_than_screen() {
        let settings = Settings::default();
        assert!(matches!(
            Board::from_layout(&settings, 40, 40),
            Err(GeometryError::InvalidArgument(_))
        ));
        assert!(Board::from_layout(&settings, 5, 40).is_err());

        // 15 cells: 15*50 + 14 = 764px, the widest that fits 800px
        let board = Board::from_layout(&settings, 15, 15).unwrap();
        assert_eq!(board.origin(), Point::new(18.0, 18.0));
        assert!(Board::from_layout(&settings, 16, 15).is_err());
    }

    #[test]
    fn test_corner_near() {
        let board = Board::rectangle(Point::ORIGIN, 100.0, 100.0).unwrap();
        assert_eq!(
            board.corner_near(Point::new(98.5, 1.0), 2.0),
            Some(Point::new(100.0, 0.0))
        );
        assert_eq!(board.corner_near(Point::new(97.0, 0.0), 2.0), None);
        assert_eq!(board.corner_near(Point::new(50.0, 100.0), 2.0), None);
    }

    #[test]
    fn test_pick_grid_point() {
        let settings = Settings::default();
        let board = Board::from_layout(&settings, 5, 5).unwrap();
        let target = board.grid_point((2, 3)).unwrap();

        let picked = board
            .pick_grid_point(target + Point::new(6.0, -9.0), settings.aim_pick_radius)
            .unwrap();
        assert_eq!(picked.cell, (2, 3));
        assert!(board
            .pick_grid_point(target + Point::new(11.0, 0.0), settings.aim_pick_radius)
            .is_none());
    }

    #[test]
    fn test_wall_reflect() {
        let board = Board::rectangle(Point::ORIGIN, 100.0, 100.0).unwrap();
        let hit = Point::new(100.0, 40.0);
        let target = Point::new(1000.0, 130.0);
        // Right cushion flips x around the hit point, keeps y
        assert_eq!(
            board.wall(WallSide::Right).reflect(hit, target),
            Point::new(-800.0, 130.0)
        );
        // Top cushion flips y instead
        assert_eq!(
            board.wall(WallSide::Top).reflect(Point::new(40.0, 0.0), Point::new(90.0, -50.0)),
            Point::new(90.0, 50.0)
        );
    }
}
