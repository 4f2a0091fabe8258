use super::direction::Direction;
use super::fruit::Fruit;
use super::grid::{Cell, Grid};

/// 24-bit RGB colour, `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const HEAD: Color = Color(0x00ff00);
    pub const BODY: Color = Color(0x008000);
    pub const RED: Color = Color(0xff0000);

    /// Largest representable colour
    pub const MAX: u32 = 0xff_ffff;

    pub fn rgb(&self) -> (u8, u8, u8) {
        let value = self.0 & Self::MAX;
        ((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

/// One body segment with the colour it was created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    pub color: Color,
}

/// What happened during a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub new_head: Cell,
    /// The fruit was on the new head cell and the tail was kept
    pub grew: bool,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: Vec<Segment>,
}

impl Snake {
    /// Create the starting snake in the middle of the grid, heading right
    ///
    /// The head sits on the centre cell; the remaining segments trail to the
    /// left of it.
    pub fn new(grid: &Grid, length: usize) -> Self {
        let length = length.max(1);
        let head = grid.cell_at(grid.columns() / 2, grid.rows() / 2);
        let mut segments = Vec::with_capacity(length);

        for i in 0..length {
            let color = if i == 0 { Color::HEAD } else { Color::BODY };
            segments.push(Segment {
                cell: head.moved_by(-(i as i32) * grid.segment_size, 0),
                color,
            });
        }

        Self { segments }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// A snake always has a head, so an empty list gives `None`.
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    /// Get the head segment
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Get the tail segment (last segment)
    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|segment| segment.cell)
    }

    /// Check if any segment sits on the cell
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|segment| segment.cell == cell)
    }

    /// Move one cell in `direction`, wrapping around the grid edges.
    ///
    /// Eating the fruit keeps the tail and colours the new head like the
    /// fruit; any other move drops the tail and the new head inherits the
    /// previous head's colour. Pass `None` when no fruit can be eaten.
    pub fn step(&mut self, direction: Direction, grid: &Grid, fruit: Option<&Fruit>) -> StepOutcome {
        let head = *self.head();
        let new_head = grid.wrap_cell(head.cell.stepped(direction, grid.segment_size));

        let eaten = fruit.filter(|fruit| fruit.cell == new_head);
        let color = match eaten {
            Some(fruit) => fruit.color,
            None => head.color,
        };

        self.segments.insert(
            0,
            Segment {
                cell: new_head,
                color,
            },
        );

        if eaten.is_none() {
            self.segments.pop();
        }

        StepOutcome {
            new_head,
            grew: eaten.is_some(),
        }
    }

    /// True if the head shares a cell with any other segment
    pub fn has_collided(&self) -> bool {
        let head = self.head().cell;
        self.segments[1..].iter().any(|segment| segment.cell == head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
