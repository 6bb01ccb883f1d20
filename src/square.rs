use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EchoDate;
use crate::consts::{CELLS_PER_LINE, SIDE};

/// One of the four non-overlapping 2x2 blocks of the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All four quadrants in reading order
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Top-left corner (row, col) of this quadrant's 2x2 block
    const fn origin(self) -> (usize, usize) {
        match self {
            Self::TopLeft => (0, 0),
            Self::TopRight => (0, SIDE / 2),
            Self::BottomLeft => (SIDE / 2, 0),
            Self::BottomRight => (SIDE / 2, SIDE / 2),
        }
    }
}

/// A 4x4 magic square derived from a date's components.
///
/// Every row, column, both diagonals, and each 2x2 quadrant of `cells`
/// sums to `magic_constant`. Values are immutable after construction;
/// regenerate from the date if the input changes (16 additions, nothing
/// worth caching).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MagicSquare {
    cells: [[i32; SIDE]; SIDE],
    magic_constant: i32,
    offset: i32,
}

impl MagicSquare {
    /// Generates the echo square for the given date components.
    ///
    /// The cell layout is a fixed classical construction. Each row permutes
    /// the four components with shifts that cancel along every row, column,
    /// diagonal, and 2x2 quadrant, so every line sums to
    /// `day + month + century + year_of_century` before normalization.
    ///
    /// Shifted cells can go negative (a month of 1 puts `month - 3` at -2).
    /// Normalization adds the smallest uniform offset that lifts every cell
    /// to zero or above. Since each summed line holds exactly
    /// [`CELLS_PER_LINE`] cells, the magic constant grows by
    /// `CELLS_PER_LINE * offset` and the magic property is untouched.
    ///
    /// Total over all `i32` inputs; out-of-calendar values like a 13th
    /// month flow through the same arithmetic.
    pub fn generate(day: i32, month: i32, century: i32, year_of_century: i32) -> Self {
        let (dd, mm, cc, yy) = (day, month, century, year_of_century);
        let base_sum = dd + mm + cc + yy;

        let mut cells = [
            [dd, mm, cc, yy],
            [yy + 1, cc - 1, mm - 3, dd + 3],
            [mm - 2, dd + 2, yy + 2, cc - 2],
            [cc + 1, yy - 1, dd + 1, mm - 1],
        ];

        // Minimum over all cells, floored at zero: only a true negative
        // introduces an offset.
        let min_val = cells.iter().flatten().fold(0, |min, &cell| min.min(cell));
        let offset = -min_val;

        if offset > 0 {
            for row in &mut cells {
                for cell in row {
                    *cell += offset;
                }
            }
        }

        Self {
            cells,
            magic_constant: base_sum + CELLS_PER_LINE * offset,
            offset,
        }
    }

    /// Generates the echo square for a parsed date.
    pub fn from_date(date: EchoDate) -> Self {
        let (day, month, century, year_of_century) = date.components();
        Self::generate(day, month, century, year_of_century)
    }

    /// Returns the full cell grid, row-major
    #[inline]
    pub const fn cells(&self) -> &[[i32; SIDE]; SIDE] {
        &self.cells
    }

    /// Returns the cell at (row, col), or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        self.cells.get(row)?.get(col).copied()
    }

    /// The common sum of every row, column, diagonal, and quadrant
    #[inline]
    pub const fn magic_constant(&self) -> i32 {
        self.magic_constant
    }

    /// The uniform shift applied to every cell during normalization.
    /// Zero when the raw formula produced no negative values.
    #[inline]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Returns row `r`, or `None` if out of bounds
    pub fn row(&self, r: usize) -> Option<[i32; SIDE]> {
        self.cells.get(r).copied()
    }

    /// Returns column `c`, or `None` if out of bounds
    pub fn column(&self, c: usize) -> Option<[i32; SIDE]> {
        if c >= SIDE {
            return None;
        }
        Some(std::array::from_fn(|r| self.cells[r][c]))
    }

    /// Cells of the main diagonal, top-left to bottom-right
    pub fn main_diagonal(&self) -> [i32; SIDE] {
        std::array::from_fn(|i| self.cells[i][i])
    }

    /// Cells of the anti-diagonal, top-right to bottom-left
    pub fn anti_diagonal(&self) -> [i32; SIDE] {
        std::array::from_fn(|i| self.cells[i][SIDE - 1 - i])
    }

    /// Cells of a 2x2 quadrant in reading order
    pub fn quadrant(&self, quadrant: Quadrant) -> [i32; SIDE] {
        let (r, c) = quadrant.origin();
        [
            self.cells[r][c],
            self.cells[r][c + 1],
            self.cells[r + 1][c],
            self.cells[r + 1][c + 1],
        ]
    }
}

impl From<EchoDate> for MagicSquare {
    fn from(date: EchoDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for MagicSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell:4}")?;
            }
            writeln!(f)?;
        }
        write!(f, "magic constant: {}", self.magic_constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_sums(square: &MagicSquare) -> Vec<i32> {
        let mut sums = Vec::new();
        for i in 0..SIDE {
            sums.push(square.row(i).unwrap().iter().sum());
            sums.push(square.column(i).unwrap().iter().sum());
        }
        sums.push(square.main_diagonal().iter().sum());
        sums.push(square.anti_diagonal().iter().sum());
        for q in Quadrant::ALL {
            sums.push(square.quadrant(q).iter().sum());
        }
        sums
    }

    #[test]
    fn test_generate_with_offset() {
        // 14/07/2000: year-of-century 0 drives one raw cell to -1, so the
        // whole square shifts up by 1 and the constant by 4.
        let square = MagicSquare::generate(14, 7, 20, 0);
        assert_eq!(square.offset(), 1);
        assert_eq!(square.magic_constant(), 45);
        assert_eq!(
            square.cells(),
            &[
                [15, 8, 21, 1],
                [2, 20, 5, 18],
                [6, 17, 3, 19],
                [22, 0, 16, 7],
            ]
        );
    }

    #[test]
    fn test_generate_without_offset() {
        // 22/12/1887: every raw cell is non-negative, no shift applied
        let square = MagicSquare::generate(22, 12, 18, 87);
        assert_eq!(square.offset(), 0);
        assert_eq!(square.magic_constant(), 139);
        assert_eq!(
            square.cells(),
            &[
                [22, 12, 18, 87],
                [88, 17, 9, 25],
                [10, 24, 89, 16],
                [19, 86, 23, 11],
            ]
        );
    }

    #[test]
    fn test_all_lines_sum_to_magic_constant() {
        struct TestCase {
            components: (i32, i32, i32, i32),
            description: &'static str,
        }

        let cases = [
            TestCase {
                components: (14, 7, 20, 0),
                description: "offset of 1",
            },
            TestCase {
                components: (22, 12, 18, 87),
                description: "no offset",
            },
            TestCase {
                components: (1, 1, 0, 1),
                description: "year 1, century split degenerates",
            },
            TestCase {
                components: (31, 12, 99, 99),
                description: "largest 2-digit fields",
            },
            TestCase {
                components: (45, 13, 20, 24),
                description: "out-of-calendar day and month",
            },
            TestCase {
                components: (0, 0, 0, 0),
                description: "all zeros",
            },
            TestCase {
                components: (-5, 3, 7, 2),
                description: "negative component",
            },
        ];

        for case in &cases {
            let (dd, mm, cc, yy) = case.components;
            let square = MagicSquare::generate(dd, mm, cc, yy);
            for sum in line_sums(&square) {
                assert_eq!(
                    sum,
                    square.magic_constant(),
                    "line sum mismatch for {} {:?}",
                    case.description,
                    case.components
                );
            }
        }
    }

    #[test]
    fn test_cells_non_negative_after_normalization() {
        for components in [(14, 7, 20, 0), (1, 1, 0, 1), (0, 0, 0, 0), (-5, 3, 7, 2)] {
            let (dd, mm, cc, yy) = components;
            let square = MagicSquare::generate(dd, mm, cc, yy);
            for row in square.cells() {
                for &cell in row {
                    assert!(cell >= 0, "negative cell {cell} for {components:?}");
                }
            }
        }
    }

    #[test]
    fn test_offset_is_minimal() {
        // Offset must be exactly the magnitude of the most negative raw
        // cell: after normalization the smallest cell is exactly zero
        // whenever any offset was applied.
        let square = MagicSquare::generate(14, 7, 20, 0);
        assert_eq!(square.offset(), 1);
        let min = square.cells().iter().flatten().copied().min().unwrap();
        assert_eq!(min, 0);

        // Month 1 puts `month - 3` at -2, the most negative raw cell
        let square = MagicSquare::generate(10, 1, 20, 24);
        assert_eq!(square.offset(), 2);
        let min = square.cells().iter().flatten().copied().min().unwrap();
        assert_eq!(min, 0);

        // No negatives, no offset, cells untouched
        let square = MagicSquare::generate(22, 12, 18, 87);
        assert_eq!(square.offset(), 0);
        assert_eq!(square.magic_constant(), 22 + 12 + 18 + 87);
    }

    #[test]
    fn test_magic_constant_tracks_offset() {
        for components in [(14, 7, 20, 0), (10, 1, 20, 24), (22, 12, 18, 87)] {
            let (dd, mm, cc, yy) = components;
            let square = MagicSquare::generate(dd, mm, cc, yy);
            let base_sum = dd + mm + cc + yy;
            assert_eq!(
                square.magic_constant(),
                base_sum + CELLS_PER_LINE * square.offset()
            );
        }
    }

    #[test]
    fn test_first_row_echoes_date_plus_offset() {
        let square = MagicSquare::generate(22, 12, 18, 87);
        assert_eq!(square.row(0).unwrap(), [22, 12, 18, 87]);

        // With an offset the echo is shifted but still recognizable
        let square = MagicSquare::generate(14, 7, 20, 0);
        assert_eq!(square.row(0).unwrap(), [15, 8, 21, 1]);
    }

    #[test]
    fn test_get_and_bounds() {
        let square = MagicSquare::generate(22, 12, 18, 87);
        assert_eq!(square.get(0, 0), Some(22));
        assert_eq!(square.get(3, 3), Some(11));
        assert_eq!(square.get(4, 0), None);
        assert_eq!(square.get(0, 4), None);
        assert_eq!(square.row(4), None);
        assert_eq!(square.column(4), None);
    }

    #[test]
    fn test_quadrants() {
        let square = MagicSquare::generate(22, 12, 18, 87);
        assert_eq!(square.quadrant(Quadrant::TopLeft), [22, 12, 88, 17]);
        assert_eq!(square.quadrant(Quadrant::TopRight), [18, 87, 9, 25]);
        assert_eq!(square.quadrant(Quadrant::BottomLeft), [10, 24, 19, 86]);
        assert_eq!(square.quadrant(Quadrant::BottomRight), [89, 16, 23, 11]);
    }

    #[test]
    fn test_diagonals() {
        let square = MagicSquare::generate(22, 12, 18, 87);
        assert_eq!(square.main_diagonal(), [22, 17, 89, 11]);
        assert_eq!(square.anti_diagonal(), [87, 9, 24, 19]);
    }

    #[test]
    fn test_from_date() {
        let date = "14/07/2000".parse::<EchoDate>().unwrap();
        let square = MagicSquare::from_date(date);
        assert_eq!(square, date.echo_square());
        assert_eq!(square, MagicSquare::from(date));
        assert_eq!(square.magic_constant(), 45);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = MagicSquare::generate(14, 7, 20, 0);
        let b = MagicSquare::generate(14, 7, 20, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let square = MagicSquare::generate(22, 12, 18, 87);
        let text = square.to_string();
        assert!(text.contains("magic constant: 139"));
        assert!(text.lines().next().unwrap().contains("22"));
    }

    #[test]
    fn test_serde_round_trip() {
        let square = MagicSquare::generate(14, 7, 20, 0);
        let json = serde_json::to_string(&square).unwrap();
        let parsed: MagicSquare = serde_json::from_str(&json).unwrap();
        assert_eq!(square, parsed);
        assert_eq!(parsed.magic_constant(), 45);
    }
}
