/// Separator between the day, month, and year fields of a date string
pub const DATE_SEPARATOR: char = '/';

/// Separator used inside URL-safe share tokens ('.' is an unreserved
/// URI character, so tokens embed in links without percent-encoding)
pub const TOKEN_SEPARATOR: char = '.';

/// Number of fields in a `DD/MM/YYYY` date string
pub const DATE_FIELD_COUNT: usize = 3;

/// Side length of the echo square
pub const SIDE: usize = 4;

/// Cells in every summed line: each row, column, diagonal, and 2x2
/// quadrant contains exactly this many cells, so a uniform per-cell
/// offset raises every line sum by the same multiple
pub const CELLS_PER_LINE: i32 = 4;

/// Divisor splitting a full year into century and year-of-century
pub(crate) const CENTURY_DIVISOR: i32 = 100;
