//! Lattice text rendering.
//!
//! Triangular lattices print as a right-leaning pyramid so that each node
//! sits between its two successors on the next row.

use num_traits::Float;
use std::fmt::Display;

/// Indentation added per remaining row when rendering a lattice.
const LATTICE_INDENT: usize = 5;

/// Separator written after every lattice cell.
const LATTICE_SEPARATOR: &str = "    ";

/// Width of a rendered lattice cell.
const LATTICE_CELL_WIDTH: usize = 6;

/// Render a triangular lattice, one line per row.
///
/// Row `k` of `R` rows is indented by `5 * (R - k)` spaces; each cell is
/// right-aligned in a 6-character field with `decimals` places and
/// followed by four spaces.  Every line ends with `'\n'`.
///
/// ```
/// use bt_core::utilities::data_formatters::format_lattice;
/// let text = format_lattice(&[vec![100.0], vec![110.0, 90.0]], 2);
/// assert_eq!(text.lines().count(), 2);
/// assert!(text.starts_with("          100.00    "));
/// ```
pub fn format_lattice<T: Float + Display>(rows: &[Vec<T>], decimals: usize) -> String {
    let row_count = rows.len();
    let mut out = String::new();
    for (k, row) in rows.iter().enumerate() {
        out.push_str(&" ".repeat(LATTICE_INDENT * (row_count - k)));
        for cell in row {
            out.push_str(&format!(
                "{:>width$.prec$}",
                cell,
                width = LATTICE_CELL_WIDTH,
                prec = decimals
            ));
            out.push_str(LATTICE_SEPARATOR);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_layout() {
        let rows = vec![vec![100.0], vec![112.24, 89.09], vec![125.98, 100.0, 79.38]];
        let text = format_lattice(&rows, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{}{}", " ".repeat(15), "100.00    "));
        assert_eq!(
            lines[2],
            format!("{}{}", " ".repeat(5), "125.98    100.00     79.38    ")
        );
    }

    #[test]
    fn empty_lattice_renders_nothing() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(format_lattice(&rows, 2).is_empty());
    }
}
