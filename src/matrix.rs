//! Rectangular grid helper

/// `rows` × `cols` grid with every cell set to a clone of `fill`
///
/// Rows are independent vectors, so writing one cell never touches another
/// row. A zero dimension gives an empty grid (or empty rows).
pub fn matrix<T: Clone>(rows: usize, cols: usize, fill: T) -> Vec<Vec<T>> {
    vec![vec![fill; cols]; rows]
}
