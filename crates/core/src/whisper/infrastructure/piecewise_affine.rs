use crate::whisper::domain::warp_error::WarpError;

use super::triangulation::{triangulate, triangulate_grid, Point};

/// Barycentric coordinates below this are still counted as inside a triangle.
const INSIDE_EPSILON: f64 = 1e-9;

/// One triangle of the mesh with its precomputed barycentric solve.
struct Cell {
    vertices: [usize; 3],
    origin: Point,
    inverse: [[f64; 2]; 2],
}

impl Cell {
    fn new(vertices: [usize; 3], points: &[Point]) -> Self {
        let [a, b, c] = vertices.map(|i| points[i]);
        let (e1x, e1y) = (b[0] - a[0], b[1] - a[1]);
        let (e2x, e2y) = (c[0] - a[0], c[1] - a[1]);
        // Triangulation only emits counter-clockwise cells, so det > 0.
        let det = e1x * e2y - e2x * e1y;
        Self {
            vertices,
            origin: a,
            inverse: [[e2y / det, -e2x / det], [-e1y / det, e1x / det]],
        }
    }

    fn barycentric(&self, p: Point) -> Option<[f64; 3]> {
        let dx = p[0] - self.origin[0];
        let dy = p[1] - self.origin[1];
        let l1 = self.inverse[0][0] * dx + self.inverse[0][1] * dy;
        let l2 = self.inverse[1][0] * dx + self.inverse[1][1] * dy;
        let l0 = 1.0 - l1 - l2;
        if l0 >= -INSIDE_EPSILON && l1 >= -INSIDE_EPSILON && l2 >= -INSIDE_EPSILON {
            Some([l0, l1, l2])
        } else {
            None
        }
    }
}

/// How a query point finds its cell.
enum Locator {
    /// Try the hinted cell, then every cell in turn.
    Scan,
    /// Cells of a tensor grid: binary search on each axis picks the quad.
    Grid { columns: Vec<f64>, rows: Vec<f64> },
}

/// Transform that is affine inside each triangle of the source mesh and
/// continuous across shared edges.
///
/// Built fresh from a set of point correspondences; nothing is shared
/// between instances.
pub struct PiecewiseAffineTransform {
    destination: Vec<Point>,
    cells: Vec<Cell>,
    locator: Locator,
}

impl PiecewiseAffineTransform {
    /// Fit the transform mapping each `source[i]` onto `destination[i]`.
    pub fn estimate(source: &[Point], destination: &[Point]) -> Result<Self, WarpError> {
        if source.len() != destination.len() {
            return Err(WarpError::MismatchedControlPoints {
                source_len: source.len(),
                destination_len: destination.len(),
            });
        }
        let cells = triangulate(source)?
            .into_iter()
            .map(|vertices| Cell::new(vertices, source))
            .collect();
        Ok(Self {
            destination: destination.to_vec(),
            cells,
            locator: Locator::Scan,
        })
    }

    /// Fit the transform from the grid `columns x rows` (points row-major,
    /// `[column, row]`) onto `destination`. Lookup cost does not grow with
    /// the number of cells.
    pub fn estimate_grid(
        columns: &[f64],
        rows: &[f64],
        destination: &[Point],
    ) -> Result<Self, WarpError> {
        let source: Vec<Point> = rows
            .iter()
            .flat_map(|&y| columns.iter().map(move |&x| [x, y]))
            .collect();
        if source.len() != destination.len() {
            return Err(WarpError::MismatchedControlPoints {
                source_len: source.len(),
                destination_len: destination.len(),
            });
        }
        let cells = triangulate_grid(columns, rows)?
            .into_iter()
            .map(|vertices| Cell::new(vertices, &source))
            .collect();
        Ok(Self {
            destination: destination.to_vec(),
            cells,
            locator: Locator::Grid {
                columns: columns.to_vec(),
                rows: rows.to_vec(),
            },
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Map `p`, or `None` when it falls outside the mesh.
    pub fn apply(&self, p: Point) -> Option<Point> {
        let mut hint = 0;
        self.apply_with_hint(p, &mut hint)
    }

    /// Like [`apply`](Self::apply), trying cell `hint` first and updating it
    /// to the cell that matched. Neighbouring queries usually share a cell.
    pub fn apply_with_hint(&self, p: Point, hint: &mut usize) -> Option<Point> {
        if let Some(cell) = self.cells.get(*hint) {
            if let Some(weights) = cell.barycentric(p) {
                return Some(self.interpolate(cell, weights));
            }
        }
        let candidates = match &self.locator {
            Locator::Scan => 0..self.cells.len(),
            Locator::Grid { columns, rows } => {
                let c = interval(columns, p[0])?;
                let r = interval(rows, p[1])?;
                let quad = r * (columns.len() - 1) + c;
                2 * quad..2 * quad + 2
            }
        };
        for i in candidates {
            let cell = &self.cells[i];
            if let Some(weights) = cell.barycentric(p) {
                *hint = i;
                return Some(self.interpolate(cell, weights));
            }
        }
        None
    }

    fn interpolate(&self, cell: &Cell, weights: [f64; 3]) -> Point {
        let mut out = [0.0, 0.0];
        for (&vertex, weight) in cell.vertices.iter().zip(weights) {
            let d = self.destination[vertex];
            out[0] += weight * d[0];
            out[1] += weight * d[1];
        }
        out
    }
}

/// Index of the axis interval holding `v`, or `None` beyond either end.
fn interval(axis: &[f64], v: f64) -> Option<usize> {
    let (first, last) = (axis[0], axis[axis.len() - 1]);
    let tolerance = INSIDE_EPSILON * (last - first);
    if v < first - tolerance || v > last + tolerance {
        return None;
    }
    Some(axis.partition_point(|&a| a <= v).clamp(1, axis.len() - 1) - 1)
}
