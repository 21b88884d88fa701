//! Sweep-hull triangulation of a planar point set.
//!
//! Points are inserted in lexicographic `(x, y)` order. Each new point lies
//! outside the hull built so far, so it only has to be fanned onto the hull
//! edges it can see. The result covers the convex hull of the input with
//! counter-clockwise triangles, using nothing but orientation tests.

use crate::whisper::domain::warp_error::WarpError;

/// `[x, y]` in envelope coordinates (bin, frame).
pub type Point = [f64; 2];

/// Coordinates closer than this are treated as the same control point.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// Relative tolerance for deciding that three points are collinear.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// Twice the signed area of `abc`; positive when counter-clockwise.
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn side(a: Point, b: Point, c: Point) -> i8 {
    let area = orient(a, b, c);
    let ab = (b[0] - a[0]).hypot(b[1] - a[1]);
    let ac = (c[0] - a[0]).hypot(c[1] - a[1]);
    let tolerance = COLLINEAR_EPSILON * ab * ac;
    if area > tolerance {
        1
    } else if area < -tolerance {
        -1
    } else {
        0
    }
}

/// Triangulate `points`, returning counter-clockwise index triples.
pub fn triangulate(points: &[Point]) -> Result<Vec<[usize; 3]>, WarpError> {
    if points.len() < 3 {
        return Err(WarpError::CollinearControlPoints);
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a][0]
            .total_cmp(&points[b][0])
            .then(points[a][1].total_cmp(&points[b][1]))
    });

    for pair in order.windows(2) {
        let (a, b) = (points[pair[0]], points[pair[1]]);
        if (a[0] - b[0]).abs() <= DUPLICATE_EPSILON && (a[1] - b[1]).abs() <= DUPLICATE_EPSILON {
            return Err(WarpError::DuplicateControlPoint { x: b[0], y: b[1] });
        }
    }

    // Leading run of collinear points, closed by the first point off the line.
    let first = points[order[0]];
    let second = points[order[1]];
    let apex_pos = (2..order.len())
        .find(|&k| side(first, second, points[order[k]]) != 0)
        .ok_or(WarpError::CollinearControlPoints)?;
    let chain = &order[..apex_pos];
    let apex = order[apex_pos];
    let chain_end = points[chain[chain.len() - 1]];

    let mut triangles = Vec::with_capacity(2 * points.len());
    let mut hull: Vec<usize>;
    if side(first, chain_end, points[apex]) > 0 {
        for link in chain.windows(2) {
            triangles.push([link[0], link[1], apex]);
        }
        hull = chain.to_vec();
        hull.push(apex);
    } else {
        for link in chain.windows(2) {
            triangles.push([link[1], link[0], apex]);
        }
        hull = chain.iter().rev().copied().collect();
        hull.push(apex);
    }

    for &idx in &order[apex_pos + 1..] {
        hull = insert_outside_point(points, &hull, idx, &mut triangles)?;
    }

    Ok(triangles)
}

/// Fan `idx` onto every hull edge it sees and return the grown hull.
fn insert_outside_point(
    points: &[Point],
    hull: &[usize],
    idx: usize,
    triangles: &mut Vec<[usize; 3]>,
) -> Result<Vec<usize>, WarpError> {
    let n = hull.len();
    let p = points[idx];
    let visible: Vec<bool> = (0..n)
        .map(|i| side(points[hull[i]], points[hull[(i + 1) % n]], p) < 0)
        .collect();

    let start = (0..n)
        .find(|&i| visible[i] && !visible[(i + n - 1) % n])
        .ok_or(WarpError::CollinearControlPoints)?;
    let mut end = start;
    while visible[(end + 1) % n] && (end + 1) % n != start {
        end = (end + 1) % n;
    }

    let mut edge = start;
    loop {
        triangles.push([hull[(edge + 1) % n], hull[edge], idx]);
        if edge == end {
            break;
        }
        edge = (edge + 1) % n;
    }

    let mut grown = Vec::with_capacity(n + 1);
    grown.push(idx);
    let mut i = (end + 1) % n;
    loop {
        grown.push(hull[i]);
        if i == start {
            break;
        }
        i = (i + 1) % n;
    }
    Ok(grown)
}

/// Triangulate the tensor grid `columns x rows` whose points are laid out
/// row-major (`row * columns.len() + column`).
///
/// Quad `(r, c)` becomes cells `2 * (r * (columns.len() - 1) + c)` (lower
/// right) and the one after it (upper left), both counter-clockwise.
pub fn triangulate_grid(columns: &[f64], rows: &[f64]) -> Result<Vec<[usize; 3]>, WarpError> {
    if columns.len() < 2 || rows.len() < 2 {
        return Err(WarpError::CollinearControlPoints);
    }
    for axis in [columns, rows] {
        for pair in axis.windows(2) {
            if pair[1] <= pair[0] {
                return Err(WarpError::UnorderedGridAxis {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
    }

    let width = columns.len();
    let mut triangles = Vec::with_capacity(2 * (width - 1) * (rows.len() - 1));
    for r in 0..rows.len() - 1 {
        for c in 0..width - 1 {
            let lower = r * width + c;
            let upper = lower + width;
            triangles.push([lower, lower + 1, upper + 1]);
            triangles.push([lower, upper + 1, upper]);
        }
    }
    Ok(triangles)
}
