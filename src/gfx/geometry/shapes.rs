//! # Gizmo Shape Tables
//!
//! Fixed local-space geometry for the two gizmo shapes. The tables are
//! hand-authored, not generated, and must match the marker geometry exactly.

use super::Shape;

/// Flat quad standing on the local X axis, one unit wide and one unit tall (+Y).
pub const PLANE_SHAPE: Shape = Shape {
    name: "plane",
    vertices: &[
        [-0.50, 0.0, 0.0],
        [-0.50, 1.00, 0.0],
        [0.50, 1.00, 0.0],
        [0.50, 0.0, 0.0],
    ],
    triangles: &[[0, 1, 2], [0, 2, 3]],
};

/// Arrow-like solid: a 0.2 unit cube with a tapered stem rising along +Z
/// and a small notch pointing towards +Y.
#[rustfmt::skip]
pub const SNAP_SHAPE: Shape = Shape {
    name: "snap",
    vertices: &[
        [-0.062771, -0.062771,  0.1000],
        [-0.062771,  0.062771,  0.1000],
        [-0.1000,   -0.1000,   -0.1000],
        [-0.1000,    0.1000,   -0.1000],
        [ 0.062771, -0.062771,  0.1000],
        [ 0.062771,  0.062771,  0.1000],
        [ 0.1000,   -0.1000,   -0.1000],
        [ 0.1000,    0.1000,   -0.1000],
        [ 0.1000,    0.099407, -0.1000],
        [ 0.1000,    0.1000,   -0.099101],
        [ 0.0225,    0.177369,  0.0225],
        [-0.1000,   -0.1000,    0.1000],
        [-0.1000,    0.1000,    0.1000],
        [ 0.1000,    0.1000,    0.1000],
        [ 0.1000,   -0.1000,    0.1000],
        [-0.062771, -0.062771,  0.306351],
        [-0.062771,  0.062771,  0.306351],
        [ 0.062771,  0.062771,  0.306351],
        [ 0.062771, -0.062771,  0.306351],
    ],
    triangles: &[
        [11, 2, 12], [8, 7, 3],   [14, 13, 9],
        [5, 17, 1],  [2, 11, 6],  [9, 10, 7],
        [13, 10, 9], [7, 8, 9],   [12, 3, 10],
        [12, 10, 13], [0, 11, 1], [5, 13, 4],
        [4, 14, 0],  [1, 12, 5],  [18, 15, 17],
        [4, 18, 5],  [0, 15, 4],  [1, 16, 0],
        [2, 3, 12],  [8, 2, 6],   [8, 3, 2],
        [9, 6, 14],  [9, 8, 6],   [17, 16, 1],
        [11, 14, 6], [10, 3, 7],  [11, 12, 1],
        [13, 14, 4], [14, 11, 0], [12, 13, 5],
        [15, 16, 17], [18, 17, 5], [15, 18, 4],
        [16, 15, 0],
    ],
};
