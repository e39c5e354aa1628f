//! Planar regions used to select boundary-condition zones.
//!
//! [`Region`] is the seam to whatever geometry engine the host application
//! uses; [`Polygon`] is a self-contained implementation for simple polygons.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshOrderError;

const EPS: f64 = 1e-12;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    /// Smallest box containing every point; `None` for an empty input.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f64; 2]>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = *it.next()?;
        let mut bb = BoundingBox {
            min: first,
            max: first,
        };
        for p in it {
            bb.min[0] = bb.min[0].min(p[0]);
            bb.min[1] = bb.min[1].min(p[1]);
            bb.max[0] = bb.max[0].max(p[0]);
            bb.max[1] = bb.max[1].max(p[1]);
        }
        Some(bb)
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }
}

/// Closed planar region with a containment predicate.
pub trait Region {
    /// `true` if `p` lies inside the region or on its outline.
    fn contains(&self, p: [f64; 2]) -> bool;
    /// Box enclosing the whole region.
    fn bounding_box(&self) -> BoundingBox;
}

/// Simple polygon given by its outline (closing vertex optional).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<[f64; 2]>,
    bbox: BoundingBox,
}

impl Polygon {
    pub fn new(mut vertices: Vec<[f64; 2]>) -> Result<Self, MeshOrderError> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(MeshOrderError::InvalidGeometry(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let bbox = BoundingBox::from_points(&vertices).ok_or_else(|| {
            MeshOrderError::InvalidGeometry("polygon has no vertices".into())
        })?;
        Ok(Self { vertices, bbox })
    }

    /// Axis-aligned rectangle `[x0, x1] x [y0, y1]`.
    pub fn rectangle(min: [f64; 2], max: [f64; 2]) -> Result<Self, MeshOrderError> {
        Self::new(vec![min, [max[0], min[1]], max, [min[0], max[1]]])
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    fn on_outline(&self, p: [f64; 2]) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| on_segment(p, self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

fn on_segment(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> bool {
    let cross = (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    let len2 = (b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2);
    if cross.abs() > EPS * len2.max(1.0) {
        return false;
    }
    let dot = (p[0] - a[0]) * (b[0] - a[0]) + (p[1] - a[1]) * (b[1] - a[1]);
    dot >= -EPS && dot <= len2 + EPS
}

/// Even-odd ray casting.
fn ray_cast(p: [f64; 2], vertices: &[[f64; 2]]) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi[1] > p[1]) != (vj[1] > p[1])
            && p[0] < (vj[0] - vi[0]) * (p[1] - vi[1]) / (vj[1] - vi[1]) + vi[0]
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Region for Polygon {
    fn contains(&self, p: [f64; 2]) -> bool {
        self.bbox.contains(p) && (ray_cast(p, &self.vertices) || self.on_outline(p))
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}
