//! Boundary polygon loading and point-in-polygon containment
//!
//! The boundary input is either a GeoJSON-style document with a
//! `coordinates` ring or free text with one `lon lat` pair per line
//! (optionally comma-separated). Structured interpretation is attempted
//! first, then the line-oriented fallback.
//!
//! Containment uses the standard even-odd (ray casting) rule over a simple
//! polygon, with one documented convention: a point lying exactly on an edge
//! or vertex counts as inside. The edge check runs before the crossing test,
//! so the result never depends on ray direction.

use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Tolerance for the collinearity test in the on-edge check
const EDGE_EPSILON: f64 = 1e-12;

/// Axis-aligned bounding box of a polygon, exposed for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Whether a point falls inside or on the box
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

/// A simple polygon over (longitude, latitude) vertices.
///
/// The ring is implicitly closed: the last vertex connects back to the
/// first. Immutable once loaded. Longitudes are used exactly as given; no
/// antimeridian normalization is performed.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<(f64, f64)>,
    bounding_box: BoundingBox,
}

impl Polygon {
    /// Build a polygon from (longitude, latitude) vertices.
    ///
    /// Consecutive duplicate vertices and an explicit closing vertex equal
    /// to the first are dropped; at least 3 vertices must remain.
    /// `source` only labels the error diagnostics.
    pub fn new(vertices: Vec<(f64, f64)>, source: &str) -> Result<Self> {
        let mut ring: Vec<(f64, f64)> = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if ring.last() != Some(&vertex) {
                ring.push(vertex);
            }
        }
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        if ring.len() < 3 {
            return Err(Error::invalid_polygon(source, ring.len()));
        }

        let bounding_box = compute_bounding_box(&ring);
        Ok(Self {
            vertices: ring,
            bounding_box,
        })
    }

    /// Load a polygon from a boundary file.
    ///
    /// Tries the structured GeoJSON-style interpretation first, then falls
    /// back to line-oriented coordinate pairs. Fails with `EmptyPolygon`
    /// when neither strategy yields any coordinates.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let source = path.display().to_string();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read boundary file '{}'", source), e))?;

        let coords = match parse_structured(&text) {
            Some(coords) => {
                debug!("Boundary '{}' parsed as structured document", source);
                coords
            }
            None => {
                debug!(
                    "Boundary '{}' is not a structured document, trying coordinate pairs",
                    source
                );
                parse_coordinate_lines(&text)
            }
        };

        if coords.is_empty() {
            return Err(Error::empty_polygon(source));
        }

        let polygon = Self::new(coords, &source)?;
        info!(
            "Polygon loaded with {} vertices, bounds {:?}",
            polygon.vertex_count(),
            polygon.bounding_box()
        );
        Ok(polygon)
    }

    /// Number of vertices in the ring
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The polygon's axis-aligned bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// The ring vertices as (longitude, latitude) pairs
    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Even-odd containment test for a (longitude, latitude) point.
    ///
    /// Boundary convention: a point exactly on an edge or vertex is inside.
    /// Pure and deterministic: the same polygon/point pair always yields the
    /// same answer.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if self.on_boundary(lon, lat) {
            return true;
        }

        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];

            if (yi > lat) != (yj > lat) {
                let x_cross = (xj - xi) * (lat - yi) / (yj - yi) + xi;
                if lon < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Whether the point lies exactly on one of the ring's edges
    fn on_boundary(&self, lon: f64, lat: f64) -> bool {
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];

            let cross = (xj - xi) * (lat - yi) - (yj - yi) * (lon - xi);
            if cross.abs() <= EDGE_EPSILON
                && lon >= xi.min(xj) - EDGE_EPSILON
                && lon <= xi.max(xj) + EDGE_EPSILON
                && lat >= yi.min(yj) - EDGE_EPSILON
                && lat <= yi.max(yj) + EDGE_EPSILON
            {
                return true;
            }
            j = i;
        }
        false
    }
}

fn compute_bounding_box(vertices: &[(f64, f64)]) -> BoundingBox {
    let mut bbox = BoundingBox {
        min_lon: f64::INFINITY,
        min_lat: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
        max_lat: f64::NEG_INFINITY,
    };
    for &(lon, lat) in vertices {
        bbox.min_lon = bbox.min_lon.min(lon);
        bbox.min_lat = bbox.min_lat.min(lat);
        bbox.max_lon = bbox.max_lon.max(lon);
        bbox.max_lat = bbox.max_lat.max(lat);
    }
    bbox
}

/// Attempt the structured interpretation: a JSON document with a
/// `coordinates` field holding at least one ring of `[lon, lat]` pairs.
/// Only the outer ring is used. Returns `None` when the text is not valid
/// JSON or lacks a usable ring.
fn parse_structured(text: &str) -> Option<Vec<(f64, f64)>> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let ring = value.get("coordinates")?.as_array()?.first()?.as_array()?;

    let mut coords = Vec::with_capacity(ring.len());
    for pair in ring {
        let pair = pair.as_array()?;
        let lon = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        coords.push((lon, lat));
    }
    Some(coords)
}

/// Line-oriented fallback: each non-structural line contributes one
/// `lon lat` pair, commas treated as whitespace. Lines with fewer than two
/// numeric tokens are skipped without failing the load.
fn parse_coordinate_lines(text: &str) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('{') || line.starts_with('[') {
            continue;
        }

        let cleaned = line.replace(',', " ");
        let mut numbers = cleaned.split_whitespace().filter_map(|t| t.parse::<f64>().ok());
        if let (Some(lon), Some(lat)) = (numbers.next(), numbers.next()) {
            coords.push((lon, lat));
        }
    }
    coords
}
