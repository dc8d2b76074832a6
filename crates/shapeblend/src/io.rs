//! JSON point lists: an array of `[x, y]` numeric pairs.

use std::fs;
use std::path::Path;

use crate::error::BlendError;
use crate::geom2::Polygon;

/// Parse a polygon from JSON text; `origin` only labels errors.
pub fn parse_points(text: &str, origin: &Path) -> Result<Polygon, BlendError> {
    let xy: Vec<[f64; 2]> =
        serde_json::from_str(text).map_err(|e| BlendError::load(origin, e))?;
    if xy.len() < 3 {
        return Err(BlendError::TooFewVertices { count: xy.len() });
    }
    Polygon::from_xy(&xy)
}

pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Polygon, BlendError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| BlendError::load(path, e))?;
    let poly = parse_points(&text, path)?;
    tracing::debug!(path = %path.display(), vertices = poly.len(), "polygon loaded");
    Ok(poly)
}

pub fn save_points<P: AsRef<Path>>(path: P, poly: &Polygon) -> Result<(), BlendError> {
    let path = path.as_ref();
    let text = serde_json::to_string(&poly.to_xy()).map_err(|e| BlendError::load(path, e))?;
    fs::write(path, text).map_err(|e| BlendError::load(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_pairs_in_order() {
        let p = parse_points("[[0, 0], [2.5, 0], [1, 3]]", Path::new("inline")).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.points()[1].x, 2.5);
        assert_eq!(p.winding(), 1);
    }

    #[test]
    fn rejects_malformed_and_short_input() {
        let err = parse_points("[[0, 0], [1]]", Path::new("bad.json")).unwrap_err();
        match err {
            BlendError::Load { path, .. } => assert_eq!(path, Path::new("bad.json")),
            other => panic!("unexpected error: {other}"),
        }
        let err = parse_points("[[0, 0], [1, 1]]", Path::new("short.json")).unwrap_err();
        assert!(matches!(err, BlendError::TooFewVertices { count: 2 }));
    }

    #[test]
    fn save_then_load_preserves_vertices() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poly.json");
        let p = Polygon::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
        save_points(&path, &p).unwrap();
        assert_eq!(load_points(&path).unwrap(), p);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let err = load_points(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, BlendError::Load { .. }));
    }
}
