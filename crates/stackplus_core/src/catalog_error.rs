//! Shape catalog error types

use std::fmt;
use std::io;

use stackplus_geom::GeometryError;

/// Error type for building or querying a [`ShapeCatalog`](crate::ShapeCatalog)
#[derive(Debug)]
pub enum CatalogError {
    /// Dataset file could not be read
    Io(io::Error),
    /// Dataset is not valid RON
    Parse(String),
    /// No shape with this name
    NotFound(String),
    /// Catalog holds no shapes, so nothing can be picked
    Empty,
    /// An entry failed validation; the whole load is rejected
    InvalidGeometry {
        name: String,
        source: GeometryError,
    },
}

impl CatalogError {
    /// Whether this is a lookup miss (a missing name, or nothing to pick from)
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_) | CatalogError::Empty)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "Catalog IO error: {}", err),
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {}", msg),
            CatalogError::NotFound(name) => write!(f, "Shape not found: {}", name),
            CatalogError::Empty => write!(f, "Shape not found: catalog is empty"),
            CatalogError::InvalidGeometry { name, source } => {
                write!(f, "Invalid geometry for shape '{}': {}", name, source)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::InvalidGeometry { source, .. } => Some(source),
            CatalogError::Parse(_) | CatalogError::NotFound(_) | CatalogError::Empty => None,
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<ron::error::SpannedError> for CatalogError {
    fn from(err: ron::error::SpannedError) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display() {
        let err = CatalogError::Io(io::Error::new(io::ErrorKind::NotFound, "file missing"));
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn test_not_found_display() {
        let err = CatalogError::NotFound("octagon".to_string());
        assert!(err.to_string().contains("octagon"));
        assert!(err.is_not_found());
        assert!(CatalogError::Empty.is_not_found());
    }

    #[test]
    fn test_invalid_geometry_names_shape() {
        let err = CatalogError::InvalidGeometry {
            name: "bowtie".to_string(),
            source: GeometryError::SelfIntersecting { first_edge: 0, second_edge: 2 },
        };
        let msg = err.to_string();
        assert!(msg.contains("bowtie"));
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let err: CatalogError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        match err {
            CatalogError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_parse_has_no_source() {
        let err = CatalogError::Parse("bad".to_string());
        assert!(err.source().is_none());
    }
}
