//! Route values returned by path reconstruction

use std::fmt;

use serde::Serialize;

use crate::core::graph::VertexId;

/// One road traversed by a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from: VertexId,
    pub to: VertexId,
    pub name: String,
    pub distance: f64,
}

/// Result of a shortest-path query
///
/// `NoPath` is an ordinary outcome for vertices in different components,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Route {
    Found {
        source: VertexId,
        destination: VertexId,
        legs: Vec<RouteLeg>,
        total_distance: f64,
    },
    NoPath {
        source: VertexId,
        destination: VertexId,
    },
}

impl Route {
    pub fn is_found(&self) -> bool {
        matches!(self, Route::Found { .. })
    }

    /// Roads from source to destination; empty when there is no path
    pub fn legs(&self) -> &[RouteLeg] {
        match self {
            Route::Found { legs, .. } => legs,
            Route::NoPath { .. } => &[],
        }
    }

    pub fn total_distance(&self) -> Option<f64> {
        match self {
            Route::Found { total_distance, .. } => Some(*total_distance),
            Route::NoPath { .. } => None,
        }
    }

    /// Street names in travel order
    pub fn street_names(&self) -> Vec<&str> {
        self.legs().iter().map(|leg| leg.name.as_str()).collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Found { legs, destination, .. } if legs.is_empty() => {
                write!(f, "Already at {destination} (distance: 0)")
            }
            Route::Found { total_distance, .. } => {
                write!(f, "{} (distance: {total_distance})", self.street_names().join(" -> "))
            }
            Route::NoPath { source, destination } => {
                write!(f, "No path from {source} to {destination}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Route {
        Route::Found {
            source: 1,
            destination: 4,
            legs: vec![
                RouteLeg { from: 1, to: 2, name: "Main St".to_string(), distance: 2.0 },
                RouteLeg { from: 2, to: 4, name: "Oak St".to_string(), distance: 3.5 },
            ],
            total_distance: 5.5,
        }
    }

    #[test]
    fn test_route_accessors() {
        let route = sample();
        assert!(route.is_found());
        assert_eq!(route.street_names(), vec!["Main St", "Oak St"]);
        assert_eq!(route.total_distance(), Some(5.5));

        let none = Route::NoPath { source: 1, destination: 9 };
        assert!(!none.is_found());
        assert!(none.legs().is_empty());
        assert_eq!(none.total_distance(), None);
    }

    #[test]
    fn test_route_display() {
        assert_eq!(sample().to_string(), "Main St -> Oak St (distance: 5.5)");
        assert_eq!(
            Route::NoPath { source: 1, destination: 9 }.to_string(),
            "No path from 1 to 9"
        );
    }

    #[test]
    fn test_route_json_is_tagged() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["legs"][1]["name"], "Oak St");
        assert_eq!(json["total_distance"], 5.5);

        let json = serde_json::to_value(Route::NoPath { source: 1, destination: 9 }).unwrap();
        assert_eq!(json["status"], "no_path");
        assert_eq!(json["destination"], 9);
    }
}
