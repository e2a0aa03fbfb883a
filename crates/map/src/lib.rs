#![warn(missing_docs)]
//! Static floorplan data: walls, room labels, the decorative route, and the
//! destination marker. The plan is demo scenery, not a navigable graph.

mod loader;
mod route;

pub use loader::{load_floorplan, load_floorplan_strict, FloorplanDef};
pub use route::Route;

use glam::Vec3;
use thiserror::Error;

/// Validation failures while building a floorplan.
#[derive(Debug, Error)]
pub enum FloorplanError {
    /// A label or route point lies outside the floor extent.
    #[error("{what} at {pos:?} lies outside the {extent}x{extent} floor")]
    OutOfBounds {
        /// What was out of bounds (label name or "route point").
        what: String,
        /// The offending position.
        pos: [f32; 3],
        /// Floor side length.
        extent: f32,
    },
    /// The route needs at least two control points to form a path.
    #[error("route has {0} control points, need at least 2")]
    DegenerateRoute(usize),
}

/// One axis-aligned wall segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    /// Center of the wall box.
    pub center: Vec3,
    /// Full extents along each axis.
    pub size: Vec3,
}

/// A room name rendered flat on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLabel {
    /// Display text.
    pub name: String,
    /// Anchor position just above the floor.
    pub position: Vec3,
}

/// Where the destination beacon stands while a session is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestMarker {
    /// Base position on the floor.
    pub position: Vec3,
}

/// The complete static scene description.
#[derive(Debug, Clone)]
pub struct Floorplan {
    /// Side length of the square floor.
    pub extent: f32,
    /// All wall segments, outer shell first.
    pub walls: Vec<Wall>,
    /// Room labels.
    pub labels: Vec<RoomLabel>,
    /// Decorative route shown during navigation. Hardcoded, not computed.
    pub route: Route,
    /// Destination beacon position.
    pub marker: DestMarker,
}

impl Floorplan {
    /// The built-in demo plan: a 20x20 floor, four outer walls, three inner
    /// walls, four labelled rooms, and a route from the entrance to the IT
    /// department.
    pub fn sample() -> Self {
        let wall = |cx: f32, cz: f32, sx: f32, sz: f32| Wall {
            center: Vec3::new(cx, 1.5, cz),
            size: Vec3::new(sx, 3.0, sz),
        };
        let plan = Self {
            extent: 20.0,
            walls: vec![
                // Outer shell
                wall(0.0, 10.0, 20.0, 0.2),
                wall(0.0, -10.0, 20.0, 0.2),
                wall(10.0, 0.0, 0.2, 20.0),
                wall(-10.0, 0.0, 0.2, 20.0),
                // Inner partitions
                wall(-2.0, 5.0, 8.0, 0.2),
                wall(4.0, 0.0, 0.2, 10.0),
                wall(-5.0, -3.0, 10.0, 0.2),
            ],
            labels: vec![
                label("Main Entrance", -7.0, 7.0),
                label("Conference Room A", 7.0, 7.0),
                label("IT Department", 7.0, -7.0),
                label("Cafeteria", -7.0, -7.0),
            ],
            route: Route::new(vec![
                Vec3::new(-7.0, 0.0, 7.0),
                Vec3::new(-7.0, 0.0, 0.0),
                Vec3::new(-2.0, 0.0, 0.0),
                Vec3::new(-2.0, 0.0, -7.0),
                Vec3::new(7.0, 0.0, -7.0),
            ]),
            marker: DestMarker {
                position: Vec3::new(7.0, 0.0, -7.0),
            },
        };
        debug_assert!(plan.validate().is_ok());
        plan
    }

    /// Check the plan's internal invariants.
    pub fn validate(&self) -> Result<(), FloorplanError> {
        let half = self.extent / 2.0;
        for label in &self.labels {
            if label.position.x.abs() > half || label.position.z.abs() > half {
                return Err(FloorplanError::OutOfBounds {
                    what: label.name.clone(),
                    pos: label.position.to_array(),
                    extent: self.extent,
                });
            }
        }
        if self.route.control_points().len() < 2 {
            return Err(FloorplanError::DegenerateRoute(
                self.route.control_points().len(),
            ));
        }
        for point in self.route.control_points() {
            if point.x.abs() > half || point.z.abs() > half {
                return Err(FloorplanError::OutOfBounds {
                    what: "route point".to_string(),
                    pos: point.to_array(),
                    extent: self.extent,
                });
            }
        }
        Ok(())
    }
}

fn label(name: &str, x: f32, z: f32) -> RoomLabel {
    RoomLabel {
        name: name.to_string(),
        position: Vec3::new(x, 0.1, z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_plan_is_valid() {
        Floorplan::sample().validate().expect("sample plan valid");
    }

    #[test]
    fn route_connects_entrance_to_marker() {
        let plan = Floorplan::sample();
        let points = plan.route.control_points();
        let entrance = plan
            .labels
            .iter()
            .find(|l| l.name == "Main Entrance")
            .unwrap();
        assert!(points[0].distance(entrance.position) < 0.2);
        assert_eq!(*points.last().unwrap(), plan.marker.position);
    }

    #[test]
    fn out_of_bounds_labels_are_rejected() {
        let mut plan = Floorplan::sample();
        plan.labels.push(RoomLabel {
            name: "Helipad".to_string(),
            position: glam::Vec3::new(40.0, 0.1, 0.0),
        });
        assert!(matches!(
            plan.validate(),
            Err(FloorplanError::OutOfBounds { .. })
        ));
    }
}
