pub mod coordinates;
pub mod navigation;
pub mod route;

pub use coordinates::Coordinate;
pub use navigation::{NavigationState, PositionFix};
pub use route::{Route, RoutePoint, RouteSegment, SynthesizeRouteRequest, TransportMode};
