// view/ - Camera, environment and host input
//
// Everything the viewer's scroll and pointer drive. Geometry lives in
// scene/ and sim/; this module only decides how it is looked at.

pub mod camera;
pub mod environment;
pub mod input;

pub use camera::CameraRig;
pub use environment::{EnvironmentController, EnvironmentState, Fog};
pub use input::{PointerOffset, Projection, ScrollProgress};
