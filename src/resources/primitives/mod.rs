pub mod box_shape;
pub mod circle;
pub mod cylinder;
pub mod lathe;
pub mod parametric;
pub mod plane;
pub mod polyhedron;
pub mod shape;
pub mod sphere;
pub mod tube;

pub use box_shape::create_box;
pub use circle::create_circle;
pub use cylinder::{CylinderOptions, create_cone, create_cylinder};
pub use lathe::create_lathe;
pub use parametric::{create_parametric, named_surface};
pub use plane::{PlaneOptions, create_plane};
pub use polyhedron::{Polyhedron, create_polyhedron};
pub use shape::{Shape, ShapePath, create_extrude, create_outlines, create_shape, heart_shape};
pub use sphere::{SphereOptions, create_sphere};
pub use tube::{TubeOptions, create_tube};
