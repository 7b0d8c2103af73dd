//! Camera module: model, view and projection transforms.
//!
//! Every function here is pure: the same inputs give the same matrix,
//! bit for bit. `TransformEngine` composes them per frame.

mod eye;
mod model;
mod view;
mod projection;
mod frustum_policy;

pub use eye::Eye;
pub use model::compute_model_transform;
pub use view::{
    camera_basis, check_look_direction, compute_view_transform, top_view_transform, WORLD_UP,
};
pub use projection::{
    ClipBounds, Projection, ProjectionKind,
    orthographic, orthographic_inverse, perspective, perspective_inverse,
};
pub use frustum_policy::FrustumPolicy;
