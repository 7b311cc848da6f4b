//! 2-simplex math: ILR transform, 2x2 linear algebra, softmax closure,
//! and simplex clamping. Pure, deterministic, never panics.

pub mod ilr;
pub mod mat2;
pub mod simplex;

pub use ilr::{ilr_forward, ilr_inverse};
pub use mat2::Mat2;
pub use simplex::{clamp_to_simplex, softmax_closure};
