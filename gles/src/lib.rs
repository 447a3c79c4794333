mod adapter;
mod libgles;

pub use adapter::Adapter;
pub use libgles::*;
