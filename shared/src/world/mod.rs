mod cell;
mod designate;
mod object_ref;

pub use cell::{Cell, Rot4};
pub use designate::DesignateWorld;
pub use object_ref::ObjectId;
