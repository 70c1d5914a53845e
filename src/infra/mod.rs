//! Low-level infrastructure shared by the protocol layers.
pub mod codec;
