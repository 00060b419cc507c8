pub mod extensions;
pub mod render;
