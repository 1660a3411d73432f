pub mod display;
pub mod node;
pub mod scene;
pub mod space;

pub use display::*;
pub use node::*;
pub use scene::*;
pub use space::*;
