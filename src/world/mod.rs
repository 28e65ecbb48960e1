pub mod parser;
pub mod world;

pub use parser::{parse_objects, GameObject, ObjectKind};
pub use world::World;
