//! Case content entities

mod case;
mod character;
mod evidence;
mod visual_scene;

pub use case::{Case, CaseDelta};
pub use character::Character;
pub use evidence::Evidence;
pub use visual_scene::VisualScene;
