//! Volumes blend effect settings from several sources into one resolved
//! value per camera.

mod component;
pub use component::*;

mod manager;
pub use manager::*;

mod parameter;
pub use parameter::*;
