pub mod bridge;
pub mod error;
pub mod generator;
pub mod layouter;
pub mod params;
pub mod renderer;

pub use error::{CardError, CardResult};
pub use generator::Generator;
pub use params::{CardParams, Color, Compositing};
