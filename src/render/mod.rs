pub mod pulse;
pub mod renderer;

pub use pulse::FruitPulse;
pub use renderer::Renderer;
