// Library exports for the portfolio background field and terminal assistant
pub mod assistant;
pub mod config;
pub mod console;
pub mod content;
pub mod gemini;
pub mod particle_field;
pub mod renderer;
pub mod terminal;

// Re-export main types
pub use assistant::{responder_for, DemoResponder, Responder};
pub use config::AppConfig;
pub use content::Language;
pub use gemini::GeminiResponder;
pub use particle_field::{Particle, ParticleField};
pub use renderer::Renderer;
pub use terminal::Terminal;
