pub mod generation;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod validate;

pub use generation::generate_with_fallback;
pub use validate::validate;
