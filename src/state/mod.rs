pub mod confetti;

pub use confetti::{Confetti, ConfettiParticle};
