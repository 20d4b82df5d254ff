// sim/ - Per-frame entity updates
//
// Each simulator owns its entity list and mutates it once per tick.
// Nothing here is shared between simulators.

pub mod fish;
pub mod seaweed;
pub mod wave;

pub use fish::{Fish, FishBody, FishColor, FishSwarm, TailFin, Wiggle};
pub use seaweed::{Seaweed, SeaweedField};
pub use wave::{WaveField, WaveShape};
