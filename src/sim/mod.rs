//! The simulation driver: owns the active drive, the tick clock, the user's
//! inputs and the caches the presentation layer reads.

pub mod clock;
pub mod controller;
pub mod settings;
pub mod units;

pub use clock::TickClock;
pub use controller::SimulationController;
pub use settings::SimulationSettings;
pub use units::{TorqueUnit, parse_lenient};
