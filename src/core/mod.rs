pub mod clock;
pub mod controller;
pub mod input;
pub mod input_adapter;
pub mod timer;

pub use clock::*;
pub use controller::*;
pub use input::*;
pub use input_adapter::*;
pub use timer::*;
