//! Kernel routines over arbitrary-precision decimal values.

mod machine_range;
mod number_theory;
mod special_functions;

pub use machine_range::*;
pub use number_theory::*;
pub use special_functions::*;
