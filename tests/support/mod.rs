pub mod build;
pub mod inspect;

#[allow(unused_imports)]
pub use optimatch::evolve::prelude::*;
#[allow(unused_imports)]
pub use rand::rngs::SmallRng;
#[allow(unused_imports)]
pub use rand::SeedableRng;
