mod block;
pub mod galois;
pub mod rs;

pub use block::*;
pub use galois::GaloisField;
