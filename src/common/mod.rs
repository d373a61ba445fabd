pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod info;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod version_db;

pub use bitstream::*;
pub use codec::*;
pub use ec::*;
pub use error::*;
pub use info::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
