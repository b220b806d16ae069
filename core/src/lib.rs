pub mod device;
pub mod error;

pub use device::{SectorSource, SECTOR_SIZE};
pub use error::FatscopeError;
