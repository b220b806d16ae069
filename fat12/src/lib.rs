// FAT12 on-disk structure interpreter: boot sector geometry, directory
// entries, sector addressing, and stack-based directory navigation.

pub mod boot_sector;
pub mod constants;
pub mod dir_entry;
pub mod directory;
pub mod image;
pub mod layout;
pub mod navigation;
pub mod reader;

pub use boot_sector::VolumeGeometry;
pub use dir_entry::{DirEntry, FatAttributes, FatDateTime};
pub use directory::{scan_sector, SectorScan};
pub use image::{ImageFile, MemoryImage};
pub use layout::cluster_to_sector;
pub use navigation::NavStack;
pub use reader::Fat12Reader;
