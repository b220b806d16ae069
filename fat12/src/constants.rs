// FAT12 on-disk layout constants

use fatscope_core::SECTOR_SIZE;
use static_assertions::const_assert_eq;

// Boot sector offsets
pub const BS_OEM_NAME: usize = 0x03;
pub const BPB_BYTES_PER_SEC: usize = 0x0B;
pub const BPB_SEC_PER_CLUS: usize = 0x0D;
pub const BPB_RSVD_SEC_CNT: usize = 0x0E;
pub const BPB_NUM_FATS: usize = 0x10;
pub const BPB_ROOT_ENT_CNT: usize = 0x11;
pub const BPB_TOT_SEC16: usize = 0x13;
pub const BPB_MEDIA: usize = 0x15;
pub const BPB_FAT_SZ16: usize = 0x16;
pub const BPB_TOT_SEC32: usize = 0x20;
pub const BS_VOL_LAB: usize = 0x2B;
pub const BS_FIL_SYS_TYPE: usize = 0x36;

// Directory entry layout (offsets relative to slot start)
pub const DIR_ENTRY_SIZE: usize = 32;
pub const DIR_NAME: usize = 0x00;
pub const DIR_NAME_LEN: usize = 8;
pub const DIR_EXT: usize = 0x08;
pub const DIR_EXT_LEN: usize = 3;
pub const DIR_ATTR: usize = 0x0B;
pub const DIR_CRT_TIME: usize = 0x0E;
pub const DIR_CRT_DATE: usize = 0x10;
pub const DIR_LST_ACC_DATE: usize = 0x12;
pub const DIR_WRT_TIME: usize = 0x16;
pub const DIR_WRT_DATE: usize = 0x18;
pub const DIR_FST_CLUS: usize = 0x1A;
pub const DIR_FILE_SIZE: usize = 0x1C;

// First-byte sentinels for directory slots
pub const ENTRY_END: u8 = 0x00;
pub const ENTRY_DELETED: u8 = 0xE5;
pub const ENTRY_DOT: u8 = 0x2E;
pub const ENTRY_E5_ESCAPE: u8 = 0x05;

// Clusters 0 and 1 are reserved by the format
pub const MIN_DATA_CLUSTER: u16 = 2;

pub const ENTRIES_PER_SECTOR: usize = SECTOR_SIZE / DIR_ENTRY_SIZE;

const_assert_eq!(SECTOR_SIZE % DIR_ENTRY_SIZE, 0);
const_assert_eq!(ENTRIES_PER_SECTOR, 16);
