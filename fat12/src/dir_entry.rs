// FAT12 directory entry decoding (8.3 names, attributes, packed timestamps)

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use chrono::{NaiveDate, NaiveDateTime};
use fatscope_core::FatscopeError;
use serde::Serialize;

use crate::constants::*;

/// Directory entry attribute bit-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FatAttributes(pub u8);

impl FatAttributes {
    pub const READ_ONLY: u8 = 0x01;
    pub const HIDDEN: u8 = 0x02;
    pub const SYSTEM: u8 = 0x04;
    pub const VOLUME_ID: u8 = 0x08;
    pub const DIRECTORY: u8 = 0x10;
    pub const ARCHIVE: u8 = 0x20;
    // Long-filename continuation slots carry all four low bits at once
    pub const LFN: u8 = Self::READ_ONLY | Self::HIDDEN | Self::SYSTEM | Self::VOLUME_ID;

    pub fn is_read_only(&self) -> bool {
        self.0 & Self::READ_ONLY != 0
    }
    pub fn is_hidden(&self) -> bool {
        self.0 & Self::HIDDEN != 0
    }
    pub fn is_system(&self) -> bool {
        self.0 & Self::SYSTEM != 0
    }
    pub fn is_volume_id(&self) -> bool {
        self.0 & Self::VOLUME_ID != 0
    }
    pub fn is_directory(&self) -> bool {
        self.0 & Self::DIRECTORY != 0
    }
    pub fn is_archive(&self) -> bool {
        self.0 & Self::ARCHIVE != 0
    }
    pub fn is_lfn(&self) -> bool {
        self.0 == Self::LFN
    }
}

/// Calendar fields unpacked from a FAT date/time word pair.
///
/// Decode is pure bit extraction: out-of-calendar values (month 0, day 31
/// in February) pass through exactly as stored. `to_naive` is the place
/// where calendar validity gets checked, for callers that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FatDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl FatDateTime {
    /// Unpack a date word and a time word.
    ///
    /// Date: bits 15-9 year since 1980, bits 8-5 month, bits 4-0 day.
    /// Time: bits 15-11 hours, bits 10-5 minutes, bits 4-0 seconds/2.
    pub fn from_words(date: u16, time: u16) -> Self {
        Self {
            year: ((date >> 9) & 0x7F) + 1980,
            month: ((date >> 5) & 0x0F) as u8,
            day: (date & 0x1F) as u8,
            hour: ((time >> 11) & 0x1F) as u8,
            minute: ((time >> 5) & 0x3F) as u8,
            second: ((time & 0x1F) * 2) as u8,
        }
    }

    /// Convert to a chrono timestamp, or `None` when the stored bits do
    /// not name a real calendar instant.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)?
            .and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
    }
}

impl fmt::Display for FatDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// One decoded 32-byte directory slot.
///
/// Constructed fresh each time a slot is scanned; a read view over the
/// stored bytes, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub attributes: FatAttributes,
    pub created: FatDateTime,
    pub last_access: FatDateTime,
    pub last_write: FatDateTime,
    pub start_cluster: u16,
    pub size: u32,
}

impl DirEntry {
    /// Decode one 32-byte slot.
    pub fn decode(slot: &[u8]) -> Result<Self, FatscopeError> {
        if slot.len() != DIR_ENTRY_SIZE {
            return Err(FatscopeError::InvalidInput(format!(
                "directory slot is {} bytes, expected {}",
                slot.len(),
                DIR_ENTRY_SIZE
            )));
        }

        let name = decode_83_name(
            &slot[DIR_NAME..DIR_NAME + DIR_NAME_LEN],
            &slot[DIR_EXT..DIR_EXT + DIR_EXT_LEN],
        );

        let crt_time = LittleEndian::read_u16(&slot[DIR_CRT_TIME..]);
        let crt_date = LittleEndian::read_u16(&slot[DIR_CRT_DATE..]);
        let acc_date = LittleEndian::read_u16(&slot[DIR_LST_ACC_DATE..]);
        let wrt_time = LittleEndian::read_u16(&slot[DIR_WRT_TIME..]);
        let wrt_date = LittleEndian::read_u16(&slot[DIR_WRT_DATE..]);

        Ok(Self {
            name,
            attributes: FatAttributes(slot[DIR_ATTR]),
            created: FatDateTime::from_words(crt_date, crt_time),
            // Last access stores a date only; the time word is absent
            last_access: FatDateTime::from_words(acc_date, 0),
            last_write: FatDateTime::from_words(wrt_date, wrt_time),
            start_cluster: LittleEndian::read_u16(&slot[DIR_FST_CLUS..]),
            size: LittleEndian::read_u32(&slot[DIR_FILE_SIZE..]),
        })
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.is_directory()
    }
}

/// Join a space-padded 8-byte base and 3-byte extension into a display name.
fn decode_83_name(base: &[u8], ext: &[u8]) -> String {
    let mut name = String::new();

    for (i, &b) in trim_padding(base).iter().enumerate() {
        // 0x05 escapes a name whose real first byte is the deleted marker
        if i == 0 && b == ENTRY_E5_ESCAPE {
            name.push(ENTRY_DELETED as char);
        } else {
            name.push(b as char);
        }
    }

    let ext = trim_padding(ext);
    if !ext.is_empty() {
        name.push('.');
        for &b in ext {
            name.push(b as char);
        }
    }

    name
}

fn trim_padding(field: &[u8]) -> &[u8] {
    let end = field
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(0, |pos| pos + 1);
    &field[..end]
}
