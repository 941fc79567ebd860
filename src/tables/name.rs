//! A [Naming Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/name) implementation.

use crate::parser::{FromData, LazyArray16, Stream};
use crate::PlatformId;

/// A [name ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-ids).
pub mod name_id {
    #![allow(missing_docs)]

    pub const COPYRIGHT_NOTICE: u16 = 0;
    pub const FAMILY: u16 = 1;
    pub const SUBFAMILY: u16 = 2;
    pub const UNIQUE_ID: u16 = 3;
    pub const FULL_NAME: u16 = 4;
    pub const VERSION: u16 = 5;
    pub const POST_SCRIPT_NAME: u16 = 6;
    pub const TYPOGRAPHIC_FAMILY: u16 = 16;
    pub const TYPOGRAPHIC_SUBFAMILY: u16 = 17;
}

#[derive(Clone, Copy)]
struct NameRecord {
    platform_id: PlatformId,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    length: u16,
    offset: u16,
}

impl FromData for NameRecord {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(NameRecord {
            platform_id: s.read::<PlatformId>()?,
            encoding_id: s.read::<u16>()?,
            language_id: s.read::<u16>()?,
            name_id: s.read::<u16>()?,
            length: s.read::<u16>()?,
            offset: s.read::<u16>()?,
        })
    }
}

/// A name record.
#[derive(Clone, Copy)]
pub struct Name<'a> {
    /// A platform ID.
    pub platform_id: PlatformId,
    /// A platform-specific encoding ID.
    pub encoding_id: u16,
    /// A language ID.
    pub language_id: u16,
    /// A [name ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-ids).
    pub name_id: u16,
    /// The raw name data.
    pub name: &'a [u8],
}

impl<'a> Name<'a> {
    /// Checks that the name is in a Unicode encoding.
    pub fn is_unicode(&self) -> bool {
        self.platform_id == PlatformId::Unicode
            || (self.platform_id == PlatformId::Windows && self.encoding_id == 1)
            || (self.platform_id == PlatformId::Windows && self.encoding_id == 10)
    }

    /// Decodes the name from UTF-16 BE.
    ///
    /// Returns `None` for non-Unicode encodings.
    pub fn to_string(&self) -> Option<String> {
        if !self.is_unicode() {
            return None;
        }

        let mut units = Vec::with_capacity(self.name.len() / 2);
        let mut s = Stream::new(self.name);
        while let Some(unit) = s.read::<u16>() {
            units.push(unit);
        }

        let mut name = String::with_capacity(units.len());
        for cp in crate::unicode::Utf16CodePoints::new(&units) {
            name.push(cp.to_char());
        }
        Some(name)
    }
}

impl core::fmt::Debug for Name<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Name")
            .field("name_id", &self.name_id)
            .field("platform_id", &self.platform_id)
            .finish()
    }
}

/// A list of face names.
#[derive(Clone, Copy, Default)]
pub struct Names<'a> {
    records: LazyArray16<'a, NameRecord>,
    storage: &'a [u8],
}

impl<'a> Names<'a> {
    /// Returns a name at index.
    pub fn get(&self, index: u16) -> Option<Name<'a>> {
        let record = self.records.get(index)?;
        let name_start = usize::from(record.offset);
        let name_end = name_start + usize::from(record.length);
        let name = self.storage.get(name_start..name_end)?;
        Some(Name {
            platform_id: record.platform_id,
            encoding_id: record.encoding_id,
            language_id: record.language_id,
            name_id: record.name_id,
            name,
        })
    }

    /// Returns the number of name records.
    #[inline]
    pub fn len(&self) -> u16 {
        self.records.len()
    }

    /// Checks if there are any name records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl core::fmt::Debug for Names<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Names {{ ... }}")
    }
}

/// A [Naming Table](https://docs.microsoft.com/en-us/typography/opentype/spec/name).
#[derive(Clone, Copy, Default, Debug)]
pub struct Table<'a> {
    /// A list of names.
    pub names: Names<'a>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read()?;
        if version != 0 && version != 1 {
            return None;
        }

        let count: u16 = s.read()?;
        let storage_offset: u16 = s.read()?;
        let records = s.read_array16::<NameRecord>(count)?;
        let storage = data.get(usize::from(storage_offset)..)?;

        Some(Table {
            names: Names { records, storage },
        })
    }

    /// Returns the first Unicode name with `name_id`, decoded.
    pub fn name(&self, name_id: u16) -> Option<String> {
        for index in 0..self.names.len() {
            let name = self.names.get(index)?;
            if name.name_id == name_id && name.is_unicode() {
                return name.to_string();
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_name() {
        let data = &[
            0x00, 0x00, // version: 0
            0x00, 0x01, // count: 1
            0x00, 0x12, // storage offset: 18
            // Record [0]
            0x00, 0x03, // platform ID: Windows
            0x00, 0x01, // encoding ID: Unicode BMP
            0x04, 0x09, // language ID: en-US
            0x00, 0x01, // name ID: family
            0x00, 0x08, // length: 8
            0x00, 0x00, // offset: 0
            // Storage: "Demo" in UTF-16 BE.
            0x00, 0x44, 0x00, 0x65, 0x00, 0x6D, 0x00, 0x6F,
        ];

        let table = Table::parse(data).unwrap();
        assert_eq!(table.name(name_id::FAMILY).unwrap(), "Demo");
        assert_eq!(table.name(name_id::POST_SCRIPT_NAME), None);
    }
}
