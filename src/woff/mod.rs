//! WOFF 1.0 container support: header, table directory and per-table zlib
//! decompression.
//!
//! https://www.w3.org/TR/WOFF/

use std::io::Read;

use crate::parser::{Stream, Tag};
use crate::{Error, Magic};

pub mod woff2;

/// The WOFF1 header size.
const HEADER_SIZE: usize = 44;

/// A WOFF1 table directory entry.
#[derive(Clone, Copy, Debug)]
pub struct TableEntry {
    /// The table tag.
    pub tag: Tag,
    /// Offset of the (possibly compressed) payload from the file start.
    pub offset: u32,
    /// The stored payload length.
    pub compressed_length: u32,
    /// The uncompressed table length.
    pub original_length: u32,
    /// The original table checksum.
    pub checksum: u32,
}

impl TableEntry {
    /// The payload is stored verbatim when both lengths match.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.compressed_length != self.original_length
    }
}

/// A parsed WOFF1 container.
#[derive(Clone, Debug)]
pub struct Woff1 {
    /// The sfnt flavor of the wrapped font.
    pub flavor: u32,
    /// The table directory in file order.
    pub tables: Vec<TableEntry>,
}

impl Woff1 {
    /// Parses the WOFF1 header and table directory.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        let mut s = Stream::new(data);
        let signature: u32 = s.read().ok_or(Error::MalformedFont)?;
        if signature != Magic::Woff1 as u32 {
            return Err(Error::InvalidFontFile("not a WOFF file"));
        }

        let flavor: u32 = s.read().ok_or(Error::MalformedFont)?;
        s.skip::<u32>(); // length
        let num_tables: u16 = s.read().ok_or(Error::MalformedFont)?;
        // reserved + totalSfntSize + version + meta/priv blocks
        if data.len() < HEADER_SIZE {
            return Err(Error::MalformedFont);
        }

        let mut s = Stream::new_at(data, HEADER_SIZE).ok_or(Error::MalformedFont)?;
        let mut tables = Vec::with_capacity(usize::from(num_tables));
        for _ in 0..num_tables {
            let entry = TableEntry {
                tag: s.read::<Tag>().ok_or(Error::MalformedFont)?,
                offset: s.read::<u32>().ok_or(Error::MalformedFont)?,
                compressed_length: s.read::<u32>().ok_or(Error::MalformedFont)?,
                original_length: s.read::<u32>().ok_or(Error::MalformedFont)?,
                checksum: s.read::<u32>().ok_or(Error::MalformedFont)?,
            };

            if entry.compressed_length > entry.original_length {
                return Err(Error::InvalidFontTable {
                    tag: entry.tag,
                    reason: "compressed length exceeds the original length",
                });
            }

            tables.push(entry);
        }

        Ok(Woff1 { flavor, tables })
    }

    /// Decompresses (or slices) one table payload.
    ///
    /// Producing fewer bytes than the declared original length is fatal.
    pub fn decompress_table(&self, data: &[u8], entry: &TableEntry) -> Result<Vec<u8>, Error> {
        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.compressed_length as usize)
            .ok_or(Error::MalformedFont)?;
        let payload = data.get(start..end).ok_or(Error::InvalidFontTable {
            tag: entry.tag,
            reason: "table payload is out of bounds",
        })?;

        if !entry.is_compressed() {
            return Ok(payload.to_vec());
        }

        let mut decoded = Vec::with_capacity(entry.original_length as usize);
        let mut decoder = flate2::read::ZlibDecoder::new(payload);
        decoder
            .read_to_end(&mut decoded)
            .map_err(|_| Error::InvalidFontTable {
                tag: entry.tag,
                reason: "zlib decompression failed",
            })?;

        if decoded.len() != entry.original_length as usize {
            return Err(Error::InvalidFontTable {
                tag: entry.tag,
                reason: "decompressed length does not match the declared length",
            });
        }

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn woff1_with_one_table(payload: &[u8], original_length: u32) -> Vec<u8> {
        let compressed = zlib(payload);
        let mut data = Vec::new();
        data.extend(&0x774F4646u32.to_be_bytes()); // signature
        data.extend(&0x00010000u32.to_be_bytes()); // flavor
        data.extend(&0u32.to_be_bytes()); // length (unchecked)
        data.extend(&1u16.to_be_bytes()); // numTables
        data.extend(&0u16.to_be_bytes()); // reserved
        data.extend(&0u32.to_be_bytes()); // totalSfntSize
        data.extend(&[0; 4]); // version
        data.extend(&[0; 12]); // meta
        data.extend(&[0; 8]); // priv
        assert_eq!(data.len(), 44);

        let offset = 44 + 20;
        data.extend(b"cmap");
        data.extend(&(offset as u32).to_be_bytes());
        data.extend(&(compressed.len() as u32).to_be_bytes());
        data.extend(&original_length.to_be_bytes());
        data.extend(&0u32.to_be_bytes()); // checksum
        data.extend(&compressed);
        data
    }

    #[test]
    fn round_trips_compressed_table() {
        let payload = b"some table bytes for the test";
        let data = woff1_with_one_table(payload, payload.len() as u32);

        let woff = Woff1::parse(&data).unwrap();
        assert_eq!(woff.flavor, 0x00010000);
        assert_eq!(woff.tables.len(), 1);
        assert_eq!(woff.tables[0].tag, Tag::from_bytes(b"cmap"));
        assert!(woff.tables[0].is_compressed());

        let decoded = woff.decompress_table(&data, &woff.tables[0]).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let payload = b"some table bytes for the test";
        let data = woff1_with_one_table(payload, payload.len() as u32 + 1);

        let woff = Woff1::parse(&data).unwrap();
        assert!(woff.decompress_table(&data, &woff.tables[0]).is_err());
    }

    #[test]
    fn rejects_wrong_magic() {
        let data = [0u8; 44];
        assert!(Woff1::parse(&data).is_err());
    }
}
