//! Binary container for contribution map sets ("PCMP").
//!
//! Layout, all values little-endian:
//! - Bytes 0-3: magic `b"PCMP"`
//! - Bytes 4-7: version (u32, must be 1)
//! - Bytes 8-11: number of maps N (u32)
//! - N times: map size (u32), camera angle (f32), map size² values (f32, row-major)

use std::io::Write;

use crate::{ContribError, ContributionMap, ContributionMapSet, MapDescriptor, Result};

pub const PCMP_MAGIC: [u8; 4] = *b"PCMP";
pub const PCMP_VERSION: u32 = 1;
pub const PCMP_HEADER_LEN: usize = 12;

/// Bytes of the per-map header (size + angle).
const MAP_HEADER_LEN: usize = 8;
const BYTES_PER_VALUE: usize = 4;

/// Forward-only cursor over the input buffer.
struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.bytes.len() - self.offset;
        if len > available {
            return Err(ContribError::TruncatedData {
                offset: self.offset,
                needed: len,
                available,
            });
        }

        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parses a PCMP buffer. Maps are kept in file order.
pub fn parse(bytes: &[u8]) -> Result<ContributionMapSet> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.take(PCMP_MAGIC.len())?;
    if magic != PCMP_MAGIC {
        return Err(ContribError::Format(format!(
            "bad magic {:02x?}, expected {:02x?}",
            magic, PCMP_MAGIC
        )));
    }

    let version = reader.read_u32()?;
    if version != PCMP_VERSION {
        return Err(ContribError::UnsupportedVersion(version));
    }

    let num_maps = reader.read_u32()? as usize;
    log::debug!("Parsing {} contribution maps ({} bytes)", num_maps, bytes.len());

    // Capacity is bounded by what the buffer could possibly hold
    let mut maps = Vec::with_capacity(num_maps.min(bytes.len() / MAP_HEADER_LEN));
    for i in 0..num_maps {
        let map_offset = reader.offset;
        let map_size = reader.read_u32()? as usize;
        let camera_angle = reader.read_f32()?;

        if map_size == 0 {
            return Err(ContribError::Format(format!(
                "map {} at offset {} has size 0",
                i, map_offset
            )));
        }

        let descriptor = MapDescriptor::new(map_size, camera_angle);
        let num_bytes = map_size
            .checked_mul(map_size)
            .and_then(|n| n.checked_mul(BYTES_PER_VALUE))
            .ok_or(ContribError::TruncatedData {
                offset: reader.offset,
                needed: usize::MAX,
                available: bytes.len() - reader.offset,
            })?;

        let values = reader
            .take(num_bytes)?
            .chunks_exact(BYTES_PER_VALUE)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        log::debug!(
            "Map {}: {}x{} at {:.2} deg",
            i,
            map_size,
            map_size,
            camera_angle.to_degrees()
        );
        maps.push(ContributionMap::new(descriptor, values)?);
    }

    Ok(ContributionMapSet::new(maps))
}

impl ContributionMapSet {
    /// Parses a PCMP buffer. See [`parse`].
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        parse(bytes)
    }

    /// Writes the set in PCMP layout.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&PCMP_MAGIC)?;
        writer.write_all(&PCMP_VERSION.to_le_bytes())?;
        writer.write_all(&(self.size() as u32).to_le_bytes())?;

        for map in self.iter() {
            writer.write_all(&(map.map_size() as u32).to_le_bytes())?;
            writer.write_all(&map.camera_angle().to_le_bytes())?;
            for value in map.values() {
                writer.write_all(&value.to_le_bytes())?;
            }
        }

        Ok(())
    }

    /// Serializes the set into a new PCMP buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload: usize = self
            .iter()
            .map(|m| MAP_HEADER_LEN + m.values().len() * BYTES_PER_VALUE)
            .sum();

        let mut bytes = Vec::with_capacity(PCMP_HEADER_LEN + payload);
        bytes.extend_from_slice(&PCMP_MAGIC);
        bytes.extend_from_slice(&PCMP_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(self.size() as u32).to_le_bytes());
        for map in self.iter() {
            bytes.extend_from_slice(&(map.map_size() as u32).to_le_bytes());
            bytes.extend_from_slice(&map.camera_angle().to_le_bytes());
            bytes.extend(map.values().iter().flat_map(|v| v.to_le_bytes()));
        }
        bytes
    }
}
