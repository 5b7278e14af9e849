//! Little-endian primitive reads over a seekable byte source.
//!
//! Every multi-byte integer in a VK4 file is little-endian, so this wrapper
//! exposes only the widths the format actually uses. A read that runs off the
//! end of the source fails with [`Vk4Error::Truncated`]; a seek the source
//! cannot perform fails with [`Vk4Error::Seek`].

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::vk4::error::{Result, Vk4Error};

pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read + Seek> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Current byte position in the source.
    pub fn position(&mut self) -> Result<u64> {
        self.inner.stream_position().map_err(Vk4Error::Seek)
    }

    /// Moves the cursor to an absolute byte offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(Vk4Error::Seek)?;
        Ok(())
    }

    /// Skips `count` bytes forward from the current position, used for the
    /// reserved runs inside fixed-layout sections.
    pub fn skip(&mut self, count: i64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Current(count))
            .map_err(Vk4Error::Seek)?;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.inner.read_u8().map_err(map_read_err)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.inner.read_u16::<LittleEndian>().map_err(map_read_err)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.inner.read_u32::<LittleEndian>().map_err(map_read_err)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.inner.read_i32::<LittleEndian>().map_err(map_read_err)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        self.inner.read_exact(&mut buf).map_err(map_read_err)?;
        Ok(buf)
    }

    pub fn read_u16_vec(&mut self, count: usize) -> Result<Vec<u16>> {
        let mut buf = vec![0u16; count];
        self.inner
            .read_u16_into::<LittleEndian>(&mut buf)
            .map_err(map_read_err)?;
        Ok(buf)
    }

    pub fn read_i32_vec(&mut self, count: usize) -> Result<Vec<i32>> {
        let mut buf = vec![0i32; count];
        self.inner
            .read_i32_into::<LittleEndian>(&mut buf)
            .map_err(map_read_err)?;
        Ok(buf)
    }
}

fn map_read_err(err: std::io::Error) -> Vk4Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Vk4Error::Truncated
    } else {
        Vk4Error::Io(err)
    }
}
