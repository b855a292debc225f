//! Canonical 44-byte-header PCM WAV files.

mod le;

use {
    bytemuck::{pod_read_unaligned as read, Pod, Zeroable},
    le::{U16Le, U32Le},
};

pub const HEADER_LEN: usize = 44;

/// `ChunkSize` counts everything after itself: "WAVE", the fmt chunk and the
/// data chunk header, i.e. the header minus the first 8 bytes, plus the data.
const RIFF_OVERHEAD: u32 = HEADER_LEN as u32 - 8;

const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{0} bytes of samples do not fit a WAV size field")]
    TooLong(usize),
    #[error("block align or byte rate of {0:?} overflows its header field")]
    FormatOverflow(Format),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("input shorter than a WAV header")]
    TooShort,
    #[error("file header has wrong magic (not 'RIFF'/'WAVE')")]
    WrongMagic,
    #[error("expected a 16-byte 'fmt ' chunk followed by 'data'")]
    UnexpectedChunks,
    #[error("audio format {0} is not integer PCM")]
    NotPcm(u16),
    #[error("byte rate or block align disagree with the sample format")]
    InconsistentFormat,
    #[error("RIFF size {riff} does not match data size {data}")]
    SizeMismatch { riff: u32, data: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl Format {
    /// Mono, 8kHz, 16-bit: what narrowband speech codecs produce.
    pub const NARROWBAND: Format = Format {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
    };

    /// `None` if it doesn't fit the 16-bit header field.
    pub fn block_align(&self) -> Option<u16> {
        self.channels.checked_mul(self.bits_per_sample / 8)
    }

    /// `None` if it doesn't fit the 32-bit header field.
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(self.block_align()? as u32)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    riff:            [u8; 4],
    riff_len:        U32Le,
    wave:            [u8; 4],
    fmt:             [u8; 4],
    fmt_len:         U32Le,
    audio_format:    U16Le,
    channels:        U16Le,
    sample_rate:     U32Le,
    byte_rate:       U32Le,
    block_align:     U16Le,
    bits_per_sample: U16Le,
    data:            [u8; 4],
    data_len:        U32Le,
}

const _: () = assert!(std::mem::size_of::<RawHeader>() == HEADER_LEN);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    format: Format,
    block_align: u16,
    byte_rate: u32,
    data_len: u32,
}

impl Header {
    /// Header for `data_len` bytes of samples; fails if any derived field
    /// would overflow its width.
    pub fn new(format: Format, data_len: usize) -> Result<Self, EncodeError> {
        let data_len = u32::try_from(data_len)
            .ok()
            .filter(|len| len.checked_add(RIFF_OVERHEAD).is_some())
            .ok_or(EncodeError::TooLong(data_len))?;
        let (block_align, byte_rate) = format.block_align()
            .zip(format.byte_rate())
            .ok_or(EncodeError::FormatOverflow(format))?;
        Ok(Header{format, block_align, byte_rate, data_len})
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    pub fn riff_len(&self) -> u32 {
        RIFF_OVERHEAD + self.data_len
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let raw = RawHeader {
            riff:            *b"RIFF",
            riff_len:        self.riff_len().into(),
            wave:            *b"WAVE",
            fmt:             *b"fmt ",
            fmt_len:         FMT_CHUNK_LEN.into(),
            audio_format:    FORMAT_PCM.into(),
            channels:        self.format.channels.into(),
            sample_rate:     self.format.sample_rate.into(),
            byte_rate:       self.byte_rate.into(),
            block_align:     self.block_align.into(),
            bits_per_sample: self.format.bits_per_sample.into(),
            data:            *b"data",
            data_len:        self.data_len.into(),
        };
        bytemuck::cast(raw)
    }

    /// Reads back a header in exactly the layout [`Header::to_bytes`] writes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        let raw: RawHeader = read(bytes.get(..HEADER_LEN).ok_or(HeaderError::TooShort)?);

        if &raw.riff != b"RIFF" || &raw.wave != b"WAVE" {return Err(HeaderError::WrongMagic)}
        if &raw.fmt != b"fmt " || raw.fmt_len.get() != FMT_CHUNK_LEN || &raw.data != b"data" {
            return Err(HeaderError::UnexpectedChunks)
        }
        let audio_format = raw.audio_format.get();
        if audio_format != FORMAT_PCM {return Err(HeaderError::NotPcm(audio_format))}

        let format = Format {
            channels: raw.channels.get(),
            sample_rate: raw.sample_rate.get(),
            bits_per_sample: raw.bits_per_sample.get(),
        };
        let block_align = raw.block_align.get();
        let byte_rate = raw.byte_rate.get();
        if format.block_align() != Some(block_align) || format.byte_rate() != Some(byte_rate) {
            return Err(HeaderError::InconsistentFormat)
        }

        let header = Header{format, block_align, byte_rate, data_len: raw.data_len.get()};
        let riff = raw.riff_len.get();
        if riff != header.riff_len() {
            return Err(HeaderError::SizeMismatch{riff, data: header.data_len})
        }
        Ok(header)
    }
}

/// Header followed by `pcm` verbatim.
pub fn encode(format: Format, pcm: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let header = Header::new(format, pcm.len())?;
    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(pcm);
    Ok(out)
}

pub fn encode_narrowband(pcm: &[u8]) -> Result<Vec<u8>, EncodeError> {
    encode(Format::NARROWBAND, pcm)
}
