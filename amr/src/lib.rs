//! Stored-format (RFC 4867 §5) AMR narrowband streams.
//!
//! Speech synthesis is not done here. A [`FrameDecoder`] is plugged in to
//! turn each frame into samples; [`demux`] does the framing around it.

mod decoder;
mod demux;
mod frame;
mod mute;
mod pcm;

pub use {
    decoder::{FrameDecoder, FrameError, InitError, Session},
    demux::{demux, DemuxError, MAGIC},
    frame::{FrameType, TypeByte, PcmBlock, PCM_FRAME_BYTES, PCM_FRAME_SAMPLES, TYPE_BYTE_OVERHEAD},
    mute::{MuteDecoder, MuteState},
    pcm::{Pcm, SAMPLE_RATE},
};
