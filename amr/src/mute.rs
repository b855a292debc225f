use crate::{
    decoder::{FrameDecoder, FrameError, InitError},
    frame::{FrameType, PcmBlock, TypeByte, TYPE_BYTE_OVERHEAD},
};

/// Walks a stored stream by its frame-type table and writes silence for
/// every frame.
///
/// Useful wherever framing matters but the speech itself doesn't: checking
/// a file is well formed, measuring its duration, or producing a
/// correctly sized placeholder.
#[derive(Debug, Default)]
pub struct MuteDecoder {
    streams: usize,
    last: Option<MuteState>,
}

/// Per-stream tally of decoded frames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MuteState {
    pub speech: usize,
    pub comfort: usize,
    pub no_data: usize,
}

impl MuteDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Streams opened so far.
    pub fn streams(&self) -> usize {
        self.streams
    }

    /// Frame tally of the most recently released stream.
    pub fn last_stream(&self) -> Option<MuteState> {
        self.last
    }
}

impl FrameDecoder for MuteDecoder {
    type State = MuteState;

    fn init(&mut self) -> Result<MuteState, InitError> {
        self.streams += 1;
        Ok(MuteState::default())
    }

    fn decode_frame(&mut self, state: &mut MuteState, frame: &[u8], pcm: &mut PcmBlock)
        -> Result<usize, FrameError>
    {
        let &type_byte = frame.first()
            .ok_or(FrameError::Truncated{need: TYPE_BYTE_OVERHEAD, have: 0})?;
        let frame_type = TypeByte(type_byte).frame_type();
        let payload_len = frame_type.payload_len()
            .ok_or(FrameError::ReservedType(frame_type.code()))?;

        let need = payload_len + TYPE_BYTE_OVERHEAD;
        if frame.len() < need {
            return Err(FrameError::Truncated{need, have: frame.len()});
        }

        match frame_type {
            ft if ft.is_speech() => state.speech  += 1,
            FrameType::NoData    => state.no_data += 1,
            _                    => state.comfort += 1,
        }

        pcm.fill(0);
        Ok(payload_len)
    }

    fn release(&mut self, state: MuteState) {
        self.last = Some(state);
    }
}
