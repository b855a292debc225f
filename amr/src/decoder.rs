use crate::frame::PcmBlock;

#[derive(Debug, thiserror::Error)]
#[error("frame decoder failed to initialise: {reason}")]
pub struct InitError {
    pub reason: String,
}

impl InitError {
    pub fn new(reason: impl Into<String>) -> Self {
        InitError{reason: reason.into()}
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame type {0} is not valid in a stored stream")]
    ReservedType(u8),
    #[error("frame truncated: need {need} bytes, {have} left")]
    Truncated { need: usize, have: usize },
    #[error("codec error: {0}")]
    Codec(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Frame-at-a-time speech decoder.
///
/// `init` produces per-stream state, which is handed back to every
/// `decode_frame` call for that stream and finally to `release`. Use it via
/// [`Session`], which pairs every successful `init` with exactly one
/// `release`.
pub trait FrameDecoder {
    type State;

    fn init(&mut self) -> Result<Self::State, InitError>;

    /// Decode the frame at the start of `frame`, which begins with its type
    /// byte. All of `pcm` is overwritten on success. Returns the payload
    /// bytes consumed, not counting the type byte.
    fn decode_frame(
        &mut self,
        state: &mut Self::State,
        frame: &[u8],
        pcm: &mut PcmBlock,
    ) -> Result<usize, FrameError>;

    fn release(&mut self, state: Self::State);
}

/// A live decoder state, released when dropped.
///
/// Holds the decoder borrowed for its whole life, so a decoder serves one
/// stream at a time.
pub struct Session<'d, D> where D: FrameDecoder {
    decoder: &'d mut D,
    state: Option<D::State>,
}

impl<'d, D> Session<'d, D> where D: FrameDecoder {
    pub fn open(decoder: &'d mut D) -> Result<Self, InitError> {
        let state = decoder.init()?;
        Ok(Session{decoder, state: Some(state)})
    }

    pub fn decode_frame(&mut self, frame: &[u8], pcm: &mut PcmBlock)
        -> Result<usize, FrameError>
    {
        let state = self.state.as_mut()
            .expect("session state is only taken on drop");
        self.decoder.decode_frame(state, frame, pcm)
    }
}

impl<'d, D> Drop for Session<'d, D> where D: FrameDecoder {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.decoder.release(state);
        }
    }
}
