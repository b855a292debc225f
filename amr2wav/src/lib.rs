use amr::{demux, DemuxError, FrameDecoder};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Demux(#[from] DemuxError),
    #[error(transparent)]
    Encode(#[from] wav::EncodeError),
}

/// What to do with the samples decoded ahead of a corrupt frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Partial {
    #[default]
    Discard,
    Keep,
}

#[derive(Debug)]
pub struct Converted {
    pub wav: Vec<u8>,
    pub samples: usize,
    pub duration: std::time::Duration,
    /// Set when the stream ended early and `wav` holds only its prefix.
    pub damage: Option<DemuxError>,
}

/// Turns a whole stored AMR-NB file into a mono 8kHz 16-bit WAV file.
pub fn convert<D>(decoder: &mut D, amr: &[u8], partial: Partial)
    -> Result<Converted, ConvertError>
where
    D: FrameDecoder,
{
    let (pcm, damage) = match demux(decoder, amr) {
        Ok(pcm) => (pcm, None),
        Err(mut err) => match (partial, err.take_partial()) {
            (Partial::Keep, Some(pcm)) => (pcm, Some(err)),
            _ => return Err(err.into()),
        },
    };

    let wav = wav::encode_narrowband(pcm.as_bytes())?;
    Ok(Converted {
        wav,
        samples: pcm.sample_count(),
        duration: pcm.duration(),
        damage,
    })
}
