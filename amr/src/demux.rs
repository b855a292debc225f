use crate::{
    decoder::{FrameDecoder, FrameError, InitError, Session},
    frame::{PCM_FRAME_SAMPLES, TYPE_BYTE_OVERHEAD},
    pcm::Pcm,
};

pub const MAGIC: &[u8; 6] = b"#!AMR\n";

#[derive(Debug, thiserror::Error)]
pub enum DemuxError {
    #[error("missing '#!AMR' file header")]
    InvalidHeader,
    #[error(transparent)]
    DecoderInitFailed(#[from] InitError),
    #[error("invalid data in frame {index} at byte {offset}")]
    InvalidFrameData {
        index: usize,
        offset: usize,
        #[source]
        cause: FrameError,
        /// Everything decoded before the bad frame.
        partial: Pcm,
    },
}

impl DemuxError {
    /// Takes the samples decoded ahead of a bad frame, if any.
    pub fn take_partial(&mut self) -> Option<Pcm> {
        match self {
            DemuxError::InvalidFrameData{partial, ..} => Some(std::mem::take(partial)),
            _ => None,
        }
    }
}

/// Decodes a whole stored AMR-NB stream into PCM.
///
/// The stream must start with [`MAGIC`]. Frames are handed to `decoder` one
/// at a time until the input is used up. A frame the decoder rejects ends the
/// stream with [`DemuxError::InvalidFrameData`], which keeps the samples of
/// every frame before it.
pub fn demux<D>(decoder: &mut D, container: &[u8]) -> Result<Pcm, DemuxError>
where
    D: FrameDecoder,
{
    let Some(frames) = container.strip_prefix(&MAGIC[..]) else {
        return Err(DemuxError::InvalidHeader)
    };

    let mut session = Session::open(decoder)?;
    let mut pcm = Pcm::new();
    let mut block = [0i16; PCM_FRAME_SAMPLES];
    let mut rest = frames;
    let mut index = 0;

    while !rest.is_empty() {
        let offset = container.len() - rest.len();
        let fail = |cause, partial| DemuxError::InvalidFrameData{index, offset, cause, partial};

        let consumed = match session.decode_frame(rest, &mut block) {
            Ok(consumed) => consumed,
            Err(cause) => return Err(fail(cause, pcm)),
        };

        // step is never zero, so the loop ends within rest.len() passes
        let step = consumed.saturating_add(TYPE_BYTE_OVERHEAD);
        if step > rest.len() {
            let cause = FrameError::Truncated{need: step, have: rest.len()};
            return Err(fail(cause, pcm));
        }

        pcm.append_block(&block);
        rest = &rest[step..];
        index += 1;
    }

    Ok(pcm)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{frame::{FrameType, TypeByte, PCM_FRAME_BYTES, PcmBlock}, MuteDecoder},
        std::{cell::Cell, rc::Rc},
    };

    /// Reports a fixed consumption per call and counts session lifetimes.
    struct Scripted {
        script: Vec<Result<usize, ()>>,
        live: Rc<Cell<i32>>,
        calls: usize,
        fail_init: bool,
    }

    impl Scripted {
        fn new(script: Vec<Result<usize, ()>>) -> Self {
            Scripted{script, live: Rc::new(Cell::new(0)), calls: 0, fail_init: false}
        }
    }

    impl FrameDecoder for Scripted {
        type State = ();

        fn init(&mut self) -> Result<(), InitError> {
            if self.fail_init {return Err(InitError::new("scripted"))}
            self.live.set(self.live.get() + 1);
            Ok(())
        }

        fn decode_frame(&mut self, _: &mut (), frame: &[u8], pcm: &mut PcmBlock)
            -> Result<usize, FrameError>
        {
            pcm.fill(frame[0] as i16);
            let step = self.script.get(self.calls).copied().unwrap_or(Err(()));
            self.calls += 1;
            step.map_err(|()| FrameError::ReservedType(frame[0]))
        }

        fn release(&mut self, (): ()) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn stream(frames: &[&[u8]]) -> Vec<u8> {
        let mut bs = MAGIC.to_vec();
        for frame in frames {bs.extend_from_slice(frame)}
        bs
    }

    #[test]
    fn rejects_missing_magic() {
        let inputs: [&[u8]; 5] = [b"", b"#!AM", b"#!AMR", b"#!AMR-WB\n", b"RIFF....WAVE"];
        for input in inputs {
            let mut dec = Scripted::new(vec![]);
            let err = demux(&mut dec, input).unwrap_err();
            assert!(matches!(err, DemuxError::InvalidHeader), "{input:?}");
            assert_eq!(dec.calls, 0);
            assert_eq!(dec.live.get(), 0);
        }
    }

    #[test]
    fn magic_alone_is_empty_stream() {
        let mut dec = Scripted::new(vec![]);
        let pcm = demux(&mut dec, MAGIC).unwrap();
        assert!(pcm.is_empty());
        assert_eq!(dec.calls, 0);
        assert_eq!(dec.live.get(), 0);
    }

    #[test]
    fn advances_past_type_byte() {
        // payload 2 + type byte = 3 bytes per frame
        let input = stream(&[&[7, 0, 0], &[9, 0, 0]]);
        let mut dec = Scripted::new(vec![Ok(2), Ok(2)]);
        let pcm = demux(&mut dec, &input).unwrap();
        assert_eq!(dec.calls, 2);
        assert_eq!(pcm.len(), 2 * PCM_FRAME_BYTES);

        let samples = pcm.samples().collect::<Vec<_>>();
        assert!(samples[..160].iter().all(|&s| s == 7));
        assert!(samples[160..].iter().all(|&s| s == 9));
    }

    #[test]
    fn zero_payload_still_advances() {
        let input = stream(&[&[1; 40]]);
        let mut dec = Scripted::new(vec![Ok(0); 40]);
        let pcm = demux(&mut dec, &input).unwrap();
        assert_eq!(dec.calls, 40);
        assert_eq!(pcm.len(), 40 * PCM_FRAME_BYTES);
    }

    #[test]
    fn iterations_bounded_by_input() {
        let input = stream(&[&[0; 25]]);
        let mut dec = Scripted::new(vec![Ok(4); 100]);
        let pcm = demux(&mut dec, &input).unwrap();
        assert_eq!(dec.calls, 5);
        assert!(dec.calls <= input.len() - MAGIC.len());
        assert_eq!(pcm.len(), 5 * PCM_FRAME_BYTES);
    }

    #[test]
    fn keeps_prefix_before_bad_frame() {
        let input = stream(&[&[1, 0], &[2, 0], &[3, 0], &[4, 0]]);
        let mut dec = Scripted::new(vec![Ok(1), Ok(1), Ok(1), Err(())]);
        let mut err = demux(&mut dec, &input).unwrap_err();
        assert_eq!(dec.live.get(), 0);

        let DemuxError::InvalidFrameData{index, offset, ref cause, ..} = err else {
            panic!("wrong error: {err:?}")
        };
        assert_eq!(index, 3);
        assert_eq!(offset, MAGIC.len() + 6);
        assert!(matches!(cause, FrameError::ReservedType(4)));

        let partial = err.take_partial().unwrap();
        assert_eq!(partial.len(), 3 * PCM_FRAME_BYTES);
        assert!(partial.samples().all(|s| (1..=3).contains(&s)));
        assert!(err.take_partial().unwrap().is_empty());
    }

    #[test]
    fn overlong_consumption_is_truncation() {
        let input = stream(&[&[5, 0, 0], &[6, 0]]);
        let mut dec = Scripted::new(vec![Ok(2), Ok(10)]);
        let mut err = demux(&mut dec, &input).unwrap_err();
        assert!(matches!(err,
            DemuxError::InvalidFrameData{
                index: 1,
                cause: FrameError::Truncated{need: 11, have: 2},
                ..
            }));
        assert_eq!(err.take_partial().unwrap().len(), PCM_FRAME_BYTES);
        assert_eq!(dec.live.get(), 0);
    }

    #[test]
    fn init_failure_decodes_nothing() {
        let mut dec = Scripted::new(vec![Ok(0)]);
        dec.fail_init = true;
        let input = stream(&[&[0]]);
        let err = demux(&mut dec, &input).unwrap_err();
        assert!(matches!(err, DemuxError::DecoderInitFailed(_)));
        assert_eq!(dec.calls, 0);
        assert_eq!(dec.live.get(), 0);
    }

    #[test]
    fn decoder_reusable_after_stream() {
        let mut dec = Scripted::new(vec![Ok(0), Err(()), Ok(0)]);
        let input = stream(&[&[0]]);
        demux(&mut dec, &input).unwrap();
        demux(&mut dec, &input).unwrap_err();
        demux(&mut dec, &input).unwrap();
        assert_eq!(dec.live.get(), 0);
    }

    #[test]
    fn silence_frame_decodes_to_one_block() {
        let sid = TypeByte::new(FrameType::Sid, true).0;
        let input = stream(&[&[sid, 0, 0, 0, 0, 0]]);
        let pcm = demux(&mut MuteDecoder::new(), &input).unwrap();
        assert_eq!(pcm.len(), PCM_FRAME_BYTES);
        assert!(pcm.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn every_storage_frame_type_walks() {
        let frames = FrameType::ALL.iter()
            .filter_map(|&ft| {
                let len = ft.frame_len()?;
                let mut frame = vec![0; len];
                frame[0] = TypeByte::new(ft, true).0;
                Some(frame)
            })
            .collect::<Vec<_>>();
        let input = stream(&frames.iter().map(Vec::as_slice).collect::<Vec<_>>());

        let pcm = demux(&mut MuteDecoder::new(), &input).unwrap();
        assert_eq!(pcm.len(), frames.len() * PCM_FRAME_BYTES);
    }

    #[test]
    fn corrupt_tail_after_valid_frames() {
        let speech = TypeByte::new(FrameType::Mr122, true).0;
        let mut input = stream(&[]);
        for _ in 0..4 {
            input.push(speech);
            input.extend_from_slice(&[0x55; 31]);
        }
        input.push(TypeByte::new(FrameType::Future13, true).0);
        input.extend_from_slice(&[0; 10]);

        let mut err = demux(&mut MuteDecoder::new(), &input).unwrap_err();
        assert!(matches!(err,
            DemuxError::InvalidFrameData{index: 4, cause: FrameError::ReservedType(13), ..}));
        assert_eq!(err.take_partial().unwrap().len(), 4 * PCM_FRAME_BYTES);
    }
}
