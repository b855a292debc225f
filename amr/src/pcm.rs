use {
    crate::frame::{PcmBlock, PCM_FRAME_BYTES},
    std::time::Duration,
};

pub const SAMPLE_RATE: u32 = 8000;

/// Mono 16-bit little-endian samples at 8kHz.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Pcm {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for Pcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pcm({} samples)", self.sample_count())
    }
}

impl Pcm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_block(&mut self, block: &PcmBlock) {
        self.bytes.reserve(PCM_FRAME_BYTES);
        self.bytes.extend(block.iter().copied().flat_map(i16::to_le_bytes));
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.bytes.len() / 2
    }

    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.bytes.chunks_exact(2).map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
    }

    pub fn duration(&self) -> Duration {
        const MICROS_PER_SAMPLE: u64 = 1_000_000 / SAMPLE_RATE as u64;
        Duration::from_micros(self.sample_count() as u64 * MICROS_PER_SAMPLE)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
#[test]
fn blocks_are_little_endian() {
    let mut block = [0i16; 160];
    block[0] = 1;
    block[1] = -2;
    block[159] = 0x1234;

    let mut pcm = Pcm::new();
    pcm.append_block(&block);
    assert_eq!(pcm.len(), PCM_FRAME_BYTES);
    assert_eq!(&pcm.as_bytes()[0..4], &[0x01, 0x00, 0xfe, 0xff]);
    assert_eq!(&pcm.as_bytes()[318..320], &[0x34, 0x12]);
    assert_eq!(pcm.samples().collect::<Vec<_>>(), block.to_vec());
    assert_eq!(pcm.duration(), Duration::from_millis(20));
    assert_eq!(format!("{pcm:?}"), "Pcm(160 samples)");
}
