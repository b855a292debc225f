/// Bytes a frame occupies beyond what the decoder reports as consumed: the
/// leading type byte is read before the codec payload.
pub const TYPE_BYTE_OVERHEAD: usize = 1;

/// Samples per decoded frame; 20ms at 8kHz.
pub const PCM_FRAME_SAMPLES: usize = 160;
pub const PCM_FRAME_BYTES: usize = PCM_FRAME_SAMPLES * 2;

pub type PcmBlock = [i16; PCM_FRAME_SAMPLES];

/// AMR-NB frame type, as carried in bits 3..6 of a storage-format type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameType {
    Mr475  = 0,
    Mr515  = 1,
    Mr59   = 2,
    Mr67   = 3,
    Mr74   = 4,
    Mr795  = 5,
    Mr102  = 6,
    Mr122  = 7,
    Sid    = 8,
    GsmEfrSid = 9,
    TdmaSid   = 10,
    PdcSid    = 11,
    Future12  = 12,
    Future13  = 13,
    Future14  = 14,
    NoData = 15,
}

// payload bytes following the type byte, indexed by frame type
const PAYLOAD_LEN: [Option<usize>; 16] = [
    Some(12), Some(13), Some(15), Some(17),
    Some(19), Some(20), Some(26), Some(31),
    Some(5),
    None, None, None, None, None, None,
    Some(0),
];

impl FrameType {
    pub const ALL: [FrameType; 16] = {
        use FrameType::*;
        [
            Mr475, Mr515, Mr59, Mr67, Mr74, Mr795, Mr102, Mr122,
            Sid, GsmEfrSid, TdmaSid, PdcSid, Future12, Future13, Future14,
            NoData,
        ]
    };

    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0x0f) as usize]
    }

    pub fn from_type_byte(byte: u8) -> Self {
        Self::from_code(byte >> 3)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Payload length in the storage format, not counting the type byte.
    /// `None` for types that have no meaning in a stored stream.
    pub fn payload_len(self) -> Option<usize> {
        PAYLOAD_LEN[self as usize]
    }

    pub fn frame_len(self) -> Option<usize> {
        self.payload_len().map(|len| len + TYPE_BYTE_OVERHEAD)
    }

    pub fn is_speech(self) -> bool {
        self.code() <= FrameType::Mr122.code()
    }
}

/// Leading byte of a stored frame: `P FFFF Q PP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeByte(pub u8);

impl TypeByte {
    pub fn frame_type(self) -> FrameType {
        FrameType::from_type_byte(self.0)
    }

    pub fn quality(self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn new(frame_type: FrameType, quality: bool) -> Self {
        TypeByte(frame_type.code() << 3 | if quality {0x04} else {0})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_byte_fields() {
        // 0x3c: mode 7 (12.2k), good quality
        let tb = TypeByte(0x3c);
        assert_eq!(tb.frame_type(), FrameType::Mr122);
        assert!(tb.quality());

        // padding bit is ignored
        assert_eq!(TypeByte(0x80 | 0x44).frame_type(), FrameType::Sid);
        assert!(!TypeByte(0x40).quality());

        assert_eq!(TypeByte::new(FrameType::NoData, true).0, 0x7c);
        for ft in FrameType::ALL {
            assert_eq!(TypeByte::new(ft, false).frame_type(), ft);
        }
    }

    #[test]
    fn storage_frame_lengths() {
        // whole-frame sizes of the storage format, type byte included
        let expected = [13, 14, 16, 18, 20, 21, 27, 32, 6];
        for (code, &len) in expected.iter().enumerate() {
            let ft = FrameType::from_code(code as u8);
            assert_eq!(ft.frame_len(), Some(len), "{ft:?}");
            assert_eq!(ft.payload_len().unwrap() + TYPE_BYTE_OVERHEAD, len);
        }
        for code in 9..15 {
            assert_eq!(FrameType::from_code(code).frame_len(), None);
        }
        assert_eq!(FrameType::NoData.frame_len(), Some(1));
    }

    #[test]
    fn speech_modes() {
        assert!(FrameType::Mr475.is_speech());
        assert!(FrameType::Mr122.is_speech());
        assert!(!FrameType::Sid.is_speech());
        assert!(!FrameType::NoData.is_speech());
    }
}
