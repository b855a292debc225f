use bytemuck::{Pod, Zeroable};

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct U32Le([u8; 4]);

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct U16Le([u8; 2]);

impl std::fmt::Debug for U32Le {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (le)", self.get())
    }
}

impl std::fmt::Debug for U16Le {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (le)", self.get())
    }
}

impl U32Le {
    pub fn get(self) -> u32 { u32::from_le_bytes(self.0) }
}

impl U16Le {
    pub fn get(self) -> u16 { u16::from_le_bytes(self.0) }
}

impl From<u32> for U32Le { fn from(x: u32) -> Self { U32Le(x.to_le_bytes()) } }
impl From<u16> for U16Le { fn from(x: u16) -> Self { U16Le(x.to_le_bytes()) } }
