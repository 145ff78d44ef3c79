use sha2::{Digest, Sha256};

use crate::types::{Frame, SteerInput};

fn steer_byte(input: &SteerInput) -> u8 {
    (input.left as u8) | ((input.right as u8) << 1)
}

/// SHA-256 over every frame: `dt_ms` little-endian, then one steering byte
/// per player (bit 0 left, bit 1 right).
pub fn hash_frames(frames: &[Frame]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for frame in frames {
        hasher.update(frame.dt_ms.to_le_bytes());
        for input in &frame.inputs {
            hasher.update([steer_byte(input)]);
        }
    }
    hasher.finalize().into()
}

/// SHA-256 commitment of the seed.
pub fn hash_seed(seed: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.finalize().into()
}
