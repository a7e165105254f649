//! Structural hashing for [`Value`].
//!
//! Hashes are computed over contents, so a value that is mutated after being
//! hashed will hash differently. Callers that opt into hashing mutable
//! fields carry that responsibility.

use std::hash::{Hash, Hasher};

use super::Value;

/// Integral floats hash like the integer they equal.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "range is checked before the cast"
)]
fn integral(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::None => state.write_u8(0),
            Self::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Self::Int(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            Self::Float(f) => match integral(*f) {
                Some(i) => {
                    state.write_u8(2);
                    i.hash(state);
                }
                None => {
                    state.write_u8(3);
                    f.to_bits().hash(state);
                }
            },
            Self::Str(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Self::List(items) => {
                state.write_u8(5);
                items.hash(state);
            }
            Self::Tuple(items) => {
                state.write_u8(6);
                items.hash(state);
            }
            Self::Map(map) => {
                state.write_u8(7);
                for (key, value) in map {
                    key.hash(state);
                    value.hash(state);
                }
            }
            Self::Instance(instance) => {
                state.write_u8(8);
                instance.hash_structure(state);
            }
        }
    }
}
