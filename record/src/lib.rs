//! Stake record codec.
//!
//! A certificate's entire economic state lives in one 256-bit word, most
//! significant field first:
//!
//! ```text
//!   255        240 239          176 175                 48 47     32 31     16 15      0
//!  +-------------+---------------+----------------------+---------+---------+---------+
//!  | term (u16)  | maturity (u64)|     amount (u128)    |apy (u16)|score u16| bits u16|
//!  +-------------+---------------+----------------------+---------+---------+---------+
//! ```
//!
//! Encoding never fails: each input is clamped to its field's maximum before
//! packing. Decoding is total; the all-zero word decodes to all-zero fields and
//! marks "no active stake".

pub mod stake_info;
pub mod word;

pub use stake_info::{decode_stake_info, encode_stake_info, StakeInfo};
pub use word::{StakeWord, WordParseError};
