pub mod alphabet;
pub mod base35;
pub mod checksum;
pub mod block;
pub mod address;
pub mod codec;
pub mod batch;

pub use address::{canonical, normalize, parse_address, AddressError};
pub use block::{block_join, block_split};
pub use checksum::compute_checksum;
pub use codec::{
    decode, decode_addr, decode_value, encode, encode_addr, encode_value, encode_with,
    CodecError, EncodeOptions, PREFIX,
};
