pub mod data;
pub mod sampler;

mod cursor;
mod pass;

pub use cursor::ByteCursor;
pub use pass::{DecodePass, HeadersDecoded};
