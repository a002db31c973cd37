pub mod png_io;
pub mod screen;

pub use png_io::{decode_png, encode_png, RgbaImage};
pub use screen::{encode_sc2, encode_sc5, BsaveHeader};
