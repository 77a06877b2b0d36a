//! ASCII DXF codec

mod code_pair;
mod reader;
mod writer;

pub use code_pair::{CodePair, CodePairScanner};
pub use reader::{read_drawing, DxfDrawing};
pub use writer::write_drawing;
