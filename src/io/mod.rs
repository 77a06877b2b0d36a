//! File format support

pub mod dxf;
