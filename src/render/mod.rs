/// RGB8 frame buffers and resampling.
pub mod frame;
/// Clip sequencing, transitions and finishing passes.
pub mod sequence;
