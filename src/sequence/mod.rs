pub mod sequence_builder;
pub mod sequence_event;
pub mod timing;

/// First beat of a bar, 1-based numbering
pub const FIRST_BEAT: i64 = 1;

/// Beat length denominator of the plain `beats / step` formula
pub const QUARTER_DIVISION: u32 = 4;
