pub mod eibc;
pub mod rollapp;
pub mod sequencer;

pub use eibc::EibcParams;
pub use rollapp::RollappParams;
pub use sequencer::SequencerParams;
