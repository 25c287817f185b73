pub mod deepgram;
pub mod traits;

pub use deepgram::DeepgramTranscriber;
pub use traits::{SpeechToText, Transcript};
