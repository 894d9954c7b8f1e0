//! Audio capture and encoding

mod capture;
mod wav;

pub use capture::AudioCapture;
pub use wav::{mime_for_path, RecordedAudio};
