pub mod google_speech_recognizer;
mod google_wire;
