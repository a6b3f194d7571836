pub mod audio_artifact;
pub mod audio_extractor;
