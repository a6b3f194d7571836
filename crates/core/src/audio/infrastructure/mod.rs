pub mod ffmpeg_audio_extractor;
