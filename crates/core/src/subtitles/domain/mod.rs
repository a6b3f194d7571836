pub mod subtitle_entry;
pub mod subtitle_writer;
