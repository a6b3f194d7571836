mod credentials;
mod error;
mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use vidsub_core::audio::infrastructure::ffmpeg_audio_extractor::FfmpegAudioExtractor;
use vidsub_core::pipeline::generate_subtitles_use_case::{GenerateSubtitlesUseCase, RunSummary};
use vidsub_core::pipeline::pipeline_logger::LogPipelineLogger;
use vidsub_core::shared::run_paths::RunPaths;
use vidsub_core::speech::infrastructure::google_speech_recognizer::{
    Credentials, GoogleSpeechRecognizer,
};
use vidsub_core::subtitles::infrastructure::srt_file_writer::SrtFileWriter;

use crate::error::CliError;
use crate::settings::Settings;

/// Generate SubRip subtitles for a video using cloud speech recognition.
///
/// The audio track is extracted with ffmpeg into `~/tmp/audio.wav` and the
/// subtitles are written to `~/tmp/<video name>.srt`. Set GOOGLE_API_KEY or
/// GOOGLE_ACCESS_TOKEN to authenticate with the speech service; otherwise
/// Google application default credentials are used.
#[derive(Parser, Debug)]
#[command(name = "vidsub", version)]
struct Cli {
    /// Path to the video file.
    #[arg(long, value_name = "PATH")]
    video: String,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(summary) => {
            log::info!("{}", summary_line(&summary));
            println!(
                "Subtitles generated successfully and saved to {}",
                summary.subtitle_path.display()
            );
        }
        Err(e) => {
            if let CliError::Pipeline(err) = &e {
                log::debug!("Run stopped in the {} stage", err.stage());
            }
            log::debug!("{e:?}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<RunSummary, CliError> {
    let cli = Cli::parse();
    let video = validate(&cli)?;
    let settings = Settings::load();
    let credentials = credentials::from_env();
    run_with(&video, &settings, dirs::home_dir(), credentials)
}

fn run_with(
    video: &Path,
    settings: &Settings,
    home: Option<PathBuf>,
    credentials: Option<Credentials>,
) -> Result<RunSummary, CliError> {
    let (work_dir, output_dir) = settings.resolve_dirs(home)?;
    ensure_dir(&work_dir)?;
    ensure_dir(&output_dir)?;

    let paths = RunPaths::new(video, &work_dir, &output_dir);

    if credentials.is_none() {
        log::warn!(
            "No credentials: {} and {} are unset and no application default credentials were found",
            credentials::API_KEY_VAR,
            credentials::ACCESS_TOKEN_VAR
        );
    }

    let mut use_case = GenerateSubtitlesUseCase::new(
        Box::new(FfmpegAudioExtractor::with_program(&settings.ffmpeg_path)),
        Box::new(GoogleSpeechRecognizer::new(
            settings.speech_config(credentials),
        )),
        Box::new(SrtFileWriter::new()),
        Box::new(LogPipelineLogger::new()),
    );
    Ok(use_case.run(&paths)?)
}

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "{} subtitle entries from {} recognition results ({:.1}s of audio)",
        summary.entries,
        summary.results,
        summary.audio.duration.as_secs_f64()
    )
}

fn validate(cli: &Cli) -> Result<PathBuf, CliError> {
    if cli.video.trim().is_empty() {
        return Err(CliError::Usage(
            "Please provide a video file path using the --video flag".to_string(),
        ));
    }
    Ok(PathBuf::from(&cli.video))
}

fn ensure_dir(dir: &Path) -> Result<(), CliError> {
    if dir.is_dir() {
        return Ok(());
    }
    log::info!("Creating directory {}", dir.display());
    std::fs::create_dir_all(dir).map_err(|e| CliError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}
