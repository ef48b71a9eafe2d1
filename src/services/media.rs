//! Download, transcode and read back audio for `/download_mp3`.
//!
//! Each request works inside its own directory under the configured work
//! dir, named after a fresh [`RequestId`]. Concurrent requests never share a
//! file, and the directory is removed when the [`MediaJob`] is dropped,
//! whether the pipeline finished or failed.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::Command;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::MediaError;
use crate::utils::logging::log_media_step;

/// File name the transcoded audio is sent under.
pub const MP3_FILE_NAME: &str = "downloaded.mp3";
const SOURCE_STEM: &str = "source";

/// Identifies one pipeline run in logs and on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An external program plus arguments placed before the step's own.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl ExternalTool {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    pub fn name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Transcoded audio held in memory, ready to be attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mp3Audio {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MediaPipeline {
    downloader: ExternalTool,
    transcoder: ExternalTool,
    work_dir: PathBuf,
    step_timeout: Duration,
}

impl MediaPipeline {
    pub fn new(
        downloader: ExternalTool,
        transcoder: ExternalTool,
        work_dir: impl Into<PathBuf>,
        step_timeout: Duration,
    ) -> Self {
        Self {
            downloader,
            transcoder,
            work_dir: work_dir.into(),
            step_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ExternalTool::new(&config.downloader_bin),
            ExternalTool::new(&config.transcoder_bin),
            &config.media_work_dir,
            Duration::from_secs(config.media_timeout_secs),
        )
    }

    /// Creates the per-request directory and returns a job bound to it.
    pub fn start(&self, request_id: RequestId) -> Result<MediaJob<'_>, MediaError> {
        std::fs::create_dir_all(&self.work_dir)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("mp3-{request_id}-"))
            .tempdir_in(&self.work_dir)?;
        log_media_step(&request_id.to_string(), "workdir", Some(&dir.path().display().to_string()));

        Ok(MediaJob {
            pipeline: self,
            request_id,
            dir,
            source: None,
            mp3: None,
        })
    }

    /// Runs all three steps for `url`.
    pub async fn fetch_mp3(&self, request_id: RequestId, url: &Url) -> Result<Mp3Audio, MediaError> {
        let mut job = self.start(request_id)?;
        job.download(url).await?;
        job.transcode().await?;
        job.read().await
    }

    async fn run(&self, tool: &ExternalTool, args: Vec<OsString>) -> Result<(), MediaError> {
        let mut command = Command::new(&tool.program);
        command
            .args(&tool.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.step_timeout, command.output())
            .await
            .map_err(|_| MediaError::Timeout {
                tool: tool.name(),
                secs: self.step_timeout.as_secs(),
            })?
            .map_err(|source| MediaError::Spawn {
                tool: tool.name(),
                source,
            })?;

        if !output.status.success() {
            return Err(MediaError::ToolFailed {
                tool: tool.name(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// One pipeline run. Owns the request directory until dropped.
pub struct MediaJob<'a> {
    pipeline: &'a MediaPipeline,
    request_id: RequestId,
    dir: TempDir,
    source: Option<PathBuf>,
    mp3: Option<PathBuf>,
}

impl MediaJob<'_> {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Fetches the best available audio stream as `source.<ext>`.
    pub async fn download(&mut self, url: &Url) -> Result<&Path, MediaError> {
        let template = self.dir().join(format!("{SOURCE_STEM}.%(ext)s"));
        let args = vec![
            OsString::from("-f"),
            OsString::from("bestaudio"),
            OsString::from("--no-playlist"),
            OsString::from("-o"),
            template.into_os_string(),
            OsString::from("--"),
            OsString::from(url.as_str()),
        ];

        log_media_step(&self.request_id.to_string(), "download", Some(url.as_str()));
        self.pipeline.run(&self.pipeline.downloader, args).await?;

        let source = find_source_file(self.dir())?
            .ok_or_else(|| MediaError::MissingOutput(self.dir().to_path_buf()))?;
        Ok(self.source.insert(source).as_path())
    }

    /// Converts the downloaded file to `downloaded.mp3`.
    pub async fn transcode(&mut self) -> Result<&Path, MediaError> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| MediaError::MissingOutput(self.dir().to_path_buf()))?;
        let output = self.dir().join(MP3_FILE_NAME);
        let args = vec![
            OsString::from("-y"),
            OsString::from("-loglevel"),
            OsString::from("error"),
            OsString::from("-i"),
            source.into_os_string(),
            OsString::from("-vn"),
            OsString::from("-codec:a"),
            OsString::from("libmp3lame"),
            OsString::from("-q:a"),
            OsString::from("2"),
            output.clone().into_os_string(),
        ];

        log_media_step(&self.request_id.to_string(), "transcode", None);
        self.pipeline.run(&self.pipeline.transcoder, args).await?;

        if !tokio::fs::try_exists(&output).await? {
            return Err(MediaError::MissingOutput(self.dir().to_path_buf()));
        }
        Ok(self.mp3.insert(output).as_path())
    }

    /// Reads the transcoded file fully into memory.
    pub async fn read(&self) -> Result<Mp3Audio, MediaError> {
        let mp3 = self
            .mp3
            .as_ref()
            .ok_or_else(|| MediaError::MissingOutput(self.dir().to_path_buf()))?;
        let bytes = tokio::fs::read(mp3).await?;
        log_media_step(&self.request_id.to_string(), "read", Some(&format!("{} bytes", bytes.len())));

        Ok(Mp3Audio {
            file_name: MP3_FILE_NAME.to_string(),
            bytes,
        })
    }
}

/// Finds `source.<ext>` in `dir`, skipping partial downloads.
fn find_source_file(dir: &Path) -> Result<Option<PathBuf>, MediaError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_source = path.file_stem().is_some_and(|stem| stem == SOURCE_STEM);
        let is_partial = path.extension().is_some_and(|ext| ext == "part" || ext == "ytdl");
        if path.is_file() && is_source && !is_partial {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
