#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::Path;
use std::time::Duration;

use reminder_bot::error::MediaError;
use reminder_bot::services::media::{ExternalTool, MediaPipeline, RequestId, MP3_FILE_NAME};
use tempfile::TempDir;
use url::Url;

/// Writes the URL it was given into `<template with ext=webm>`.
const FAKE_DOWNLOADER: &str = r#"
out=""
url=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift; shift ;;
    --) url="$2"; shift; shift ;;
    *) shift ;;
  esac
done
[ -n "$out" ] || { echo "no output template" >&2; exit 2; }
target=$(printf '%s' "$out" | sed 's/%(ext)s/webm/')
printf '%s' "$url" > "$target"
"#;

/// Prefixes an ID3 marker to the input and writes it to the last argument.
const FAKE_TRANSCODER: &str = r#"
last=""
for arg in "$@"; do last="$arg"; done
input=""
while [ $# -gt 0 ]; do
  case "$1" in
    -i) input="$2"; shift; shift ;;
    *) shift ;;
  esac
done
[ -f "$input" ] || { echo "missing input" >&2; exit 1; }
{ printf 'ID3'; cat "$input"; } > "$last"
"#;

const FAILING_DOWNLOADER: &str = r#"
echo "ERROR: Unsupported URL" >&2
exit 1
"#;

const SILENT_DOWNLOADER: &str = "exit 0\n";

const SLOW_TOOL: &str = "sleep 5\n";

struct Fixture {
    scripts: TempDir,
    work: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            scripts: tempfile::tempdir().unwrap(),
            work: tempfile::tempdir().unwrap(),
        }
    }

    fn tool(&self, name: &str, body: &str) -> ExternalTool {
        let path = self.scripts.path().join(name);
        std::fs::write(&path, body).unwrap();
        // Run through sh so the freshly written file never needs exec permission
        ExternalTool::new("sh").arg(path)
    }

    fn pipeline(&self, downloader: &str, transcoder: &str, timeout: Duration) -> MediaPipeline {
        MediaPipeline::new(
            self.tool("downloader.sh", downloader),
            self.tool("transcoder.sh", transcoder),
            self.work.path(),
            timeout,
        )
    }

    fn work_dir(&self) -> &Path {
        self.work.path()
    }
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_pipeline_returns_transcoder_output() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(FAKE_DOWNLOADER, FAKE_TRANSCODER, Duration::from_secs(10));
    let url = Url::parse("https://example.com/track").unwrap();

    let audio = pipeline.fetch_mp3(RequestId::new(), &url).await.unwrap();

    assert_eq!(audio.file_name, MP3_FILE_NAME);
    assert_eq!(audio.file_name, "downloaded.mp3");
    assert_eq!(audio.bytes, b"ID3https://example.com/track".to_vec());
    assert_eq!(entries(fixture.work_dir()), 0);
}

#[tokio::test]
async fn test_steps_can_be_driven_one_by_one() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(FAKE_DOWNLOADER, FAKE_TRANSCODER, Duration::from_secs(10));
    let url = Url::parse("https://example.com/a").unwrap();

    let mut job = pipeline.start(RequestId::new()).unwrap();
    let source = job.download(&url).await.unwrap().to_path_buf();
    assert_eq!(source.file_name().unwrap(), "source.webm");
    assert!(source.starts_with(job.dir()));

    let mp3 = job.transcode().await.unwrap().to_path_buf();
    assert_eq!(mp3, job.dir().join("downloaded.mp3"));

    let audio = job.read().await.unwrap();
    assert_eq!(audio.bytes, std::fs::read(&mp3).unwrap());

    let dir = job.dir().to_path_buf();
    drop(job);
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_concurrent_requests_do_not_share_files() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(FAKE_DOWNLOADER, FAKE_TRANSCODER, Duration::from_secs(10));
    let first_url = Url::parse("https://example.com/first").unwrap();
    let second_url = Url::parse("https://example.com/second").unwrap();

    let (first, second) = tokio::join!(
        pipeline.fetch_mp3(RequestId::new(), &first_url),
        pipeline.fetch_mp3(RequestId::new(), &second_url),
    );

    assert_eq!(first.unwrap().bytes, b"ID3https://example.com/first".to_vec());
    assert_eq!(second.unwrap().bytes, b"ID3https://example.com/second".to_vec());
    assert_eq!(entries(fixture.work_dir()), 0);
}

#[tokio::test]
async fn test_downloader_failure_is_reported_with_stderr() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(FAILING_DOWNLOADER, FAKE_TRANSCODER, Duration::from_secs(10));
    let url = Url::parse("https://example.com/track").unwrap();

    let err = pipeline.fetch_mp3(RequestId::new(), &url).await.unwrap_err();
    match err {
        MediaError::ToolFailed { tool, stderr, .. } => {
            assert_eq!(tool, "sh");
            assert_eq!(stderr, "ERROR: Unsupported URL");
        }
        other => panic!("Expected ToolFailed, got {other:?}"),
    }
    assert_eq!(entries(fixture.work_dir()), 0);
}

#[tokio::test]
async fn test_download_without_output_is_missing_output() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(SILENT_DOWNLOADER, FAKE_TRANSCODER, Duration::from_secs(10));
    let url = Url::parse("https://example.com/track").unwrap();

    let err = pipeline.fetch_mp3(RequestId::new(), &url).await.unwrap_err();
    assert!(matches!(err, MediaError::MissingOutput(_)));
}

#[tokio::test]
async fn test_slow_tool_times_out() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(SLOW_TOOL, FAKE_TRANSCODER, Duration::from_millis(200));
    let url = Url::parse("https://example.com/track").unwrap();

    let err = pipeline.fetch_mp3(RequestId::new(), &url).await.unwrap_err();
    assert!(matches!(err, MediaError::Timeout { .. }));
    assert_eq!(entries(fixture.work_dir()), 0);
}
