use super::{MediaError, MediaResult, Transcoder};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

/// Runs the `ffmpeg` CLI with a fixed-height scale filter.
#[derive(Clone, Debug)]
pub struct FfmpegTranscoder {
    binary: String,
    scale_height: u32,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>, scale_height: u32) -> Self {
        Self {
            binary: binary.into(),
            scale_height,
        }
    }

    /// Width `-1` lets ffmpeg keep the source aspect ratio.
    pub fn scale_filter(&self) -> String {
        format!("scale=-1:{}", self.scale_height)
    }

    pub fn build_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-v".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vf".to_string(),
            self.scale_filter(),
            output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> MediaResult<()> {
        // Fail on an unreadable input before handing it to ffmpeg.
        tokio::fs::metadata(input).await?;

        let args = self.build_args(input, output);
        debug!("Running {} {}", self.binary, args.join(" "));
        info!(input = %input.display(), output = %output.display(), "🎥 Transcoding");

        let result = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| MediaError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if result.status.success() {
            info!(output = %output.display(), "✅ Transcode finished");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr);
        let message = last_diagnostic(&stderr)
            .map(str::to_string)
            .unwrap_or_else(|| format!("ffmpeg exited with {}", result.status));

        error!(
            exit_code = ?result.status.code(),
            input = %input.display(),
            "❌ Transcode failed: {}",
            message
        );

        Err(MediaError::FfmpegFailed {
            message,
            exit_code: result.status.code(),
        })
    }
}

/// ffmpeg prints the actual reason last.
fn last_diagnostic(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_aspect_ratio_at_fixed_height() {
        let transcoder = FfmpegTranscoder::new("ffmpeg", 360);
        assert_eq!(transcoder.scale_filter(), "scale=-1:360");
    }

    #[test]
    fn args_place_filter_between_input_and_output() {
        let transcoder = FfmpegTranscoder::new("ffmpeg", 480);
        let args = transcoder.build_args(
            Path::new("raw-videos/clip.mp4"),
            Path::new("processed-videos/processed-clip.mp4"),
        );

        assert_eq!(
            args,
            vec![
                "-y",
                "-v",
                "error",
                "-i",
                "raw-videos/clip.mp4",
                "-vf",
                "scale=-1:480",
                "processed-videos/processed-clip.mp4",
            ]
        );
    }

    #[test]
    fn last_diagnostic_skips_trailing_blank_lines() {
        let stderr = "frame=1\nclip.mp4: Invalid data found when processing input\n\n  \n";
        assert_eq!(
            last_diagnostic(stderr),
            Some("clip.mp4: Invalid data found when processing input")
        );
        assert_eq!(last_diagnostic("   \n"), None);
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        std::fs::write(&input, b"frames").unwrap();
        let transcoder = FfmpegTranscoder::new("definitely-not-ffmpeg-7f3a", 360);

        let err = transcoder
            .transcode(&input, &dir.path().join("out.mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Spawn { .. }));
    }

    #[tokio::test]
    async fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = FfmpegTranscoder::new("definitely-not-ffmpeg-7f3a", 360);

        let err = transcoder
            .transcode(&dir.path().join("gone.mp4"), &dir.path().join("out.mp4"))
            .await
            .unwrap_err();

        match err {
            MediaError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    fn tool_available(tool: &str) -> bool {
        std::process::Command::new(tool)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn video_dimensions(path: &Path) -> String {
        let output = std::process::Command::new("ffprobe")
            .args(["-v", "error", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=width,height", "-of", "csv=s=x:p=0"])
            .arg(path)
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    #[tokio::test]
    async fn rescales_720p_to_360p_keeping_aspect_ratio() {
        if !tool_available("ffmpeg") || !tool_available("ffprobe") {
            eprintln!("ffmpeg/ffprobe not installed, skipping");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip1.mp4");
        let output = dir.path().join("processed-clip1.mp4");

        let status = std::process::Command::new("ffmpeg")
            .args(["-y", "-v", "error", "-f", "lavfi"])
            .args(["-i", "testsrc=size=1280x720:rate=10", "-t", "1"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(&input)
            .status()
            .unwrap();
        assert!(status.success());
        assert_eq!(video_dimensions(&input), "1280x720");

        FfmpegTranscoder::new("ffmpeg", 360)
            .transcode(&input, &output)
            .await
            .unwrap();

        assert_eq!(video_dimensions(&output), "640x360");
    }

    #[tokio::test]
    async fn invalid_input_reports_engine_message() {
        if !tool_available("ffmpeg") {
            eprintln!("ffmpeg not installed, skipping");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.mp4");
        std::fs::write(&input, b"definitely not a video").unwrap();

        let err = FfmpegTranscoder::new("ffmpeg", 360)
            .transcode(&input, &dir.path().join("out.mp4"))
            .await
            .unwrap_err();

        match err {
            MediaError::FfmpegFailed { message, exit_code } => {
                assert!(!message.is_empty());
                assert_ne!(exit_code, Some(0));
            }
            other => panic!("expected FfmpegFailed, got {other:?}"),
        }
    }
}
