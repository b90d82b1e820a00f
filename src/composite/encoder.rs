use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::composite::host::FileSystem;
use crate::composite::pattern::SequencePattern;
use crate::foundation::core::Fps;
use crate::foundation::error::{AsymError, AsymResult};
use crate::stereo::eye::StereoLayout;

/// Encoder program used when neither an explicit nor a bundled binary is available.
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Highest accepted quality value (CRF scale).
pub const MAX_QUALITY: u8 = 51;

/// Output video codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCodec {
    /// H.264 / AVC.
    #[default]
    H264,
    /// H.265 / HEVC.
    H265,
    /// Apple ProRes (10-bit 4:2:2).
    ProRes,
    /// VP9.
    Vp9,
    /// AV1.
    Av1,
}

impl VideoCodec {
    /// Encoder library name passed to `-c:v`.
    pub fn encoder_name(self) -> &'static str {
        match self {
            Self::H264 => "libx264",
            Self::H265 => "libx265",
            Self::ProRes => "prores_ks",
            Self::Vp9 => "libvpx-vp9",
            Self::Av1 => "libsvtav1",
        }
    }

    /// Output pixel format.
    pub fn pixel_format(self) -> &'static str {
        match self {
            Self::ProRes => "yuv422p10le",
            _ => "yuv420p",
        }
    }

    /// Quality arguments for `quality` on the 0..=51 CRF scale.
    ///
    /// ProRes has no CRF; the value is mapped onto its 0..=5 profile range instead.
    pub fn quality_args(self, quality: u8) -> Vec<String> {
        let q = quality.min(MAX_QUALITY);
        match self {
            Self::ProRes => {
                let profile = (u32::from(q) * 5 / u32::from(MAX_QUALITY)).min(5);
                vec!["-profile:v".to_owned(), profile.to_string()]
            }
            Self::Vp9 => vec![
                "-crf".to_owned(),
                q.to_string(),
                "-b:v".to_owned(),
                "0".to_owned(),
            ],
            _ => vec!["-crf".to_owned(), q.to_string()],
        }
    }
}

impl FromStr for VideoCodec {
    type Err = AsymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h264" | "avc" | "x264" => Ok(Self::H264),
            "h265" | "hevc" | "x265" => Ok(Self::H265),
            "prores" => Ok(Self::ProRes),
            "vp9" => Ok(Self::Vp9),
            "av1" => Ok(Self::Av1),
            other => Err(AsymError::validation(format!(
                "unknown video codec '{other}' (expected h264, h265, prores, vp9 or av1)"
            ))),
        }
    }
}

/// Output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// MPEG-4.
    #[default]
    Mp4,
    /// QuickTime.
    Mov,
    /// Matroska.
    Mkv,
    /// AVI.
    Avi,
}

impl Container {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::Mkv => "mkv",
            Self::Avi => "avi",
        }
    }
}

impl FromStr for Container {
    type Err = AsymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mp4" => Ok(Self::Mp4),
            "mov" => Ok(Self::Mov),
            "mkv" => Ok(Self::Mkv),
            "avi" => Ok(Self::Avi),
            other => Err(AsymError::validation(format!(
                "unknown container '{other}' (expected mp4, mov, mkv or avi)"
            ))),
        }
    }
}

/// Encoder selection and output settings of a composite.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositeSettings {
    /// Output codec.
    pub codec: VideoCodec,
    /// Quality on the 0..=51 CRF scale (lower is better).
    pub quality: u8,
    /// Output container.
    pub container: Container,
    /// Delete both eye sequences after a successful composite.
    pub delete_sources: bool,
    /// Explicit encoder binary; wins when set and non-empty.
    pub encoder_path: Option<PathBuf>,
    /// Encoder binary shipped next to the application; used when it exists.
    pub bundled_encoder: Option<PathBuf>,
}

impl Default for CompositeSettings {
    fn default() -> Self {
        Self {
            codec: VideoCodec::H264,
            quality: 18,
            container: Container::Mp4,
            delete_sources: false,
            encoder_path: None,
            bundled_encoder: None,
        }
    }
}

impl CompositeSettings {
    /// Copy with `quality` clamped to [`MAX_QUALITY`].
    pub fn sanitized(mut self) -> Self {
        self.quality = self.quality.min(MAX_QUALITY);
        self
    }
}

/// Pick the encoder binary: explicit path, then an existing bundled binary, then
/// [`DEFAULT_ENCODER`] looked up on `PATH`.
pub fn resolve_encoder(
    explicit: Option<&Path>,
    bundled: Option<&Path>,
    fs: &impl FileSystem,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        tracing::info!(encoder = %path.display(), "using configured encoder");
        return path.to_path_buf();
    }
    if let Some(path) = bundled {
        if fs.is_file(path) {
            tracing::info!(encoder = %path.display(), "using bundled encoder");
            return path.to_path_buf();
        }
        tracing::info!(
            bundled = %path.display(),
            "no bundled encoder found, falling back to PATH"
        );
    }
    PathBuf::from(DEFAULT_ENCODER)
}

/// `true` when `program -version` runs and exits successfully.
pub fn is_encoder_available(program: &Path) -> bool {
    std::process::Command::new(program)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Output file of a composite: `<dir>/stereo_<SBS|TB>.<ext>`. `None` for mono.
pub fn composite_output_path(
    dir: &Path,
    layout: StereoLayout,
    container: Container,
) -> Option<PathBuf> {
    let tag = layout.short_name()?;
    Some(dir.join(format!("stereo_{tag}.{}", container.extension())))
}

/// A fully resolved encoder invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderCommand {
    /// Program to run.
    pub program: PathBuf,
    /// Arguments, not including the program.
    pub args: Vec<OsString>,
    /// File the encoder writes.
    pub output: PathBuf,
}

impl fmt::Display for EncoderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Build the command that stacks the `left` and `right` sequences found in `dir` into one video.
pub fn build_composite_command(
    program: PathBuf,
    dir: &Path,
    left: &SequencePattern,
    right: &SequencePattern,
    fps: Fps,
    layout: StereoLayout,
    settings: &CompositeSettings,
) -> AsymResult<EncoderCommand> {
    let (Some(filter), Some(output)) = (
        layout.stack_filter(),
        composite_output_path(dir, layout, settings.container),
    ) else {
        return Err(AsymError::validation(
            "mono layout has no stereo composite",
        ));
    };
    let rate = fps.to_rate_arg();

    let mut args: Vec<OsString> = vec!["-y".into(), "-loglevel".into(), "error".into()];
    for seq in [left, right] {
        args.push("-framerate".into());
        args.push(rate.as_str().into());
        args.push("-start_number".into());
        args.push(seq.start_frame().to_string().into());
        args.push("-i".into());
        args.push(dir.join(seq.encoder_pattern()).into_os_string());
    }
    args.push("-filter_complex".into());
    args.push(format!("[0:v][1:v]{filter}=inputs=2").into());
    args.push("-c:v".into());
    args.push(settings.codec.encoder_name().into());
    args.extend(
        settings
            .codec
            .quality_args(settings.quality)
            .into_iter()
            .map(OsString::from),
    );
    args.push("-pix_fmt".into());
    args.push(settings.codec.pixel_format().into());
    args.push(output.clone().into_os_string());

    Ok(EncoderCommand {
        program,
        args,
        output,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/composite/encoder.rs"]
mod tests;
