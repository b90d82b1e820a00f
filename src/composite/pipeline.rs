use std::path::{Path, PathBuf};

use crate::composite::encoder::{CompositeSettings, build_composite_command, resolve_encoder};
use crate::composite::host::{FileSystem, ProcessHost, ProcessStatus};
use crate::composite::pattern::SequencePattern;
use crate::foundation::core::Fps;
use crate::foundation::error::{AsymError, AsymResult};
use crate::stereo::eye::{LEFT_EYE_TAG, RIGHT_EYE_TAG, StereoLayout};

/// A finished stereo render: where the eye sequences were written and at which rate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StereoRenderJob {
    /// Directory holding both eye sequences; the composite is written here too.
    pub output_dir: PathBuf,
    /// Frame rate of the sequences.
    pub fps: Fps,
}

impl StereoRenderJob {
    /// Job at the default 24 fps.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            fps: Fps::default(),
        }
    }
}

/// Composite pipeline state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeState {
    /// Not started.
    #[default]
    Idle,
    /// Encoder running.
    Composing,
    /// Encoder exited with code 0.
    Succeeded,
    /// Nothing to composite, launch failure, or non-zero encoder exit.
    Failed,
}

impl CompositeState {
    /// `true` for [`CompositeState::Succeeded`] and [`CompositeState::Failed`].
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Outcome of an encoder run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeReport {
    /// Video the encoder was asked to write.
    pub output_path: PathBuf,
    /// Encoder exit code (`None` when killed by a signal).
    pub exit_code: Option<i32>,
    /// Left-eye frames deleted after success.
    pub deleted_left: usize,
    /// Right-eye frames deleted after success.
    pub deleted_right: usize,
}

struct Running<H> {
    handle: H,
    output_dir: PathBuf,
    output_path: PathBuf,
    left: SequencePattern,
    right: SequencePattern,
}

/// Merges the two eye sequences of a finished stereo job with an external encoder.
///
/// Driven by an external tick: [`CompositePipeline::begin`] once the job's files are on disk,
/// then [`CompositePipeline::poll`] until it returns `true`. There is no cancellation; dropping
/// the pipeline leaves a running encoder alone.
pub struct CompositePipeline<P: ProcessHost, F: FileSystem> {
    host: P,
    fs: F,
    layout: StereoLayout,
    settings: CompositeSettings,
    state: CompositeState,
    running: Option<Running<P::Handle>>,
    failure: Option<AsymError>,
    report: Option<CompositeReport>,
}

impl<P: ProcessHost, F: FileSystem> CompositePipeline<P, F> {
    /// Idle pipeline for `layout` with `settings` (quality is clamped).
    pub fn new(host: P, fs: F, layout: StereoLayout, settings: CompositeSettings) -> Self {
        Self {
            host,
            fs,
            layout,
            settings: settings.sanitized(),
            state: CompositeState::Idle,
            running: None,
            failure: None,
            report: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> CompositeState {
        self.state
    }

    /// Why the pipeline failed, once it has.
    pub fn failure(&self) -> Option<&AsymError> {
        self.failure.as_ref()
    }

    /// Encoder outcome, once the encoder has exited.
    pub fn report(&self) -> Option<&CompositeReport> {
        self.report.as_ref()
    }

    /// Settings in effect.
    pub fn settings(&self) -> &CompositeSettings {
        &self.settings
    }

    /// The process host.
    pub fn host(&self) -> &P {
        &self.host
    }

    /// The filesystem.
    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Discover the eye sequences of `job` and launch the encoder.
    ///
    /// Only acts from [`CompositeState::Idle`]. Ends in [`CompositeState::Failed`] without
    /// spawning anything when no left-eye frames are found or their names cannot be parsed.
    #[tracing::instrument(skip(self, job), fields(dir = %job.output_dir.display()))]
    pub fn begin(&mut self, job: StereoRenderJob) -> CompositeState {
        if self.state != CompositeState::Idle {
            tracing::warn!(state = ?self.state, "composite already started");
            return self.state;
        }

        match self.launch(&job) {
            Ok(running) => {
                tracing::info!(output = %running.output_path.display(), "encoder launched");
                self.running = Some(running);
                self.state = CompositeState::Composing;
            }
            Err(e) => self.fail(e),
        }
        self.state
    }

    /// Non-blocking completion check. Returns `true` once the pipeline is finished, `false` while
    /// the encoder is running or before [`CompositePipeline::begin`].
    ///
    /// Cleanup runs exactly once, on the poll that observes the encoder's exit.
    pub fn poll(&mut self) -> bool {
        if self.state != CompositeState::Composing {
            return self.state != CompositeState::Idle;
        }
        let Some(running) = self.running.as_mut() else {
            self.fail(AsymError::composite("composing without an encoder process"));
            return true;
        };

        match self.host.poll(&mut running.handle) {
            Ok(ProcessStatus::Running) => false,
            Ok(ProcessStatus::Exited { code, stderr }) => {
                self.finish(code, &stderr);
                true
            }
            Err(e) => {
                if let Some(running) = self.running.take() {
                    self.host.close(running.handle);
                }
                self.fail(e);
                true
            }
        }
    }

    fn launch(&mut self, job: &StereoRenderJob) -> AsymResult<Running<P::Handle>> {
        if !self.layout.is_stereo() {
            return Err(AsymError::composite("mono layout has nothing to composite"));
        }

        let program = resolve_encoder(
            self.settings.encoder_path.as_deref(),
            self.settings.bundled_encoder.as_deref(),
            &self.fs,
        );

        let dir = job.output_dir.as_path();
        let mut left_files = self.fs.list_files(dir, &tag_glob(LEFT_EYE_TAG))?;
        left_files.sort();
        let Some(first) = left_files.first() else {
            return Err(AsymError::composite(format!(
                "no {LEFT_EYE_TAG} files found in '{}'",
                dir.display()
            )));
        };
        tracing::debug!(first = %first, count = left_files.len(), "found left-eye frames");

        let left = SequencePattern::infer(first)?;
        let right = left.to_right_eye()?;

        let command = build_composite_command(
            program,
            dir,
            &left,
            &right,
            job.fps,
            self.layout,
            &self.settings,
        )?;
        tracing::info!(command = %command, "running composite encoder");

        let handle = self.host.spawn(&command)?;
        Ok(Running {
            handle,
            output_dir: job.output_dir.clone(),
            output_path: command.output,
            left,
            right,
        })
    }

    fn finish(&mut self, code: Option<i32>, stderr: &str) {
        let Some(running) = self.running.take() else {
            return;
        };
        let Running {
            handle,
            output_dir,
            output_path,
            left,
            right,
        } = running;
        self.host.close(handle);

        let mut report = CompositeReport {
            output_path,
            exit_code: code,
            deleted_left: 0,
            deleted_right: 0,
        };

        if code == Some(0) {
            if self.settings.delete_sources {
                report.deleted_left = self.delete_sequence(&output_dir, LEFT_EYE_TAG, &left);
                report.deleted_right = self.delete_sequence(&output_dir, RIGHT_EYE_TAG, &right);
                tracing::info!(
                    left = report.deleted_left,
                    right = report.deleted_right,
                    "deleted eye source files"
                );
            }
            tracing::info!(output = %report.output_path.display(), "composite succeeded");
            self.state = CompositeState::Succeeded;
        } else {
            let code_str = code.map_or_else(|| "signal".to_owned(), |c| c.to_string());
            let msg = if stderr.is_empty() {
                format!("encoder exited with {code_str}, keeping source files")
            } else {
                format!("encoder exited with {code_str}, keeping source files: {stderr}")
            };
            self.fail(AsymError::composite(msg));
        }
        self.report = Some(report);
    }

    fn delete_sequence(&mut self, dir: &Path, tag: &str, pattern: &SequencePattern) -> usize {
        let names = match self.fs.list_files(dir, &tag_glob(tag)) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, tag, "failed to list source files for deletion");
                return 0;
            }
        };

        let mut deleted = 0;
        for name in names.iter().filter(|n| pattern.matches(n)) {
            match self.fs.remove_file(&dir.join(name)) {
                Ok(()) => deleted += 1,
                Err(e) => tracing::warn!(error = %e, file = %name, "failed to delete source file"),
            }
        }
        deleted
    }

    fn fail(&mut self, err: AsymError) {
        tracing::error!(error = %err, "stereo composite failed");
        self.failure = Some(err);
        self.state = CompositeState::Failed;
    }
}

fn tag_glob(tag: &str) -> String {
    format!("*{tag}*")
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pipeline.rs"]
mod tests;
