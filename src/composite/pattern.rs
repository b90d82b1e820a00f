use crate::foundation::error::{AsymError, AsymResult};
use crate::stereo::eye::{LEFT_EYE_TAG, RIGHT_EYE_TAG};

/// Naming pattern of a rendered frame sequence: `prefix` + zero-padded frame number + `extension`.
///
/// `shot01.LeftEye.0047.png` has prefix `shot01.LeftEye.`, padding 4, extension `.png` and,
/// when inferred from that name, start frame 47.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePattern {
    prefix: String,
    zero_pad: usize,
    extension: String,
    start_frame: u64,
}

impl SequencePattern {
    /// Build a pattern from its parts, starting at frame 0.
    pub fn new(prefix: impl Into<String>, zero_pad: usize, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            zero_pad,
            extension: extension.into(),
            start_frame: 0,
        }
    }

    /// Same pattern with the sequence starting at `frame`.
    pub fn with_start_frame(mut self, frame: u64) -> Self {
        self.start_frame = frame;
        self
    }

    /// Infer the pattern from the first file name of the sequence.
    ///
    /// The frame number is the text between the last `.` of the stem and the extension; it must
    /// be a non-empty run of ASCII digits. It becomes the start frame.
    pub fn infer(file_name: &str) -> AsymResult<Self> {
        let (stem, extension) = match file_name.rfind('.') {
            Some(i) if i > 0 => file_name.split_at(i),
            _ => (file_name, ""),
        };

        let Some(dot) = stem.rfind('.') else {
            return Err(AsymError::composite(format!(
                "cannot parse frame number from file name '{file_name}'"
            )));
        };
        let (prefix, frame) = stem.split_at(dot + 1);
        if frame.is_empty() || !frame.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AsymError::composite(format!(
                "cannot parse frame number from file name '{file_name}'"
            )));
        }

        let start: u64 = frame.parse().map_err(|_| {
            AsymError::composite(format!("frame number out of range in '{file_name}'"))
        })?;

        Ok(Self::new(prefix, frame.len(), extension).with_start_frame(start))
    }

    /// Everything before the frame number.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Digits of the frame number.
    pub fn zero_pad(&self) -> usize {
        self.zero_pad
    }

    /// Extension including the leading dot (may be empty).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// First frame number of the sequence.
    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    /// The matching right-eye pattern (`LeftEye` replaced by `RightEye`).
    pub fn to_right_eye(&self) -> AsymResult<Self> {
        if !self.prefix.contains(LEFT_EYE_TAG) && !self.extension.contains(LEFT_EYE_TAG) {
            return Err(AsymError::composite(format!(
                "sequence '{}' does not carry the {LEFT_EYE_TAG} tag",
                self.encoder_pattern()
            )));
        }
        Ok(Self {
            prefix: self.prefix.replace(LEFT_EYE_TAG, RIGHT_EYE_TAG),
            zero_pad: self.zero_pad,
            extension: self.extension.replace(LEFT_EYE_TAG, RIGHT_EYE_TAG),
            start_frame: self.start_frame,
        })
    }

    /// printf-style sequence pattern understood by the encoder, e.g. `shot01.LeftEye.%04d.png`.
    ///
    /// A literal `%` in the prefix or extension is written as `%%`.
    pub fn encoder_pattern(&self) -> String {
        format!(
            "{}%0{}d{}",
            escape_percent(&self.prefix),
            self.zero_pad,
            escape_percent(&self.extension)
        )
    }

    /// File name of frame `frame`.
    pub fn file_name(&self, frame: u64) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            frame,
            self.extension,
            width = self.zero_pad
        )
    }

    /// `true` when `file_name` belongs to this sequence. Frame numbers wider than the padding
    /// are accepted.
    pub fn matches(&self, file_name: &str) -> bool {
        let Some(rest) = file_name.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let Some(frame) = rest.strip_suffix(self.extension.as_str()) else {
            return false;
        };
        frame.len() >= self.zero_pad.max(1) && frame.bytes().all(|b| b.is_ascii_digit())
    }
}

fn escape_percent(s: &str) -> String {
    s.replace('%', "%%")
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pattern.rs"]
mod tests;
