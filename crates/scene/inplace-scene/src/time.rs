//! Scene time: integer ticks, frame-rate modes and frame quantization.
//!
//! All key times are stored as ticks so that frame-aligned times compare
//! exactly. Frame <-> tick conversion goes through the exact rational rate of
//! the scene's [`TimeMode`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Number of ticks in one second of scene time.
pub const TICKS_PER_SECOND: i64 = 46_186_158_000;

/// A moment in scene time, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneTime(pub i64);

impl SceneTime {
    pub const ZERO: SceneTime = SceneTime(0);

    #[inline]
    pub fn ticks(self) -> i64 {
        self.0
    }

    /// Create a time from seconds, rounding to the nearest tick.
    pub fn from_seconds(seconds: f64) -> Result<Self, DocumentError> {
        if !seconds.is_finite() {
            return Err(DocumentError::invalid(format!(
                "time in seconds must be finite, got {seconds}"
            )));
        }
        Ok(Self((seconds * TICKS_PER_SECOND as f64).round() as i64))
    }

    #[inline]
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }

    /// Time of whole frame `frame` under `mode`.
    pub fn from_frame(frame: i64, mode: TimeMode) -> Self {
        let rate = mode.frame_rate();
        let numer = frame as i128 * TICKS_PER_SECOND as i128 * rate.den as i128;
        Self(div_round(numer, rate.num as i128) as i64)
    }

    /// Whole frame count of this time under `mode`, truncated toward zero.
    ///
    /// A time within half a tick of a frame boundary counts as that frame, so
    /// `SceneTime::from_frame(f, mode).frame(mode) == f` for every rate even
    /// though frame times are rounded to whole ticks.
    pub fn frame(self, mode: TimeMode) -> i64 {
        let rate = mode.frame_rate();
        let num = rate.num as i128;
        let half_tick = num / 2;
        let numer = self.0 as i128 * num;
        let denom = TICKS_PER_SECOND as i128 * rate.den as i128;
        let nudged = if numer >= 0 {
            numer + half_tick
        } else {
            numer - half_tick
        };
        (nudged / denom) as i64
    }

    /// Fraction of `[a, b]` covered up to `self`; 0 when the span is empty.
    pub(crate) fn fraction_between(self, a: SceneTime, b: SceneTime) -> f64 {
        let span = b.0 - a.0;
        if span == 0 {
            return 0.0;
        }
        (self.0 - a.0) as f64 / span as f64
    }
}

impl fmt::Display for SceneTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s", self.as_seconds())
    }
}

/// Round-half-away-from-zero integer division.
fn div_round(numer: i128, denom: i128) -> i128 {
    debug_assert!(denom > 0);
    if numer >= 0 {
        (numer + denom / 2) / denom
    } else {
        -((-numer + denom / 2) / denom)
    }
}

/// Exact frame rate as `num / den` frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

impl FrameRate {
    #[inline]
    pub fn fps(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{:.3}", self.fps())
        }
    }
}

/// Scene-wide frame rate setting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    Frames120,
    Frames100,
    Frames60,
    Frames50,
    Frames48,
    #[default]
    Frames30,
    Frames30Drop,
    NtscDropFrame,
    NtscFullFrame,
    Pal,
    Cinema,
    Frames1000,
    CinemaNd,
    Frames96,
    Frames72,
    #[serde(rename = "frames59_94")]
    Frames59_94,
    #[serde(rename = "frames119_88")]
    Frames119_88,
    /// Arbitrary rate; resolved to a thousandth of a frame per second.
    Custom { fps: f64 },
}

impl TimeMode {
    pub fn frame_rate(self) -> FrameRate {
        let (num, den) = match self {
            TimeMode::Frames120 => (120, 1),
            TimeMode::Frames100 => (100, 1),
            TimeMode::Frames60 => (60, 1),
            TimeMode::Frames50 => (50, 1),
            TimeMode::Frames48 => (48, 1),
            TimeMode::Frames30 | TimeMode::Frames30Drop => (30, 1),
            TimeMode::NtscDropFrame | TimeMode::NtscFullFrame => (30_000, 1001),
            TimeMode::Pal => (25, 1),
            TimeMode::Cinema => (24, 1),
            TimeMode::Frames1000 => (1000, 1),
            TimeMode::CinemaNd => (24_000, 1001),
            TimeMode::Frames96 => (96, 1),
            TimeMode::Frames72 => (72, 1),
            TimeMode::Frames59_94 => (60_000, 1001),
            TimeMode::Frames119_88 => (120_000, 1001),
            TimeMode::Custom { fps } => ((fps * 1000.0).round().max(1.0) as u32, 1000),
        };
        FrameRate { num, den }
    }

    pub(crate) fn validate(self) -> Result<(), DocumentError> {
        if let TimeMode::Custom { fps } = self {
            if !fps.is_finite() || fps < 0.001 || fps > 1_000_000.0 {
                return Err(DocumentError::invalid(format!(
                    "custom time mode fps must be in [0.001, 1e6], got {fps}"
                )));
            }
        }
        Ok(())
    }
}

/// Closed interval of scene time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: SceneTime,
    pub stop: SceneTime,
}

impl TimeSpan {
    pub fn new(start: SceneTime, stop: SceneTime) -> Result<Self, DocumentError> {
        let span = Self { start, stop };
        span.validate()?;
        Ok(span)
    }

    /// Span covering whole frames `start..=stop` under `mode`.
    pub fn from_frames(start: i64, stop: i64, mode: TimeMode) -> Result<Self, DocumentError> {
        Self::new(
            SceneTime::from_frame(start, mode),
            SceneTime::from_frame(stop, mode),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), DocumentError> {
        if self.start > self.stop {
            return Err(DocumentError::invalid(format!(
                "time span start {} is after stop {}",
                self.start, self.stop
            )));
        }
        Ok(())
    }

    /// Quantize to whole frames, truncating toward zero, so no frame in the
    /// range lies past `stop` (or before a negative `start`). Truncation is
    /// monotonic, so the range never inverts for a valid span.
    pub fn frame_range(&self, mode: TimeMode) -> FrameRange {
        FrameRange {
            start: self.start.frame(mode),
            stop: self.stop.frame(mode),
        }
    }
}

/// Inclusive range of whole frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i64,
    pub stop: i64,
}

impl FrameRange {
    /// Number of frames in the range (inclusive of both ends).
    #[inline]
    pub fn count(&self) -> u64 {
        (self.stop - self.start + 1).max(0) as u64
    }

    #[inline]
    pub fn frames(&self) -> std::ops::RangeInclusive<i64> {
        self.start..=self.stop
    }
}
