/// What the CAFF decoder does once an animation frame has decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePolicy {
    /// Stop at the first decoded animation frame; later blocks are never read.
    #[default]
    FirstFrame,
    /// Decode every declared block and keep all frames.
    AllFrames,
}

/// How strictly credits dates are checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarCheck {
    /// Field ranges only (day in `1..=31` for every month).
    #[default]
    Lenient,
    /// Also reject days past the end of the given month.
    Strict,
}

/// Decoder settings. The default stops at the first frame and checks date ranges only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DecodeConfig {
    /// Early-termination policy for animation blocks.
    pub frame_policy: FramePolicy,
    /// Credits date strictness.
    pub calendar: CalendarCheck,
}

impl DecodeConfig {
    /// Keep every animation frame.
    pub fn all_frames(mut self) -> Self {
        self.frame_policy = FramePolicy::AllFrames;
        self
    }

    /// Enable month-length checks on credits dates.
    pub fn strict_calendar(mut self) -> Self {
        self.calendar = CalendarCheck::Strict;
        self
    }
}
