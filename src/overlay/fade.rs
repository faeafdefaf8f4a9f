// SPDX-License-Identifier: MPL-2.0
//! Overlay opacity animation.
//!
//! One animation at a time: starting a fade replaces the one in flight and
//! continues from the current level, so a fade-in interrupting a fade-out
//! does not jump back to fully hidden first.

use crate::config::FADE_ANIMATION_MS;
use crate::domain::ui::Opacity;
use std::time::{Duration, Instant};

/// Duration of every fade.
pub const FADE_DURATION: Duration = Duration::from_millis(FADE_ANIMATION_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    /// Opacity at the end of the fade.
    #[must_use]
    pub fn target(self) -> Opacity {
        match self {
            Self::In => Opacity::SHOWN,
            Self::Out => Opacity::HIDDEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    direction: FadeDirection,
    from: Opacity,
    started_at: Instant,
}

#[derive(Debug, Clone)]
pub struct FadeAnimator {
    level: Opacity,
    duration: Duration,
    active: Option<Fade>,
}

impl FadeAnimator {
    /// Creates an idle animator resting at `level`.
    #[must_use]
    pub fn new(level: Opacity) -> Self {
        Self {
            level,
            duration: FADE_DURATION,
            active: None,
        }
    }

    #[must_use]
    pub fn level(&self) -> Opacity {
        self.level
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Direction of the fade in flight, if any.
    #[must_use]
    pub fn direction(&self) -> Option<FadeDirection> {
        self.active.map(|fade| fade.direction)
    }

    /// Starts a fade, replacing any fade in flight.
    pub fn start(&mut self, direction: FadeDirection, now: Instant) {
        self.active = Some(Fade {
            direction,
            from: self.level,
            started_at: now,
        });
    }

    /// Jumps the fade in flight to its target level. Returns its direction,
    /// as [`tick`](Self::tick) would on completion.
    pub fn finish(&mut self) -> Option<FadeDirection> {
        let fade = self.active.take()?;
        self.level = fade.direction.target();
        Some(fade.direction)
    }

    /// Advances the animation. Returns the direction of a fade that
    /// completed on this tick.
    pub fn tick(&mut self, now: Instant) -> Option<FadeDirection> {
        let fade = self.active?;
        let elapsed = now.saturating_duration_since(fade.started_at);

        if elapsed >= self.duration {
            self.level = fade.direction.target();
            self.active = None;
            return Some(fade.direction);
        }

        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.level = fade.from.lerp(fade.direction.target(), progress);
        None
    }
}

impl Default for FadeAnimator {
    fn default() -> Self {
        Self::new(Opacity::SHOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fade_out_reaches_hidden_after_duration() {
        let start = Instant::now();
        let mut fade = FadeAnimator::default();
        fade.start(FadeDirection::Out, start);

        assert_eq!(fade.tick(start + ms(100)), None);
        assert!((fade.level().value() - 0.5).abs() < 0.01);

        assert_eq!(fade.tick(start + ms(200)), Some(FadeDirection::Out));
        assert!(fade.level().is_hidden());
        assert!(!fade.is_animating());
    }

    #[test]
    fn new_fade_replaces_in_flight_fade_from_current_level() {
        let start = Instant::now();
        let mut fade = FadeAnimator::default();
        fade.start(FadeDirection::Out, start);
        fade.tick(start + ms(150));
        let level = fade.level().value();
        assert!(level < 0.5);

        fade.start(FadeDirection::In, start + ms(150));
        assert_eq!(fade.direction(), Some(FadeDirection::In));
        fade.tick(start + ms(150));
        assert!((fade.level().value() - level).abs() < 0.01);

        assert_eq!(fade.tick(start + ms(350)), Some(FadeDirection::In));
        assert!(fade.level().is_shown());
    }

    #[test]
    fn tick_without_fade_is_noop() {
        let mut fade = FadeAnimator::new(Opacity::HIDDEN);
        assert_eq!(fade.tick(Instant::now()), None);
        assert!(fade.level().is_hidden());
    }

    #[test]
    fn finish_jumps_to_target() {
        let start = Instant::now();
        let mut fade = FadeAnimator::default();
        fade.start(FadeDirection::Out, start);
        fade.tick(start + ms(50));
        assert!(!fade.level().is_hidden());

        assert_eq!(fade.finish(), Some(FadeDirection::Out));
        assert!(fade.level().is_hidden());
        assert!(!fade.is_animating());
        assert_eq!(fade.finish(), None);
        assert_eq!(fade.tick(start + ms(500)), None);
    }
}
