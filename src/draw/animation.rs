use derive_more::Display;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Attribute {
    #[display("stroke-opacity")]
    StrokeOpacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Indefinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Begin {
    /// Starts as soon as the animation is installed.
    Immediately,
    /// Waits for an explicit `begin_animation`.
    OnDemand,
}

/// What the attribute shows once a finite animation has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Remove,
    Freeze,
}

/// Declarative keyframe animation of a single numeric attribute.
///
/// Keyframes are evenly spaced over `duration` and linearly interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub attribute: Attribute,
    pub values: Vec<f32>,
    pub duration: Duration,
    pub repeat: Repeat,
    pub begin: Begin,
    pub fill: Fill,
}

impl Animation {
    pub fn new(attribute: Attribute, values: impl Into<Vec<f32>>, duration: Duration) -> Self {
        Self {
            attribute,
            values: values.into(),
            duration,
            repeat: Repeat::Count(1),
            begin: Begin::Immediately,
            fill: Fill::Remove,
        }
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn begin(mut self, begin: Begin) -> Self {
        self.begin = begin;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    fn total(&self) -> Option<Duration> {
        match self.repeat {
            Repeat::Count(n) => Some(self.duration * n),
            Repeat::Indefinite => None,
        }
    }

    fn sample(&self, phase: f32) -> Option<f32> {
        let (first, rest) = self.values.split_first()?;
        if rest.is_empty() {
            return Some(*first);
        }
        let segments = rest.len();
        let pos = phase.clamp(0.0, 1.0) * segments as f32;
        let i = (pos.floor() as usize).min(segments - 1);
        let frac = pos - i as f32;
        let (a, b) = (self.values[i], self.values[i + 1]);
        Some(a + (b - a) * frac)
    }
}

/// An installed animation together with its playback state.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub animation: Animation,
    started_at: Option<Instant>,
    begin_count: u32,
}

impl AnimationState {
    pub fn install(animation: Animation, now: Instant) -> Self {
        let mut state = Self {
            animation,
            started_at: None,
            begin_count: 0,
        };
        if state.animation.begin == Begin::Immediately {
            state.begin(now);
        }
        state
    }

    pub fn begin(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.begin_count += 1;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// How many times playback has been (re)started.
    pub fn begin_count(&self) -> u32 {
        self.begin_count
    }

    pub fn is_running(&self, now: Instant) -> bool {
        let Some(start) = self.started_at else {
            return false;
        };
        match self.animation.total() {
            Some(total) => now.saturating_duration_since(start) < total,
            None => true,
        }
    }

    /// Animated value at `now`, or `None` when the base value applies.
    pub fn value_at(&self, now: Instant) -> Option<f32> {
        let start = self.started_at?;
        let elapsed = now.saturating_duration_since(start);
        let animation = &self.animation;

        if let Some(total) = animation.total()
            && elapsed >= total
        {
            return match animation.fill {
                Fill::Freeze => animation.values.last().copied(),
                Fill::Remove => None,
            };
        }

        let period = animation.duration.as_secs_f32();
        if period <= 0.0 {
            return animation.values.last().copied();
        }
        let phase = (elapsed.as_secs_f32() % period) / period;
        animation.sample(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> Animation {
        Animation::new(Attribute::StrokeOpacity, [1.0, 0.0], Duration::from_secs(1))
            .begin(Begin::OnDemand)
            .fill(Fill::Freeze)
    }

    #[test]
    fn on_demand_animation_waits_for_begin() {
        let now = Instant::now();
        let state = AnimationState::install(fade(), now);
        assert_eq!(state.begin_count(), 0);
        assert_eq!(state.value_at(now), None);
        assert!(!state.is_running(now));
    }

    #[test]
    fn interpolates_between_keyframes() {
        let now = Instant::now();
        let mut state = AnimationState::install(fade(), now);
        state.begin(now);
        assert_eq!(state.value_at(now), Some(1.0));
        let half = state.value_at(now + Duration::from_millis(500)).unwrap();
        assert!((half - 0.5).abs() < 1e-3, "got {half}");
    }

    #[test]
    fn freeze_keeps_last_value_after_end() {
        let now = Instant::now();
        let mut state = AnimationState::install(fade(), now);
        state.begin(now);
        let later = now + Duration::from_secs(5);
        assert!(!state.is_running(later));
        assert_eq!(state.value_at(later), Some(0.0));
    }

    #[test]
    fn remove_falls_back_to_base_after_end() {
        let now = Instant::now();
        let state = AnimationState::install(fade().fill(Fill::Remove).begin(Begin::Immediately), now);
        assert_eq!(state.value_at(now + Duration::from_secs(2)), None);
    }

    #[test]
    fn indefinite_animation_wraps_around() {
        let now = Instant::now();
        let blink = Animation::new(
            Attribute::StrokeOpacity,
            [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            Duration::from_secs(1),
        )
        .repeat(Repeat::Indefinite);
        let state = AnimationState::install(blink, now);
        assert_eq!(state.begin_count(), 1);
        assert_eq!(state.value_at(now + Duration::from_millis(2100)), Some(1.0));
        assert_eq!(state.value_at(now + Duration::from_millis(2900)), Some(0.0));
        assert!(state.is_running(now + Duration::from_secs(3600)));
    }

    #[test]
    fn stop_clears_playback() {
        let now = Instant::now();
        let mut state = AnimationState::install(fade().begin(Begin::Immediately), now);
        state.stop();
        assert_eq!(state.value_at(now), None);
        assert_eq!(state.begin_count(), 1);
    }
}
