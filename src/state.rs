//! Slide advancement and crossfade progress.
//!
//! Pure bookkeeping over indices into the image list: no textures and no
//! clock. The render loop feeds it frame deltas and key commands, then asks
//! which slides should be on screen.

use std::f32::consts::PI;

/// Observable state of the slideshow.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SlideshowState {
    Empty,                                               // No images, navigation disabled
    Idle { index: usize },                               // Showing a slide, waiting for the timer
    Transitioning { from: usize, to: usize, progress: f32 }, // Crossfading between two slides
    Paused { index: usize },                             // Showing a slide, timer frozen
}

/// Durations driving the state machine, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub rotation: f32,
    pub transition: f32,
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Phase {
    Showing(usize),
    Fading { from: usize, to: usize, elapsed: f32 },
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug)]
pub struct Slideshow {
    len: usize,
    timing: Timing,
    phase: Phase,
    paused: bool,
    display_timer: f32,
}

impl Slideshow {
    pub fn new(len: usize, timing: Timing) -> Self {
        Self {
            len,
            timing,
            phase: Phase::Showing(0),
            paused: false,
            display_timer: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn state(&self) -> SlideshowState {
        if self.len == 0 {
            return SlideshowState::Empty;
        }
        match self.phase {
            Phase::Showing(index) if self.paused => SlideshowState::Paused { index },
            Phase::Showing(index) => SlideshowState::Idle { index },
            Phase::Fading { from, to, elapsed } => SlideshowState::Transitioning {
                from,
                to,
                progress: self.progress_of(elapsed),
            },
        }
    }

    /// Index of the slide that is, or is becoming, the one on screen.
    pub fn current(&self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        Some(match self.phase {
            Phase::Showing(index) => index,
            Phase::Fading { from, .. } => from,
        })
    }

    /// Index of the slide that should be held ready next to the current one.
    pub fn upcoming(&self) -> Option<usize> {
        match self.phase {
            _ if self.len < 2 => None,
            Phase::Showing(index) => Some((index + 1) % self.len),
            Phase::Fading { to, .. } => Some(to),
        }
    }

    /// Opacity of the incoming slide, eased. Zero when not transitioning.
    pub fn blend(&self) -> f32 {
        match self.state() {
            SlideshowState::Transitioning { progress, .. } => ease_in_out_sine(progress),
            _ => 0.0,
        }
    }

    /// Advance time by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.len == 0 {
            return;
        }
        match self.phase {
            Phase::Showing(_) => {
                if self.paused {
                    return;
                }
                self.display_timer += dt;
                if self.display_timer >= self.timing.rotation {
                    self.begin(Direction::Forward);
                }
            }
            Phase::Fading { from, to, elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timing.transition {
                    self.finish();
                } else {
                    self.phase = Phase::Fading { from, to, elapsed };
                }
            }
        }
    }

    pub fn next(&mut self) {
        self.navigate(Direction::Forward);
    }

    pub fn previous(&mut self) {
        self.navigate(Direction::Backward);
    }

    /// Freeze or release the timer. Resuming gives the current slide a full
    /// display period.
    pub fn toggle_pause(&mut self) {
        if self.len == 0 {
            return;
        }
        self.paused = !self.paused;
        if !self.paused {
            self.display_timer = 0.0;
        }
    }

    /// Forget the image at `index` after it failed to load.
    ///
    /// Indices past `index` shift down by one. A slide that pointed at the
    /// removed image now points at the image that followed it.
    pub fn remove(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.len -= 1;
        if self.len == 0 {
            self.phase = Phase::Showing(0);
            self.paused = false;
            self.display_timer = 0.0;
            return;
        }

        let len = self.len;
        let shift = |i: usize| {
            if i > index {
                i - 1
            } else if i == index {
                i % len
            } else {
                i
            }
        };
        self.phase = match self.phase {
            Phase::Showing(i) => Phase::Showing(shift(i)),
            Phase::Fading { from, to, elapsed } => {
                let (from, to) = (shift(from), shift(to));
                if from == to {
                    self.display_timer = 0.0;
                    Phase::Showing(to)
                } else {
                    Phase::Fading { from, to, elapsed }
                }
            }
        };
    }

    fn navigate(&mut self, direction: Direction) {
        if self.len == 0 {
            return;
        }
        if matches!(self.phase, Phase::Fading { .. }) {
            self.finish();
        }
        self.begin(direction);
    }

    fn begin(&mut self, direction: Direction) {
        let Phase::Showing(from) = self.phase else {
            return;
        };
        self.display_timer = 0.0;
        if self.len < 2 {
            return;
        }
        let to = match direction {
            Direction::Forward => (from + 1) % self.len,
            Direction::Backward => (from + self.len - 1) % self.len,
        };
        self.phase = Phase::Fading { from, to, elapsed: 0.0 };
    }

    fn finish(&mut self) {
        if let Phase::Fading { to, .. } = self.phase {
            self.phase = Phase::Showing(to);
            self.display_timer = 0.0;
        }
    }

    fn progress_of(&self, elapsed: f32) -> f32 {
        if self.timing.transition <= 0.0 {
            1.0
        } else {
            (elapsed / self.timing.transition).clamp(0.0, 1.0)
        }
    }
}

/// Sine ease-in-out over `[0, 1]`.
pub fn ease_in_out_sine(t: f32) -> f32 {
    (1.0 - (t.clamp(0.0, 1.0) * PI).cos()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: Timing = Timing { rotation: 10.0, transition: 1.0 };

    fn show(len: usize) -> Slideshow {
        Slideshow::new(len, TIMING)
    }

    #[test]
    fn starts_idle_on_first_slide() {
        let s = show(3);
        assert_eq!(s.state(), SlideshowState::Idle { index: 0 });
        assert_eq!(s.current(), Some(0));
        assert_eq!(s.upcoming(), Some(1));
        assert_eq!(s.blend(), 0.0);
    }

    #[test]
    fn timer_starts_a_transition_forward() {
        let mut s = show(3);
        s.update(9.5);
        assert_eq!(s.state(), SlideshowState::Idle { index: 0 });
        s.update(0.5);
        assert_eq!(s.state(), SlideshowState::Transitioning { from: 0, to: 1, progress: 0.0 });
    }

    #[test]
    fn transition_progresses_then_settles() {
        let mut s = show(3);
        s.next();
        s.update(0.5);
        assert_eq!(s.state(), SlideshowState::Transitioning { from: 0, to: 1, progress: 0.5 });
        assert!((s.blend() - 0.5).abs() < 1e-6);
        s.update(0.5);
        assert_eq!(s.state(), SlideshowState::Idle { index: 1 });
    }

    #[test]
    fn wraps_forward_and_backward() {
        let mut s = show(3);
        s.previous();
        assert_eq!(s.state(), SlideshowState::Transitioning { from: 0, to: 2, progress: 0.0 });
        s.update(1.0);
        s.next();
        assert_eq!(s.state(), SlideshowState::Transitioning { from: 2, to: 0, progress: 0.0 });
    }

    #[test]
    fn display_timer_restarts_after_a_transition() {
        let mut s = show(3);
        s.update(10.0);
        s.update(1.0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 1 });
        s.update(9.0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 1 });
        s.update(1.0);
        assert!(matches!(s.state(), SlideshowState::Transitioning { from: 1, to: 2, .. }));
    }

    #[test]
    fn manual_navigation_completes_the_running_fade() {
        let mut s = show(4);
        s.next();
        s.update(0.3);
        s.next();
        assert_eq!(s.state(), SlideshowState::Transitioning { from: 1, to: 2, progress: 0.0 });
        s.previous();
        assert_eq!(s.state(), SlideshowState::Transitioning { from: 2, to: 1, progress: 0.0 });
    }

    #[test]
    fn pause_freezes_the_timer_only() {
        let mut s = show(3);
        s.toggle_pause();
        assert_eq!(s.state(), SlideshowState::Paused { index: 0 });
        s.update(100.0);
        assert_eq!(s.state(), SlideshowState::Paused { index: 0 });

        s.next();
        assert!(matches!(s.state(), SlideshowState::Transitioning { from: 0, to: 1, .. }));
        s.update(1.0);
        assert_eq!(s.state(), SlideshowState::Paused { index: 1 });
        s.update(100.0);
        assert_eq!(s.state(), SlideshowState::Paused { index: 1 });
    }

    #[test]
    fn pause_during_fade_lets_it_finish() {
        let mut s = show(3);
        s.next();
        s.toggle_pause();
        s.update(1.0);
        assert_eq!(s.state(), SlideshowState::Paused { index: 1 });
    }

    #[test]
    fn resume_gives_a_full_display_period() {
        let mut s = show(3);
        s.update(9.0);
        s.toggle_pause();
        s.toggle_pause();
        s.update(9.0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 0 });
        s.update(1.0);
        assert!(matches!(s.state(), SlideshowState::Transitioning { .. }));
    }

    #[test]
    fn empty_show_ignores_everything() {
        let mut s = show(0);
        s.next();
        s.previous();
        s.toggle_pause();
        s.update(50.0);
        assert_eq!(s.state(), SlideshowState::Empty);
        assert_eq!(s.current(), None);
        assert_eq!(s.upcoming(), None);
        assert!(!s.is_paused());
    }

    #[test]
    fn single_image_never_fades() {
        let mut s = show(1);
        s.next();
        s.update(25.0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 0 });
        assert_eq!(s.upcoming(), None);
    }

    #[test]
    fn remove_before_current_shifts_index() {
        let mut s = show(4);
        s.next();
        s.update(1.0);
        s.next();
        s.update(1.0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 2 });
        s.remove(0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 1 });
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn remove_fade_target_skips_to_following_image() {
        let mut s = show(4);
        s.next();
        s.remove(1);
        assert!(matches!(s.state(), SlideshowState::Transitioning { from: 0, to: 1, .. }));

        let mut s = show(3);
        s.previous();
        s.remove(2);
        assert_eq!(s.state(), SlideshowState::Idle { index: 0 });
    }

    #[test]
    fn remove_current_last_wraps_to_first() {
        let mut s = show(3);
        s.previous();
        s.update(1.0);
        assert_eq!(s.state(), SlideshowState::Idle { index: 2 });
        s.remove(2);
        assert_eq!(s.state(), SlideshowState::Idle { index: 0 });
    }

    #[test]
    fn removing_the_last_image_empties_the_show() {
        let mut s = show(1);
        s.toggle_pause();
        s.remove(0);
        assert_eq!(s.state(), SlideshowState::Empty);
        s.remove(0);
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn easing_is_symmetric_and_bounded() {
        assert_eq!(ease_in_out_sine(0.0), 0.0);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_sine(0.25) + ease_in_out_sine(0.75) - 1.0).abs() < 1e-6);
        assert_eq!(ease_in_out_sine(-3.0), 0.0);
        assert!((ease_in_out_sine(7.0) - 1.0).abs() < 1e-6);
    }
}
