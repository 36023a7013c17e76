//! Classify raw button levels into press, hold, and release events.

/// What one sample of a button's level means, given the previous sample.
///
/// The classifier is deliberately dumb about time: it reports how long a hold
/// has lasted, but the decision about what a long hold *means* (firing the
/// reset line) belongs to the control loop, as does the post-press debounce
/// pause.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Up, and was up on the previous sample
    Idle,
    /// Down for the first time; the press timestamp has just been latched
    Pressed,
    /// Still down.  `held_ms` is the time since the press edge.
    Held { held_ms: u64 },
    /// Up after being down
    Released,
}

/// Per-button tracking state: the current and previous raw levels (a one-step
/// history used to detect edges) and the timestamp of the current press.
///
/// `hold_start` is only meaningful while the button is down; it is latched on
/// every press edge.
#[derive(Copy, Clone, Debug, Default)]
pub struct Button {
    state: bool,
    prev_state: bool,
    hold_start: u64,
}

impl Button {
    pub const fn new() -> Self {
        Self {
            state: false,
            prev_state: false,
            hold_start: 0,
        }
    }

    /// Feed one raw sample into the classifier.
    ///
    /// `level` is the sampled input (true = pressed), `now_ms` the time of
    /// the sample in milliseconds.  Call exactly once per control loop
    /// iteration; the previous-state history advances on every call.
    pub fn update(&mut self, level: bool, now_ms: u64) -> ButtonEvent {
        self.state = level;

        let event = match (self.state, self.prev_state) {
            (true, false) => {
                self.hold_start = now_ms;
                ButtonEvent::Pressed
            }
            (true, true) => ButtonEvent::Held {
                held_ms: now_ms.saturating_sub(self.hold_start),
            },
            (false, true) => ButtonEvent::Released,
            (false, false) => ButtonEvent::Idle,
        };

        self.prev_state = self.state;
        event
    }
}
