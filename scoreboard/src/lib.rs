#![no_std]

mod board;
mod button;
mod digit;
mod game;

pub use board::*;
pub use button::*;
pub use digit::*;
pub use game::*;

/// Pause inserted after every press edge, as a crude debounce.  The whole
/// control loop stalls here; nothing is sampled or refreshed until it ends.
const PRESS_PAUSE_MS: u64 = 200;

/// Continuous hold that fires the external reset line
const RESET_HOLD_MS: u64 = 3000;

/// Half-period of the winner blink: blank this long, then lit this long
const BLINK_HALF_PERIOD_MS: u64 = 500;

/// Per-player record: the score shown on that player's displays plus the
/// button tracking state
#[derive(Copy, Clone, Debug, Default)]
struct Player {
    score: Score,
    button: Button,
}

/// Controller for a two-player scoreboard built from four seven segment
/// displays and two push-buttons.
///
/// The controller is generalized over the [`Board`] (the 31 digital I/O
/// lines) and the [`Clock`] (timekeeping and the loop's blocking pauses).
/// This allows all of the control logic to remain the same across hardware
/// HALs, and lets host tests drive it with a mock board and a simulated
/// clock.
///
/// The most straightforward way to instantiate it is [`Self::builder`]; on
/// embassy targets that looks like:
///
/// ```ignore
/// let mut scoreboard = Scoreboard::builder()
///     .with_embassy_clock()
///     .with_board(GpioBoard::new(p1_pins, p2_pins, reset, Polarity::CommonAnode));
/// scoreboard.run().await?;
/// ```
///
/// Each [`Self::tick`] is one iteration of the control loop: refresh all four
/// displays, classify player one's button then player two's, then either
/// evaluate the win rule or blink the winner's score.  [`Self::run`] just
/// ticks forever.
pub struct Scoreboard<B, C> {
    board: B,
    clock: C,
    p1: Player,
    p2: Player,
    /// `None` until the win rule fires; encodes "no winner yet / player one
    /// won / player two won" as the only representable states.  Cleared only
    /// by the full reset.
    winner: Option<PlayerId>,
}

impl Scoreboard<(), ()> {
    /// Return a builder pattern implementation to ease some of the type
    /// parameter complexity around picking the clock and board.
    ///
    /// This is not required; [`Scoreboard::new`] works fine if you already
    /// have both values in hand.
    pub fn builder() -> ScoreboardBuilder {
        ScoreboardBuilder
    }
}

impl<B: Board, C: Clock> Scoreboard<B, C> {
    /// A fresh scoreboard: both scores zero, no winner, buttons idle —
    /// the power-on state.
    pub fn new(board: B, clock: C) -> Self {
        Self {
            board,
            clock,
            p1: Player::default(),
            p2: Player::default(),
            winner: None,
        }
    }

    /// Drive the control loop forever.
    ///
    /// Only a board I/O error gets out of here; on the `Infallible` GPIO
    /// implementations this genuinely never returns.
    pub async fn run(&mut self) -> Result<core::convert::Infallible, B::Error> {
        loop {
            self.tick().await?;
        }
    }

    /// One iteration of the control loop.
    ///
    /// Display refresh happens before button handling, button handling before
    /// win evaluation, and player one before player two wherever order could
    /// matter.  A tick may stall inside the clock for the debounce pause or
    /// the blink period.
    pub async fn tick(&mut self) -> Result<(), B::Error> {
        self.render_player(PlayerId::One)?;
        self.render_player(PlayerId::Two)?;

        self.service_button(PlayerId::One).await?;
        self.service_button(PlayerId::Two).await?;

        match self.winner {
            None => self.evaluate_win(),
            Some(id) => self.blink_winner(id).await?,
        }

        Ok(())
    }

    /// Redraw both of one player's digit displays from the current score.
    ///
    /// Level-driven, not edge-triggered: this runs every tick whether or not
    /// anything changed, and an out-of-range tens digit falls back to blank.
    fn render_player(&mut self, id: PlayerId) -> Result<(), B::Error> {
        let score = self.player(id).score;

        self.board
            .drive_digit(id, DigitPlace::Tens, digit_mask(score.tens()))?;
        self.board
            .drive_digit(id, DigitPlace::Ones, digit_mask(score.ones()))
    }

    /// Sample and classify one player's button, and apply whatever the event
    /// means: debounce pause on a press, reset on a long hold, a point on a
    /// release (unless the match is over).
    async fn service_button(&mut self, id: PlayerId) -> Result<(), B::Error> {
        let level = self.board.read_button(id)?;
        let now = self.clock.now_ms();

        match self.player_mut(id).button.update(level, now) {
            ButtonEvent::Pressed => {
                // Debounce: stall the whole loop so contact chatter is not
                // re-sampled as more presses
                self.clock.pause_ms(PRESS_PAUSE_MS).await;
            }
            ButtonEvent::Held { held_ms } if held_ms >= RESET_HOLD_MS => {
                #[cfg(feature = "defmt")]
                defmt::info!("{} held {=u64}ms, firing reset", id, held_ms);

                self.board.fire_reset()?;
                self.restart();
            }
            ButtonEvent::Released => {
                if self.winner.is_none() {
                    let player = self.player_mut(id);
                    player.score.increment();

                    #[cfg(feature = "defmt")]
                    defmt::debug!("{} scored, now at {=u8}", id, self.player(id).score.total());
                }
                // Releases after the match is decided still happen; they just
                // don't score
            }
            ButtonEvent::Idle | ButtonEvent::Held { .. } => {}
        }

        Ok(())
    }

    /// Apply the win rule to the current scores.  Runs only while no winner
    /// exists; once it fires, ticks blink instead of evaluating.
    fn evaluate_win(&mut self) {
        if let Some(id) = winner(self.p1.score, self.p2.score) {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "{} wins, {=u8} to {=u8}",
                id,
                self.player(id).score.total(),
                self.player(id.other()).score.total()
            );

            self.winner = Some(id);
        }
    }

    /// One blink cycle for the winner's pair of displays: blank, half a
    /// period dark, restore the score, half a period lit.
    ///
    /// The loser's displays are deliberately left alone — they keep whatever
    /// the top-of-tick refresh painted, i.e. the frozen final score.
    async fn blink_winner(&mut self, id: PlayerId) -> Result<(), B::Error> {
        self.board.drive_digit(id, DigitPlace::Tens, BLANK_MASK)?;
        self.board.drive_digit(id, DigitPlace::Ones, BLANK_MASK)?;
        self.clock.pause_ms(BLINK_HALF_PERIOD_MS).await;

        self.render_player(id)?;
        self.clock.pause_ms(BLINK_HALF_PERIOD_MS).await;

        Ok(())
    }

    /// Reinitialize everything to its power-on value.
    ///
    /// On wired hardware the reset line restarts the microcontroller and this
    /// is redundant; doing it in-process as well keeps the semantics intact
    /// on boards where the line goes nowhere.
    fn restart(&mut self) {
        self.p1 = Player::default();
        self.p2 = Player::default();
        self.winner = None;
    }

    fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.p1,
            PlayerId::Two => &self.p2,
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::One => &mut self.p1,
            PlayerId::Two => &mut self.p2,
        }
    }
}

pub struct ScoreboardBuilder;

impl ScoreboardBuilder {
    /// Use an arbitrary [`Clock`] implementation
    pub fn with_clock<C: Clock>(self, clock: C) -> ScoreboardBuilder1<C> {
        ScoreboardBuilder1 { clock }
    }

    #[cfg(feature = "embassy-time")]
    /// Use the [`Clock`] implementation built on `embassy-time`
    pub fn with_embassy_clock(self) -> ScoreboardBuilder1<EmbassyTimeClock> {
        self.with_clock(EmbassyTimeClock)
    }
}

pub struct ScoreboardBuilder1<C> {
    clock: C,
}

impl<C: Clock> ScoreboardBuilder1<C> {
    /// Finish with an arbitrary [`Board`] implementation; nothing more needs
    /// to be specified
    pub fn with_board<B: Board>(self, board: B) -> Scoreboard<B, C> {
        Scoreboard::new(board, self.clock)
    }
}
