//! Core data models for Clean Water Catch.
//! Difficulty table, milestones, drops and the round reducer driven by the
//! timer, spawner, fall loop and clicks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use yew::Reducible;

use crate::audio::Cue;
use crate::error::GameError;

/// Points awarded for catching a clean drop.
pub const CLEAN_POINTS: i32 = 10;
/// Points lost for catching a polluted drop.
pub const POLLUTED_PENALTY: i32 = 15;
/// Drops enter just above the visible area.
pub const DROP_START_Y: f64 = -60.0;
/// Rendered drop width/height in px.
pub const DROP_SIZE_PX: f64 = 48.0;
pub const TIMER_TICK_MS: u32 = 1000;
pub const FALL_TICK_MS: u32 = 20;
pub const FLY_TEXT_MS: u64 = 650;
pub const SPLASH_MS: u64 = 460;

// ---------------- Difficulty -----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Easy,
    #[default]
    Normal,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    /// Round length in seconds.
    pub duration_secs: u32,
    pub spawn_interval_ms: u32,
    /// Fall speed range in px per fall tick.
    pub min_speed: f64,
    pub max_speed: f64,
    /// Probability that a spawned drop is polluted.
    pub polluted_fraction: f64,
    pub win_score: i32,
}

const EASY: DifficultyProfile = DifficultyProfile {
    duration_secs: 45,
    spawn_interval_ms: 900,
    min_speed: 1.6,
    max_speed: 2.6,
    polluted_fraction: 0.25,
    win_score: 120,
};
const NORMAL: DifficultyProfile = DifficultyProfile {
    duration_secs: 30,
    spawn_interval_ms: 800,
    min_speed: 2.0,
    max_speed: 3.2,
    polluted_fraction: 0.30,
    win_score: 150,
};
const HARD: DifficultyProfile = DifficultyProfile {
    duration_secs: 20,
    spawn_interval_ms: 650,
    min_speed: 2.6,
    max_speed: 4.0,
    polluted_fraction: 0.45,
    win_score: 180,
};

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Easy, Mode::Normal, Mode::Hard];

    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Mode::Easy => &EASY,
            Mode::Normal => &NORMAL,
            Mode::Hard => &HARD,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Normal => "normal",
            Mode::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Easy => "Easy",
            Mode::Normal => "Normal",
            Mode::Hard => "Hard",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Mode::Easy),
            "normal" => Ok(Mode::Normal),
            "hard" => Ok(Mode::Hard),
            other => Err(GameError::UnknownMode(other.to_owned())),
        }
    }
}

// ---------------- Milestones -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: i32,
    pub message: &'static str,
}

/// Ascending by threshold; the notifier relies on this order.
pub const MILESTONES: &[Milestone] = &[
    Milestone { threshold: 50, message: "💧 771 million people lack access to clean water." },
    Milestone { threshold: 100, message: "🚰 charity: water brings clean water to communities worldwide." },
    Milestone { threshold: 150, message: "🌍 Clean water transforms health, education, and opportunity." },
    Milestone { threshold: 200, message: "🧒 Time saved from collecting water helps kids stay in school." },
];

// ---------------- Entities & feedback -----------------

#[derive(Clone, Debug, PartialEq)]
pub struct WaterDrop {
    pub id: u64,
    pub polluted: bool,
    /// Horizontal position as a fraction of the free area width (0..1).
    pub x_frac: f64,
    /// Top offset in px from the top of the play area.
    pub y: f64,
    /// px per fall tick, fixed at spawn.
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Info,
    Good,
    Bad,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Info => "#2E9DF7",
            Tone::Good => "#159A48",
            Tone::Bad => "#F5402C",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Banner {
    pub text: String,
    pub tone: Tone,
}

impl Banner {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedbackKind {
    FlyText { text: String, tone: Tone },
    Splash,
}

/// Transient click feedback anchored at viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub id: u64,
    pub kind: FeedbackKind,
    pub x: f64,
    pub y: f64,
    pub expires_at_ms: u64,
}

/// What a scored click did; returned so callers (and tests) can inspect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub delta: i32,
    pub milestone: Option<i32>,
    pub won: bool,
}

// ---------------- Round state -----------------

#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    /// Mode chosen in the selector; becomes `mode` on the next start.
    pub selected_mode: Mode,
    /// Mode the current (or last) round uses.
    pub mode: Mode,
    pub score: i32,
    pub time_left: u32,
    pub active: bool,
    pub shown_milestones: BTreeSet<i32>,
    pub drops: Vec<WaterDrop>,
    pub feedback: Vec<Feedback>,
    pub banner: Banner,
    /// Win celebration already fired this round.
    pub celebrated: bool,
    /// Bumped on every start; lets effects tell rounds apart.
    pub round_id: u32,
    /// Bumped whenever `pending_cues` is replaced.
    pub cue_seq: u32,
    pub pending_cues: Vec<Cue>,
    /// Fall-loop clock, used to expire transient feedback.
    pub clock_ms: u64,
    next_id: u64,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl RoundState {
    pub fn new(mode: Mode) -> Self {
        Self {
            selected_mode: mode,
            mode,
            score: 0,
            time_left: mode.profile().duration_secs,
            active: false,
            shown_milestones: BTreeSet::new(),
            drops: Vec::new(),
            feedback: Vec::new(),
            banner: Banner::default(),
            celebrated: false,
            round_id: 0,
            cue_seq: 0,
            pending_cues: Vec::new(),
            clock_ms: 0,
            next_id: 1,
        }
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.mode.profile()
    }

    fn apply_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.time_left = mode.profile().duration_secs;
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn emit(&mut self, cues: Vec<Cue>) {
        self.pending_cues = cues;
        self.cue_seq = self.cue_seq.wrapping_add(1);
    }

    /// Changes the selector; takes effect now when idle, else on the next start.
    pub fn select_mode(&mut self, mode: Mode) {
        self.selected_mode = mode;
        if !self.active {
            self.apply_mode(mode);
        }
    }

    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.shown_milestones.clear();
        self.active = true;
        self.score = 0;
        self.apply_mode(self.selected_mode);
        self.banner = Banner::default();
        self.drops.clear();
        self.feedback.clear();
        self.celebrated = false;
        self.round_id = self.round_id.wrapping_add(1);
        log::info!("round {} started ({})", self.round_id, self.mode);
    }

    fn end(&mut self, show_final: bool) {
        self.active = false;
        self.drops.clear();
        self.feedback.clear();
        if show_final {
            self.banner = Banner::new(format!("Time’s up! Final Score: {}", self.score), Tone::Info);
        }
        log::info!("round {} ended with score {}", self.round_id, self.score);
    }

    pub fn reset(&mut self) {
        if self.active {
            self.end(false);
        }
        self.score = 0;
        self.apply_mode(self.selected_mode);
        self.banner = Banner::default();
        self.drops.clear();
    }

    /// One countdown second. The round ends on the tick that reaches zero.
    pub fn tick_second(&mut self) {
        if !self.active {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end(true);
        }
    }

    /// Spawns one drop from three uniform rolls in `[0, 1)`.
    pub fn spawn(&mut self, kind_roll: f64, speed_roll: f64, x_roll: f64) -> Option<u64> {
        if !self.active {
            return None;
        }
        let cfg = self.profile();
        let polluted = kind_roll >= 1.0 - cfg.polluted_fraction;
        let speed = cfg.min_speed + speed_roll * (cfg.max_speed - cfg.min_speed);
        let id = self.alloc_id();
        self.drops.push(WaterDrop {
            id,
            polluted,
            x_frac: x_roll.clamp(0.0, 1.0),
            y: DROP_START_Y,
            speed,
        });
        log::trace!("spawned drop {} polluted={} speed={:.2}", id, polluted, speed);
        Some(id)
    }

    /// One fall-loop frame: moves drops, drops what left the area, expires feedback.
    pub fn advance(&mut self, area_height: f64) {
        self.clock_ms = self.clock_ms.saturating_add(FALL_TICK_MS as u64);
        let now = self.clock_ms;
        self.feedback.retain(|f| f.expires_at_ms > now);
        if !self.active {
            self.drops.clear();
            return;
        }
        for d in self.drops.iter_mut() {
            d.y += d.speed;
        }
        self.drops.retain(|d| d.y <= area_height);
    }

    /// Scores a click on drop `id` whose centre is at viewport `(x, y)`.
    /// Returns `None` when the round is over or the drop is already gone.
    pub fn click(&mut self, id: u64, x: f64, y: f64) -> Option<ClickOutcome> {
        if !self.active {
            return None;
        }
        let idx = self.drops.iter().position(|d| d.id == id)?;
        let caught = self.drops.remove(idx);

        let (delta, text, banner, tone, cue) = if caught.polluted {
            (-POLLUTED_PENALTY, "-15", "-15 Polluted Drop!", Tone::Bad, Cue::Fail)
        } else {
            (CLEAN_POINTS, "+10", "+10 Clean Water!", Tone::Good, Cue::Success)
        };
        self.score += delta;
        self.banner = Banner::new(banner, tone);
        let fly_id = self.alloc_id();
        let splash_id = self.alloc_id();
        let now = self.clock_ms;
        self.feedback.push(Feedback {
            id: fly_id,
            kind: FeedbackKind::FlyText { text: text.to_owned(), tone },
            x,
            y,
            expires_at_ms: now + FLY_TEXT_MS,
        });
        self.feedback.push(Feedback {
            id: splash_id,
            kind: FeedbackKind::Splash,
            x,
            y,
            expires_at_ms: now + SPLASH_MS,
        });

        let mut cues = vec![cue];
        let milestone = self.check_milestones();
        let won = self.check_win();
        if won {
            cues.push(Cue::Win);
        }
        self.emit(cues);
        Some(ClickOutcome { delta, milestone, won })
    }

    /// Shows the lowest unshown milestone the score has reached, at most one per call.
    fn check_milestones(&mut self) -> Option<i32> {
        let m = MILESTONES
            .iter()
            .find(|m| self.score >= m.threshold && !self.shown_milestones.contains(&m.threshold))?;
        self.shown_milestones.insert(m.threshold);
        self.banner = Banner::new(m.message, Tone::Info);
        log::debug!("milestone {} reached", m.threshold);
        Some(m.threshold)
    }

    fn check_win(&mut self) -> bool {
        let win = self.profile().win_score;
        if !self.active || self.celebrated || self.score < win {
            return false;
        }
        self.celebrated = true;
        self.banner = Banner::new(format!("You reached {}! 🎉", win), Tone::Good);
        log::info!("win threshold {} reached in round {}", win, self.round_id);
        true
    }

    /// Confetti should be on screen.
    pub fn celebrating(&self) -> bool {
        self.active && self.celebrated
    }
}

// ---------------- Reducer & Actions -----------------

#[derive(Clone, Debug)]
pub enum RoundAction {
    SelectMode(Mode),
    Start,
    Reset,
    TickSecond,
    Spawn { kind_roll: f64, speed_roll: f64, x_roll: f64 },
    Fall { area_height: f64 },
    Click { id: u64, x: f64, y: f64 },
}

impl Reducible for RoundState {
    type Action = RoundAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use RoundAction::*;
        if !self.active && matches!(action, TickSecond | Spawn { .. } | Click { .. }) {
            return self;
        }
        let mut new = (*self).clone();
        match action {
            SelectMode(mode) => new.select_mode(mode),
            Start => new.start(),
            Reset => new.reset(),
            TickSecond => new.tick_second(),
            Spawn { kind_roll, speed_roll, x_roll } => {
                new.spawn(kind_roll, speed_roll, x_roll);
            }
            Fall { area_height } => {
                if !self.active && self.drops.is_empty() && self.feedback.is_empty() {
                    return self;
                }
                new.advance(area_height);
            }
            Click { id, x, y } => {
                if new.click(id, x, y).is_none() {
                    return self;
                }
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(mode: Mode) -> RoundState {
        let mut rs = RoundState::new(mode);
        rs.start();
        rs
    }

    fn spawn_clean(rs: &mut RoundState) -> u64 {
        rs.spawn(0.0, 0.5, 0.5).unwrap()
    }

    fn spawn_polluted(rs: &mut RoundState) -> u64 {
        rs.spawn(0.999, 0.5, 0.5).unwrap()
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Mode>().unwrap(), Mode::Hard);
        assert_eq!(" easy ".parse::<Mode>().unwrap(), Mode::Easy);
        assert!(matches!("extreme".parse::<Mode>(), Err(GameError::UnknownMode(m)) if m == "extreme"));
    }

    #[test]
    fn milestones_are_ascending() {
        assert!(MILESTONES.windows(2).all(|w| w[0].threshold < w[1].threshold));
    }

    #[test]
    fn clean_click_adds_ten_polluted_subtracts_fifteen() {
        let mut rs = active(Mode::Normal);
        let a = spawn_clean(&mut rs);
        let b = spawn_polluted(&mut rs);
        assert_eq!(rs.click(a, 0.0, 0.0).unwrap().delta, 10);
        assert_eq!(rs.score, 10);
        assert_eq!(rs.banner.tone, Tone::Good);
        assert_eq!(rs.click(b, 0.0, 0.0).unwrap().delta, -15);
        assert_eq!(rs.score, -5);
        assert_eq!(rs.banner.text, "-15 Polluted Drop!");
        assert_eq!(rs.pending_cues, vec![Cue::Fail]);
    }

    #[test]
    fn drop_scores_only_once() {
        let mut rs = active(Mode::Normal);
        let id = spawn_clean(&mut rs);
        assert!(rs.click(id, 0.0, 0.0).is_some());
        assert!(rs.click(id, 0.0, 0.0).is_none());
        assert_eq!(rs.score, 10);
        assert!(rs.drops.is_empty());
    }

    #[test]
    fn timer_ends_round_after_duration_ticks() {
        let mut rs = active(Mode::Hard);
        for _ in 0..19 {
            rs.tick_second();
        }
        assert!(rs.active);
        assert_eq!(rs.time_left, 1);
        rs.tick_second();
        assert!(!rs.active);
        assert_eq!(rs.time_left, 0);
        assert_eq!(rs.banner.text, "Time’s up! Final Score: 0");
    }

    #[test]
    fn milestone_fires_once_even_when_score_dips_and_returns() {
        let mut rs = active(Mode::Easy);
        for _ in 0..5 {
            let id = spawn_clean(&mut rs);
            rs.click(id, 0.0, 0.0);
        }
        assert_eq!(rs.banner.text, MILESTONES[0].message);
        let p = spawn_polluted(&mut rs);
        rs.click(p, 0.0, 0.0);
        let mut seen = 0;
        for _ in 0..2 {
            let id = spawn_clean(&mut rs);
            if rs.click(id, 0.0, 0.0).unwrap().milestone.is_some() {
                seen += 1;
            }
        }
        assert_eq!(seen, 0);
        assert_eq!(rs.shown_milestones.len(), 1);
    }

    #[test]
    fn win_fires_once_per_round() {
        let mut rs = active(Mode::Easy);
        let mut wins = 0;
        for _ in 0..20 {
            let id = spawn_clean(&mut rs);
            if rs.click(id, 0.0, 0.0).unwrap().won {
                wins += 1;
                assert_eq!(rs.score, 120);
                assert_eq!(rs.pending_cues, vec![Cue::Success, Cue::Win]);
            }
        }
        assert_eq!(wins, 1);
        assert!(rs.celebrating());
    }

    #[test]
    fn reset_clears_score_and_drops() {
        let mut rs = active(Mode::Normal);
        let id = spawn_clean(&mut rs);
        rs.click(id, 0.0, 0.0);
        spawn_clean(&mut rs);
        spawn_polluted(&mut rs);
        rs.reset();
        assert!(!rs.active);
        assert_eq!(rs.score, 0);
        assert!(rs.drops.is_empty());
        assert!(rs.banner.text.is_empty());
        assert_eq!(rs.time_left, 30);
    }

    #[test]
    fn mode_change_waits_for_next_round_while_active() {
        let mut rs = active(Mode::Normal);
        rs.tick_second();
        rs.select_mode(Mode::Easy);
        assert_eq!(rs.mode, Mode::Normal);
        assert_eq!(rs.time_left, 29);
        rs.reset();
        assert_eq!(rs.mode, Mode::Easy);
        assert_eq!(rs.time_left, 45);
        rs.select_mode(Mode::Hard);
        assert_eq!(rs.time_left, 20);
    }

    #[test]
    fn drops_fall_and_leave_the_area() {
        let mut rs = active(Mode::Normal);
        let id = rs.spawn(0.0, 0.0, 0.2).unwrap();
        rs.advance(100.0);
        assert_eq!(rs.drops[0].y, DROP_START_Y + 2.0);
        for _ in 0..80 {
            rs.advance(100.0);
        }
        assert!(rs.drops.iter().all(|d| d.id != id));
    }

    #[test]
    fn feedback_expires_on_the_fall_clock() {
        let mut rs = active(Mode::Normal);
        let id = spawn_clean(&mut rs);
        rs.click(id, 10.0, 20.0);
        assert_eq!(rs.feedback.len(), 2);
        for _ in 0..(SPLASH_MS / FALL_TICK_MS as u64) {
            rs.advance(500.0);
        }
        assert_eq!(rs.feedback.len(), 1);
        for _ in 0..(FLY_TEXT_MS / FALL_TICK_MS as u64) {
            rs.advance(500.0);
        }
        assert!(rs.feedback.is_empty());
    }

    #[test]
    fn inactive_round_ignores_spawns_and_clicks() {
        let mut rs = RoundState::new(Mode::Normal);
        assert!(rs.spawn(0.0, 0.0, 0.0).is_none());
        assert!(rs.click(1, 0.0, 0.0).is_none());
        let rc = Rc::new(rs.clone());
        let after = rc.clone().reduce(RoundAction::TickSecond);
        assert!(Rc::ptr_eq(&rc, &after));
    }

    #[test]
    fn reducer_scores_a_drop_once() {
        let rc = Rc::new(RoundState::new(Mode::Normal)).reduce(RoundAction::Start);
        let rc = rc.reduce(RoundAction::Spawn { kind_roll: 0.0, speed_roll: 0.5, x_roll: 0.5 });
        let id = rc.drops[0].id;
        let first = rc.reduce(RoundAction::Click { id, x: 0.0, y: 0.0 });
        assert_eq!(first.score, CLEAN_POINTS);
        let second = first.clone().reduce(RoundAction::Click { id, x: 0.0, y: 0.0 });
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second.score, CLEAN_POINTS);
    }

    #[test]
    fn reducer_skips_idle_fall_with_nothing_on_screen() {
        let rc = Rc::new(RoundState::new(Mode::Easy));
        let after = rc.clone().reduce(RoundAction::Fall { area_height: 400.0 });
        assert!(Rc::ptr_eq(&rc, &after));
        assert_eq!(after.clock_ms, 0);
    }

    #[test]
    fn start_is_ignored_while_active() {
        let mut rs = active(Mode::Normal);
        let id = spawn_clean(&mut rs);
        rs.click(id, 0.0, 0.0);
        let round = rs.round_id;
        rs.start();
        assert_eq!(rs.round_id, round);
        assert_eq!(rs.score, 10);
    }
}
