use std::time::Duration;

use rand::Rng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::session::game::GameState;
use crate::session::input::AnswerInput;
use crate::session::problem::Operation;
use crate::session::result::GameSummary;
use crate::settings::Settings;
use crate::store::settings_store::SettingsStore;
use crate::timer::{Countdown, Scheduler, TimerHandle};
use crate::ui::components::menu::Menu;
use crate::ui::components::problem_card::Feedback;
use crate::ui::theme::Theme;

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Welcome,
    Settings,
    Game,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduledTask {
    CountdownTick,
    AdvanceAfterFeedback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Grade,
    Operations,
    Problems,
    Timer,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::Grade,
        SettingsField::Operations,
        SettingsField::Problems,
        SettingsField::Timer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Grade => "Grade Level",
            SettingsField::Operations => "Operations",
            SettingsField::Problems => "Number of Problems",
            SettingsField::Timer => "Time per Problem",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub settings_store: SettingsStore,
    pub game: GameState,
    pub input: AnswerInput,
    pub countdown: Countdown,
    pub feedback: Option<Feedback>,
    pub summary: Option<GameSummary>,
    pub settings_field: SettingsField,
    pub operation_cursor: usize,
    pub review_scroll: usize,
    review_visible: usize,
    pub celebration_frame: u64,
    pub celebration_seed: u64,
    pub status: Option<String>,
    pub should_quit: bool,
    scheduler: Scheduler<ScheduledTask>,
    countdown_handle: Option<TimerHandle>,
    feedback_handle: Option<TimerHandle>,
}

impl App {
    pub fn new(
        config: Config,
        theme: &'static Theme,
        settings_store: SettingsStore,
        mut rng: SmallRng,
    ) -> Self {
        let celebration_seed = rng.gen_range(0..u64::MAX);
        Self {
            screen: AppScreen::Welcome,
            config,
            theme,
            menu: Menu::new(theme),
            settings_store,
            game: GameState::new(rng),
            input: AnswerInput::new(),
            countdown: Countdown::new(0),
            feedback: None,
            summary: None,
            settings_field: SettingsField::Grade,
            operation_cursor: 0,
            review_scroll: 0,
            review_visible: 1,
            celebration_frame: 0,
            celebration_seed,
            status: None,
            should_quit: false,
            scheduler: Scheduler::new(),
            countdown_handle: None,
            feedback_handle: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings_store.settings()
    }

    /// Grade shown during a game: the one its problems were generated at.
    pub fn displayed_grade(&self) -> u8 {
        self.game.problem_grade()
    }

    /// True while the verdict for the last answer is on screen.
    pub fn is_input_locked(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn go_to_welcome(&mut self) {
        self.stop_timers();
        self.game.reset();
        self.input.clear();
        self.feedback = None;
        self.summary = None;
        self.status = None;
        self.screen = AppScreen::Welcome;
    }

    pub fn go_to_settings(&mut self) {
        self.stop_timers();
        self.game.reset();
        self.input.clear();
        self.feedback = None;
        self.summary = None;
        self.status = None;
        self.screen = AppScreen::Settings;
    }

    /// Starts a game from the stored settings. Refused when no operation
    /// is enabled.
    pub fn start_game(&mut self) -> bool {
        let settings = self.settings_store.settings().clone();
        if !settings.can_start() {
            self.status = Some("Pick at least one operation to start.".to_string());
            return false;
        }
        self.stop_timers();
        self.game.initialize(&settings);
        self.summary = None;
        self.status = None;
        self.screen = AppScreen::Game;
        self.begin_problem();
        true
    }

    fn begin_problem(&mut self) {
        self.input.clear();
        self.feedback = None;
        self.countdown
            .reset(self.game.settings().time_per_problem_secs);
        self.countdown.start();
        self.schedule_countdown_tick();
    }

    fn schedule_countdown_tick(&mut self) {
        if self.countdown.is_running() {
            self.countdown_handle = Some(
                self.scheduler
                    .schedule(COUNTDOWN_STEP, ScheduledTask::CountdownTick),
            );
        }
    }

    fn stop_timers(&mut self) {
        self.scheduler.cancel_all();
        self.countdown_handle = None;
        self.feedback_handle = None;
        self.countdown.pause();
    }

    /// Judges the typed answer and shows the verdict for the feedback delay.
    pub fn submit_answer(&mut self) {
        if self.screen != AppScreen::Game || self.is_input_locked() {
            return;
        }
        if let Some(handle) = self.countdown_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.countdown.pause();

        let Some(correct) = self.game.submit_answer(self.input.value()) else {
            return;
        };
        self.feedback = Some(Feedback::from_verdict(correct));
        self.feedback_handle = Some(self.scheduler.schedule(
            self.config.feedback_delay(),
            ScheduledTask::AdvanceAfterFeedback,
        ));
    }

    /// Advances the app clock by `elapsed` and runs whatever fell due.
    pub fn tick(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.deadline(elapsed);
        while let Some(task) = self.scheduler.pop_due(deadline) {
            match task {
                ScheduledTask::CountdownTick => {
                    self.countdown_handle = None;
                    if self.countdown.tick() {
                        info!(index = self.game.current_index(), "time ran out");
                        self.submit_answer();
                    } else {
                        self.schedule_countdown_tick();
                    }
                }
                ScheduledTask::AdvanceAfterFeedback => {
                    self.feedback_handle = None;
                    self.advance();
                }
            }
        }
        self.scheduler.settle(deadline);

        if self.screen == AppScreen::Results
            && self.summary.as_ref().is_some_and(|s| s.celebrate)
        {
            self.celebration_frame = self.celebration_frame.wrapping_add(1);
        }
    }

    fn advance(&mut self) {
        self.feedback = None;
        self.game.next_problem();
        if self.game.is_over() {
            self.show_results();
        } else {
            self.begin_problem();
        }
    }

    /// Ends the game early. Unanswered problems count as wrong in the review.
    pub fn quit_game(&mut self) {
        if self.screen != AppScreen::Game {
            return;
        }
        self.stop_timers();
        self.feedback = None;
        self.game.end_game();
        self.show_results();
    }

    pub fn show_results(&mut self) {
        self.stop_timers();
        match GameSummary::from_game(&self.game, self.config.celebration_threshold) {
            Some(summary) => {
                info!(
                    percentage = summary.score.percentage,
                    grade = %summary.grade,
                    "showing results"
                );
                self.summary = Some(summary);
                self.review_scroll = 0;
                self.celebration_frame = 0;
                self.screen = AppScreen::Results;
            }
            None => {
                debug!("no game to summarize");
                self.go_to_welcome();
            }
        }
    }

    /// A fresh game from whatever the settings store holds now. Difficulty
    /// changes made during the last game are not carried over.
    pub fn play_again(&mut self) {
        self.game.reset();
        self.input.clear();
        if !self.start_game() {
            self.go_to_settings();
        }
    }

    pub fn change_settings(&mut self) {
        self.go_to_settings();
    }

    /// Records how many review rows fit on screen, keeping the scroll
    /// position within the last full page.
    pub fn set_review_viewport(&mut self, visible: usize) {
        self.review_visible = visible.max(1);
        self.review_scroll = self.review_scroll.min(self.max_review_scroll());
    }

    fn max_review_scroll(&self) -> usize {
        self.summary
            .as_ref()
            .map_or(0, |s| s.rows.len().saturating_sub(self.review_visible))
    }

    pub fn scroll_review_down(&mut self) {
        if self.review_scroll < self.max_review_scroll() {
            self.review_scroll += 1;
        }
    }

    pub fn scroll_review_up(&mut self) {
        self.review_scroll = self.review_scroll.saturating_sub(1);
    }

    fn update_settings<F>(&mut self, change: F)
    where
        F: FnOnce(&mut Settings),
    {
        // The change still applies for this run when the save fails.
        if let Err(err) = self.settings_store.update(change) {
            warn!(error = %err, "failed to save settings");
        }
        self.status = None;
    }

    pub fn settings_next_field(&mut self) {
        self.settings_field = self.settings_field.next();
    }

    pub fn settings_prev_field(&mut self) {
        self.settings_field = self.settings_field.prev();
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_field {
            SettingsField::Grade => self.update_settings(Settings::next_grade),
            SettingsField::Operations => {
                self.operation_cursor = (self.operation_cursor + 1) % Operation::ALL.len();
            }
            SettingsField::Problems => self.update_settings(Settings::more_problems),
            SettingsField::Timer => self.update_settings(Settings::more_time),
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_field {
            SettingsField::Grade => self.update_settings(Settings::prev_grade),
            SettingsField::Operations => {
                self.operation_cursor = if self.operation_cursor == 0 {
                    Operation::ALL.len() - 1
                } else {
                    self.operation_cursor - 1
                };
            }
            SettingsField::Problems => self.update_settings(Settings::fewer_problems),
            SettingsField::Timer => self.update_settings(Settings::less_time),
        }
    }

    pub fn toggle_operation(&mut self, op: Operation) {
        self.update_settings(|s| s.operations.toggle(op));
    }

    pub fn toggle_operation_at_cursor(&mut self) {
        if let Some(op) = Operation::ALL.get(self.operation_cursor).copied() {
            self.toggle_operation(op);
        }
    }

    fn accepts_input(&self) -> bool {
        self.screen == AppScreen::Game && !self.is_input_locked()
    }

    pub fn type_digit(&mut self, digit: char) {
        if self.accepts_input() {
            self.input.push_digit(digit);
        }
    }

    pub fn type_decimal_point(&mut self) {
        if self.accepts_input() {
            self.input.push_decimal_point();
        }
    }

    pub fn toggle_sign(&mut self) {
        if self.accepts_input() {
            self.input.toggle_sign();
        }
    }

    pub fn backspace(&mut self) {
        if self.accepts_input() {
            self.input.backspace();
        }
    }

    pub fn clear_input(&mut self) {
        if self.accepts_input() {
            self.input.clear();
        }
    }
}
