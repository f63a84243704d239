//! Main loop. Paces logic and rendering, dispatches to the active mode and
//! applies deferred mode transitions.
//!
//! Logic runs on a fixed 16 ms step; rendering is capped at one frame per
//! 5 ms. Both thresholds are checked independently against the same tick
//! reading each iteration. Logic always precedes render, and a requested
//! transition is applied only after that iteration's render.

use crate::clock::TickSource;
use crate::config::ConfigService;
use crate::display::{DisplayService, TextRenderer};
use crate::fps;
use crate::input::{InputService, KeyInput};
use crate::keys::{KeyBindings, KeyboardControllerConfig};
use crate::mode::{Mode, ModeFactory, RenderContext, UpdateContext};
use crate::transition::Transition;
use panelpop_core::{Color, Player, Result};
use tracing::{debug, info};
use winit::keyboard::KeyCode;

/// Fixed logic step, ~62.5 Hz
pub const LOGIC_STEP_MS: u64 = 16;

/// Minimum time between rendered frames, a 200 fps cap
pub const RENDER_INTERVAL_MS: u64 = 5;

/// Overlay text colour and the box drawn behind it
const FPS_TEXT: Color = Color::BLACK;
const FPS_BACKING: Color = Color::WHITE;
const FPS_PADDING: u32 = 2;

/// Either Alt key, for the fullscreen hotkey
pub const ALT_KEYS: [KeyCode; 2] = [KeyCode::AltLeft, KeyCode::AltRight];
pub const CTRL_KEYS: [KeyCode; 2] = [KeyCode::ControlLeft, KeyCode::ControlRight];

/// The services the loop drives, constructed once at process start
pub struct AppContext<I, D> {
    pub input: I,
    pub display: D,
    pub config: Box<dyn ConfigService>,
    pub clock: Box<dyn TickSource>,
}

impl<I: InputService, D: DisplayService> AppContext<I, D> {
    pub fn new(
        input: I,
        display: D,
        config: Box<dyn ConfigService>,
        clock: Box<dyn TickSource>,
    ) -> Self {
        Self {
            input,
            display,
            config,
            clock,
        }
    }
}

/// What one loop iteration did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub logic: bool,
    pub rendered: bool,
    pub transitioned: bool,
    pub quit: bool,
}

/// Owns the active mode and drives the application
pub struct Orchestrator<I, D> {
    context: AppContext<I, D>,
    factory: Box<dyn ModeFactory>,
    active: Box<dyn Mode>,
    transition: Transition,
    keys: KeyBindings,

    last_logic_ms: u64,
    last_render_ms: u64,
    start_ms: u64,
    running: bool,

    frames_rendered: u64,
    avg_fps: f64,
    show_fps: bool,
}

impl<I: InputService, D: DisplayService> Orchestrator<I, D> {
    /// Load both players' bindings and activate the title mode
    pub fn new(context: AppContext<I, D>, factory: Box<dyn ModeFactory>) -> Self {
        let keys = KeyBindings {
            player1: context.config.key_config(Player::One),
            player2: context.config.key_config(Player::Two),
        };
        let start_ms = context.clock.now_ms();
        let active = factory.title();

        Self {
            context,
            factory,
            active,
            transition: Transition::new(),
            keys,
            last_logic_ms: 0,
            last_render_ms: 0,
            start_ms,
            running: true,
            frames_rendered: 0,
            avg_fps: 0.0,
            show_fps: false,
        }
    }

    /// Drive the application until the input service reports quit
    pub fn run(&mut self) {
        info!("main loop started");
        while self.running {
            let report = self.step();
            if !report.logic && !report.rendered && !report.quit {
                std::thread::yield_now();
            }
        }
        info!(frames = self.frames_rendered, "main loop stopped");
    }

    /// Run exactly one loop iteration
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        if !self.running {
            report.quit = true;
            return report;
        }

        let now = self.context.clock.now_ms();
        let logic_due = now.saturating_sub(self.last_logic_ms) >= LOGIC_STEP_MS;
        let render_due = now.saturating_sub(self.last_render_ms) >= RENDER_INTERVAL_MS;

        if logic_due {
            self.context.input.poll();
            if self.context.input.quit_requested() {
                self.running = false;
                if self.transition.discard() {
                    debug!("dropped pending mode on quit");
                }
                report.quit = true;
                return report;
            }
            self.handle_global_hotkeys();
            self.dispatch_update(now);
            self.last_logic_ms = now;
            report.logic = true;
        }

        if render_due {
            self.render_frame(now);
            self.last_render_ms = now;
            report.rendered = true;
        }

        if let Some(next) = self.transition.take() {
            let previous = std::mem::replace(&mut self.active, next);
            drop(previous);
            debug!("mode transition applied");
            report.transitioned = true;
        }

        report
    }

    fn handle_global_hotkeys(&mut self) {
        let input = &self.context.input;
        if input.is_any_down(&ALT_KEYS) && input.is_key_just_pressed(KeyCode::Enter) {
            self.context.display.toggle_fullscreen();
            debug!(fullscreen = self.context.display.is_fullscreen(), "toggled fullscreen");
        }
        let input = &self.context.input;
        if input.is_any_down(&CTRL_KEYS) && input.is_key_just_pressed(KeyCode::KeyF) {
            self.show_fps = !self.show_fps;
            debug!(show_fps = self.show_fps, "toggled fps overlay");
        }
    }

    fn dispatch_update(&mut self, now: u64) {
        let mut ctx = UpdateContext::new(
            &self.context.input,
            &mut self.transition,
            &*self.factory,
            &mut self.keys,
            &mut *self.context.config,
            now,
        );
        self.active.update(&mut ctx);
    }

    fn render_frame(&mut self, now: u64) {
        let canvas = {
            let mut ctx = RenderContext::new(&self.context.input, &mut self.context.display, now);
            self.active.render(&mut ctx)
        };

        if self.show_fps {
            let seconds = now.saturating_sub(self.start_ms) as f64 / 1000.0;
            self.avg_fps = fps::average_fps(self.frames_rendered, seconds);
            let text = fps::format_significant(self.avg_fps, fps::FPS_DIGITS);
            let display = &mut self.context.display;
            let (width, height) = display.text_size(&text);
            if width > 0 && height > 0 {
                canvas.fill_rect(0, 0, width + 2 * FPS_PADDING, height, FPS_BACKING);
            }
            display.draw_text(canvas, &text, 0, 0, FPS_TEXT);
        }

        self.context.display.present(canvas);
        self.frames_rendered += 1;
    }

    /// Replace the active mode at the end of the current iteration
    pub fn switch_to_state(&mut self, mode: Box<dyn Mode>) {
        self.transition.request(mode);
    }

    pub fn start_game(&mut self) {
        let mode = self.factory.gameplay();
        self.switch_to_state(mode);
    }

    pub fn return_to_title(&mut self) {
        let mode = self.factory.title();
        self.switch_to_state(mode);
    }

    /// Last computed average, 0 until the overlay has been shown
    pub fn avg_fps(&self) -> f64 {
        self.avg_fps
    }

    pub fn p1_keys(&self) -> &KeyboardControllerConfig {
        &self.keys.player1
    }

    pub fn set_p1_keys(&mut self, config: KeyboardControllerConfig) {
        self.keys.player1 = config;
    }

    pub fn p2_keys(&self) -> &KeyboardControllerConfig {
        &self.keys.player2
    }

    pub fn set_p2_keys(&mut self, config: KeyboardControllerConfig) {
        self.keys.player2 = config;
    }

    pub fn key_config(&self, player: Player) -> &KeyboardControllerConfig {
        self.keys.get(player)
    }

    pub fn set_key_config(&mut self, player: Player, config: KeyboardControllerConfig) {
        self.keys.set(player, config);
    }

    /// Persist both players' bindings through the config service
    pub fn save_key_configs(&mut self) -> Result<()> {
        self.context.config.store_key_configs(&self.keys)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn has_pending_transition(&self) -> bool {
        self.transition.is_requested()
    }

    pub fn context(&self) -> &AppContext<I, D> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext<I, D> {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::clock::ManualClock;
    use crate::config::InMemoryConfig;
    use crate::input::KeyboardState;
    use crate::keys::KeyAction;
    use std::cell::RefCell;
    use std::rc::Rc;

    // --- Fakes ---

    /// Input whose next poll applies queued key events
    #[derive(Default)]
    struct ScriptedInput {
        keyboard: KeyboardState,
        queued: Vec<(KeyCode, bool)>,
        quit_on_next_poll: bool,
        quit: bool,
        polls: usize,
    }

    impl ScriptedInput {
        fn press(&mut self, key: KeyCode) {
            self.queued.push((key, true));
        }

        fn release(&mut self, key: KeyCode) {
            self.queued.push((key, false));
        }
    }

    impl KeyInput for ScriptedInput {
        fn is_key_down(&self, key: KeyCode) -> bool {
            self.keyboard.is_key_down(key)
        }

        fn is_key_just_pressed(&self, key: KeyCode) -> bool {
            self.keyboard.is_key_just_pressed(key)
        }
    }

    impl InputService for ScriptedInput {
        fn poll(&mut self) {
            self.polls += 1;
            self.keyboard.begin_poll();
            for (key, down) in self.queued.drain(..) {
                if down {
                    self.keyboard.process_key_down(key);
                } else {
                    self.keyboard.process_key_up(key);
                }
            }
            if self.quit_on_next_poll {
                self.quit = true;
            }
        }

        fn quit_requested(&self) -> bool {
            self.quit
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct DrawnText {
        text: String,
        x: i32,
        y: i32,
        color: Color,
    }

    /// Fixed 8x10 cell per character
    #[derive(Default)]
    struct RecordingDisplay {
        presents: usize,
        fullscreen: bool,
        fullscreen_toggles: usize,
        drawn: Vec<DrawnText>,
        /// Top-left pixel of each presented canvas
        presented_origin: Vec<Option<Color>>,
    }

    impl RecordingDisplay {
        fn texts(&self) -> Vec<&str> {
            self.drawn.iter().map(|d| d.text.as_str()).collect()
        }
    }

    impl TextRenderer for RecordingDisplay {
        fn draw_text(&mut self, _canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
            self.drawn.push(DrawnText {
                text: text.to_string(),
                x,
                y,
                color,
            });
        }

        fn text_size(&mut self, text: &str) -> (u32, u32) {
            (8 * text.chars().count() as u32, 10)
        }
    }

    impl DisplayService for RecordingDisplay {
        fn toggle_fullscreen(&mut self) {
            self.fullscreen = !self.fullscreen;
            self.fullscreen_toggles += 1;
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }

        fn present(&mut self, canvas: &Canvas) {
            self.presents += 1;
            self.presented_origin.push(canvas.pixel(0, 0));
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Update(&'static str, u64),
        Render(&'static str, u64),
    }

    type Log = Rc<RefCell<Vec<Event>>>;
    type OnUpdate = Box<dyn FnMut(&mut UpdateContext<'_>)>;

    struct RecordingMode {
        name: &'static str,
        log: Log,
        on_update: Option<OnUpdate>,
        canvas: Canvas,
    }

    impl RecordingMode {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn Mode> {
            Box::new(Self {
                name,
                log: log.clone(),
                on_update: None,
                canvas: Canvas::new(2, 2),
            })
        }

        fn with_update(name: &'static str, log: &Log, on_update: OnUpdate) -> Box<dyn Mode> {
            Box::new(Self {
                name,
                log: log.clone(),
                on_update: Some(on_update),
                canvas: Canvas::new(2, 2),
            })
        }
    }

    impl Mode for RecordingMode {
        fn update(&mut self, ctx: &mut UpdateContext<'_>) {
            self.log
                .borrow_mut()
                .push(Event::Update(self.name, ctx.now_ms()));
            if let Some(on_update) = self.on_update.as_mut() {
                on_update(ctx);
            }
        }

        fn render(&mut self, ctx: &mut RenderContext<'_>) -> &mut Canvas {
            self.log
                .borrow_mut()
                .push(Event::Render(self.name, ctx.now_ms()));
            &mut self.canvas
        }
    }

    /// Title mode calls `start_game` on its first update
    struct TestFactory {
        log: Log,
    }

    impl ModeFactory for TestFactory {
        fn title(&self) -> Box<dyn Mode> {
            let mut started = false;
            RecordingMode::with_update(
                "title",
                &self.log,
                Box::new(move |ctx: &mut UpdateContext<'_>| {
                    if !started {
                        started = true;
                        ctx.start_game();
                    }
                }),
            )
        }

        fn gameplay(&self) -> Box<dyn Mode> {
            RecordingMode::boxed("gameplay", &self.log)
        }
    }

    /// Title mode that never transitions
    struct IdleFactory {
        log: Log,
    }

    impl ModeFactory for IdleFactory {
        fn title(&self) -> Box<dyn Mode> {
            RecordingMode::boxed("title", &self.log)
        }

        fn gameplay(&self) -> Box<dyn Mode> {
            RecordingMode::boxed("gameplay", &self.log)
        }
    }

    type TestLoop = Orchestrator<ScriptedInput, RecordingDisplay>;

    fn build(factory: Box<dyn ModeFactory>, clock: &ManualClock) -> TestLoop {
        let context = AppContext::new(
            ScriptedInput::default(),
            RecordingDisplay::default(),
            Box::new(InMemoryConfig::default()),
            Box::new(clock.clone()),
        );
        Orchestrator::new(context, factory)
    }

    fn idle_loop(clock: &ManualClock) -> (TestLoop, Log) {
        let log: Log = Rc::default();
        let orchestrator = build(Box::new(IdleFactory { log: log.clone() }), clock);
        (orchestrator, log)
    }

    fn step_at(orchestrator: &mut TestLoop, clock: &ManualClock, ms: u64) -> StepReport {
        clock.set(ms);
        orchestrator.step()
    }

    // --- Pacing ---

    #[test]
    fn nothing_runs_before_either_threshold() {
        let clock = ManualClock::new();
        let (mut orchestrator, log) = idle_loop(&clock);

        for ms in 0..5 {
            let report = step_at(&mut orchestrator, &clock, ms);
            assert_eq!(report, StepReport::default());
        }
        assert!(log.borrow().is_empty());
        assert_eq!(orchestrator.context().input.polls, 0);
    }

    #[test]
    fn logic_and_render_fire_on_independent_cadences() {
        let clock = ManualClock::new();
        let (mut orchestrator, _log) = idle_loop(&clock);

        let mut logic_at = Vec::new();
        let mut render_at = Vec::new();
        for ms in 0..=96 {
            let report = step_at(&mut orchestrator, &clock, ms);
            if report.logic {
                logic_at.push(ms);
            }
            if report.rendered {
                render_at.push(ms);
            }
        }

        assert_eq!(logic_at, vec![16, 32, 48, 64, 80, 96]);
        assert_eq!(render_at, (1..=19u64).map(|n| n * 5).collect::<Vec<_>>());
        assert!(logic_at.contains(&80) && render_at.contains(&80));
    }

    #[test]
    fn logic_precedes_render_in_the_same_iteration() {
        let clock = ManualClock::new();
        let (mut orchestrator, log) = idle_loop(&clock);

        let report = step_at(&mut orchestrator, &clock, 80);
        assert!(report.logic && report.rendered);
        assert_eq!(
            *log.borrow(),
            vec![Event::Update("title", 80), Event::Render("title", 80)]
        );
    }

    #[test]
    fn no_logic_or_hotkeys_within_the_step_interval() {
        let clock = ManualClock::new();
        let (mut orchestrator, _log) = idle_loop(&clock);
        step_at(&mut orchestrator, &clock, 16);

        orchestrator.context_mut().input.press(KeyCode::AltLeft);
        orchestrator.context_mut().input.press(KeyCode::Enter);
        for ms in 17..32 {
            assert!(!step_at(&mut orchestrator, &clock, ms).logic);
        }
        assert_eq!(orchestrator.context().display.fullscreen_toggles, 0);
        assert_eq!(orchestrator.context().input.polls, 1);

        assert!(step_at(&mut orchestrator, &clock, 32).logic);
        assert_eq!(orchestrator.context().display.fullscreen_toggles, 1);
    }

    #[test]
    fn no_render_within_the_render_interval() {
        let clock = ManualClock::new();
        let (mut orchestrator, _log) = idle_loop(&clock);
        assert!(step_at(&mut orchestrator, &clock, 5).rendered);

        for ms in 6..10 {
            assert!(!step_at(&mut orchestrator, &clock, ms).rendered);
        }
        assert_eq!(orchestrator.context().display.presents, 1);
        assert_eq!(orchestrator.frames_rendered(), 1);
    }

    #[test]
    fn late_iteration_runs_one_step_and_resets_from_now() {
        let clock = ManualClock::new();
        let (mut orchestrator, log) = idle_loop(&clock);

        let report = step_at(&mut orchestrator, &clock, 100);
        assert!(report.logic && report.rendered);
        assert!(!step_at(&mut orchestrator, &clock, 115).logic);
        assert!(step_at(&mut orchestrator, &clock, 116).logic);
        let updates = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Update(..)))
            .count();
        assert_eq!(updates, 2);
    }

    // --- Transitions ---

    #[test]
    fn transition_applies_at_end_of_requesting_iteration() {
        let clock = ManualClock::new();
        let log: Log = Rc::default();
        let mut orchestrator = build(Box::new(TestFactory { log: log.clone() }), &clock);

        // 80 is due for both: title updates, requests gameplay, title still renders
        let report = step_at(&mut orchestrator, &clock, 80);
        assert!(report.transitioned);
        assert!(!orchestrator.has_pending_transition());
        assert_eq!(
            *log.borrow(),
            vec![Event::Update("title", 80), Event::Render("title", 80)]
        );

        step_at(&mut orchestrator, &clock, 96);
        assert_eq!(log.borrow()[2], Event::Update("gameplay", 96));
        assert_eq!(log.borrow()[3], Event::Render("gameplay", 96));
    }

    #[test]
    fn transition_applies_even_without_render() {
        let clock = ManualClock::new();
        let log: Log = Rc::default();
        let mut orchestrator = build(Box::new(TestFactory { log: log.clone() }), &clock);

        // Render at 15 so the logic step at 16 has no render due
        step_at(&mut orchestrator, &clock, 15);
        let report = step_at(&mut orchestrator, &clock, 16);
        assert!(report.logic && !report.rendered && report.transitioned);

        step_at(&mut orchestrator, &clock, 20);
        assert_eq!(log.borrow().last(), Some(&Event::Render("gameplay", 20)));
    }

    #[test]
    fn external_request_waits_for_iteration_end() {
        let clock = ManualClock::new();
        let (mut orchestrator, log) = idle_loop(&clock);

        orchestrator.start_game();
        assert!(orchestrator.has_pending_transition());

        // No cadence due: the swap still happens at the end of the iteration
        let report = step_at(&mut orchestrator, &clock, 1);
        assert!(report.transitioned);
        step_at(&mut orchestrator, &clock, 16);
        assert_eq!(log.borrow()[0], Event::Update("gameplay", 16));
    }

    #[test]
    fn second_request_replaces_first() {
        let clock = ManualClock::new();
        let (mut orchestrator, log) = idle_loop(&clock);

        orchestrator.start_game();
        orchestrator.return_to_title();
        step_at(&mut orchestrator, &clock, 16);

        assert_eq!(*log.borrow(), vec![Event::Update("title", 16), Event::Render("title", 16)]);
    }

    // --- Quit ---

    #[test]
    fn quit_halts_before_render_and_transition() {
        let clock = ManualClock::new();
        let (mut orchestrator, log) = idle_loop(&clock);
        orchestrator.start_game();
        orchestrator.context_mut().input.quit_on_next_poll = true;

        let report = step_at(&mut orchestrator, &clock, 80);
        assert!(report.quit);
        assert!(!report.rendered && !report.transitioned && !report.logic);
        assert!(!orchestrator.is_running());
        assert!(!orchestrator.has_pending_transition());
        assert!(log.borrow().is_empty());
        assert_eq!(orchestrator.context().display.presents, 0);

        // Further steps do nothing
        assert!(step_at(&mut orchestrator, &clock, 200).quit);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn run_returns_once_quit_is_observed() {
        let clock = ManualClock::starting_at(16);
        let (mut orchestrator, log) = idle_loop(&clock);
        orchestrator.context_mut().input.quit_on_next_poll = true;

        orchestrator.run();
        assert!(!orchestrator.is_running());
        assert!(log.borrow().is_empty());
    }

    // --- Hotkeys ---

    #[test]
    fn alt_enter_toggles_fullscreen_once_per_press() {
        let clock = ManualClock::new();
        let (mut orchestrator, _log) = idle_loop(&clock);

        orchestrator.context_mut().input.press(KeyCode::AltLeft);
        orchestrator.context_mut().input.press(KeyCode::Enter);
        for n in 1..=5 {
            step_at(&mut orchestrator, &clock, n * 16);
        }
        assert_eq!(orchestrator.context().display.fullscreen_toggles, 1);
        assert!(orchestrator.context().display.fullscreen);

        orchestrator.context_mut().input.release(KeyCode::Enter);
        step_at(&mut orchestrator, &clock, 96);
        orchestrator.context_mut().input.press(KeyCode::Enter);
        step_at(&mut orchestrator, &clock, 112);
        assert_eq!(orchestrator.context().display.fullscreen_toggles, 2);
        assert!(!orchestrator.context().display.fullscreen);
    }

    #[test]
    fn enter_without_alt_does_not_toggle() {
        let clock = ManualClock::new();
        let (mut orchestrator, _log) = idle_loop(&clock);

        orchestrator.context_mut().input.press(KeyCode::Enter);
        step_at(&mut orchestrator, &clock, 16);
        orchestrator.context_mut().input.press(KeyCode::AltRight);
        step_at(&mut orchestrator, &clock, 32);

        assert_eq!(orchestrator.context().display.fullscreen_toggles, 0);
    }

    #[test]
    fn ctrl_f_toggles_overlay_and_samples_fps() {
        let clock = ManualClock::new();
        let (mut orchestrator, _log) = idle_loop(&clock);
        assert_eq!(orchestrator.avg_fps(), 0.0);

        // Four frames before the overlay comes on
        for ms in [5, 10, 15, 20] {
            step_at(&mut orchestrator, &clock, ms);
        }
        orchestrator.context_mut().input.press(KeyCode::ControlLeft);
        orchestrator.context_mut().input.press(KeyCode::KeyF);
        step_at(&mut orchestrator, &clock, 2000);
        assert!(orchestrator.show_fps());

        // Sampled before this frame is counted: 4 frames over 2 s
        assert_eq!(orchestrator.avg_fps(), 2.0);
        assert_eq!(
            orchestrator.context().display.drawn,
            vec![DrawnText {
                text: "2".to_string(),
                x: 0,
                y: 0,
                color: Color::BLACK,
            }]
        );
        assert_eq!(orchestrator.frames_rendered(), 5);

        // Plain frames first, then the overlay frame with its white backing
        let origins = &orchestrator.context().display.presented_origin;
        assert_eq!(origins[..4], [Some(Color::BLACK); 4]);
        assert_eq!(origins[4], Some(Color::WHITE));

        orchestrator.context_mut().input.release(KeyCode::KeyF);
        step_at(&mut orchestrator, &clock, 2016);
        orchestrator.context_mut().input.press(KeyCode::KeyF);
        step_at(&mut orchestrator, &clock, 2032);
        assert!(!orchestrator.show_fps());
        assert_eq!(orchestrator.context().display.drawn.len(), 2);
    }

    #[test]
    fn overlay_at_start_reports_zero() {
        let clock = ManualClock::starting_at(1000);
        let (mut orchestrator, _log) = idle_loop(&clock);
        orchestrator.context_mut().input.press(KeyCode::ControlRight);
        orchestrator.context_mut().input.press(KeyCode::KeyF);

        // Logic and render both due at the start tick, zero seconds elapsed
        step_at(&mut orchestrator, &clock, 1000);
        assert!(orchestrator.show_fps());
        assert_eq!(orchestrator.avg_fps(), 0.0);
        assert_eq!(orchestrator.context().display.texts(), vec!["0"]);
    }

    // --- Key bindings ---

    #[test]
    fn bindings_load_from_config_and_save_back() {
        let clock = ManualClock::new();
        let mut bindings = KeyBindings::default();
        bindings.player2.set_key(KeyAction::Swap, KeyCode::Space);
        let context = AppContext::new(
            ScriptedInput::default(),
            RecordingDisplay::default(),
            Box::new(InMemoryConfig::new(bindings)),
            Box::new(clock.clone()),
        );
        let log: Log = Rc::default();
        let mut orchestrator = Orchestrator::new(context, Box::new(IdleFactory { log }));

        assert_eq!(orchestrator.p2_keys().swap, KeyCode::Space);
        assert_eq!(
            *orchestrator.p1_keys(),
            KeyboardControllerConfig::player_one_defaults()
        );

        let mut p1 = *orchestrator.p1_keys();
        p1.set_key(KeyAction::Up, KeyCode::KeyI);
        orchestrator.set_p1_keys(p1);
        assert_eq!(orchestrator.key_config(Player::One).up, KeyCode::KeyI);

        orchestrator.save_key_configs().expect("save");
        let config = &orchestrator.context().config;
        assert_eq!(config.key_config(Player::One).up, KeyCode::KeyI);
        assert_eq!(config.key_config(Player::Two).swap, KeyCode::Space);
    }

    #[test]
    fn modes_can_rebind_during_update() {
        struct RebindFactory {
            log: Log,
        }

        impl ModeFactory for RebindFactory {
            fn title(&self) -> Box<dyn Mode> {
                RecordingMode::with_update(
                    "options",
                    &self.log,
                    Box::new(|ctx: &mut UpdateContext<'_>| {
                        let mut p2 = *ctx.key_config(Player::Two);
                        p2.set_key(KeyAction::Raise, KeyCode::KeyP);
                        ctx.set_key_config(Player::Two, p2);
                        ctx.save_key_configs();
                    }),
                )
            }

            fn gameplay(&self) -> Box<dyn Mode> {
                RecordingMode::boxed("gameplay", &self.log)
            }
        }

        let clock = ManualClock::new();
        let log: Log = Rc::default();
        let mut orchestrator = build(Box::new(RebindFactory { log }), &clock);
        step_at(&mut orchestrator, &clock, 16);

        assert_eq!(orchestrator.p2_keys().raise, KeyCode::KeyP);
        assert_eq!(
            orchestrator.context().config.key_config(Player::Two).raise,
            KeyCode::KeyP
        );
    }
}
