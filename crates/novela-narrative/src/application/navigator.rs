//! The navigator: owns one play-through and routes every activation to the
//! interaction strategy of the scene on screen.
//!
//! `Game` holds the story, the session aggregate, the surface, the clock and
//! the RNG. Nothing is global; a new game is a new session.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use novela_core::aggregate::AggregateRoot;
use novela_core::clock::Clock;
use novela_core::error::DomainError;
use novela_core::event::DomainEvent;
use novela_core::rng::DeterministicRng;
use novela_core::surface::{ControlAction, Surface};
use novela_story::domain::scene::{Scene, SceneKind, Transition};
use novela_story::domain::story::{SceneRef, Story};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::interactions::{self, Turn, choice, free_text, linear, ordering};
use super::query_handlers::{SessionView, session_view};
use super::renderer;
use crate::domain::aggregates::{Stage, StorySession};
use crate::domain::commands::{
    ConfirmOrder, Continue, PickStep, PlayerCommand, SelectChoice, SubmitAnswer,
};
use crate::domain::ending::{EndingTier, ending_text};
use crate::domain::events::SessionEvent;

/// Delay before the continue control follows a free-text answer.
pub const ANSWER_REVEAL_DELAY_MS: i64 = 1000;

/// Delay before the continue control follows a confirmed order.
pub const ORDERING_REVEAL_DELAY_MS: i64 = 1200;

/// Presentation options of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Append the final score to the ending text.
    pub show_final_score: bool,
    /// Delay of the continue control after a free-text answer.
    pub answer_reveal_delay: TimeDelta,
    /// Delay of the continue control after a confirmed order.
    pub ordering_reveal_delay: TimeDelta,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            show_final_score: true,
            answer_reveal_delay: TimeDelta::milliseconds(ANSWER_REVEAL_DELAY_MS),
            ordering_reveal_delay: TimeDelta::milliseconds(ORDERING_REVEAL_DELAY_MS),
        }
    }
}

/// What an accepted activation did to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The scene on screen changed state (step picked, answer scored, ...).
    Updated,
    /// Nothing happened.
    Ignored,
    /// A scene was rendered.
    Entered(SceneRef),
    /// The ending was rendered.
    Ended(EndingTier),
    /// The requested scene does not exist; the screen was left as it was.
    /// Holds the requested id, empty when the exit had none.
    Missing(String),
}

/// One play-through of a story on a surface.
pub struct Game<S: Surface> {
    story: Arc<Story>,
    session: StorySession,
    surface: S,
    clock: Arc<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    options: GameOptions,
}

impl<S: Surface> Game<S> {
    /// Creates a game with a fresh session. Nothing is rendered until
    /// [`Game::start`].
    #[must_use]
    pub fn new(
        story: Arc<Story>,
        surface: S,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
        options: GameOptions,
    ) -> Self {
        Self {
            story,
            session: StorySession::new(Uuid::new_v4()),
            surface,
            clock,
            rng,
            options,
        }
    }

    /// Renders the intro scene.
    #[instrument(skip(self), fields(session_id = %self.session.id))]
    pub fn start(&mut self) -> Navigation {
        let correlation_id = Uuid::new_v4();
        self.logged(|game| game.render(SceneRef::Intro, correlation_id))
    }

    /// Follows a transition request. Re-enables the answer field first, then
    /// renders the target scene or the ending. A target that does not exist
    /// leaves the screen and the session as they were.
    #[instrument(skip(self), fields(session_id = %self.session.id))]
    pub fn go_to(&mut self, target: Option<&Transition>, correlation_id: Uuid) -> Navigation {
        self.logged(|game| game.navigate(target, correlation_id))
    }

    /// Handles one player command.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the command does not fit the scene
    /// on screen or its stage (control not shown, already scored, story
    /// ended). Returns `DomainError::SceneNotFound` if the current scene
    /// vanished from the story.
    #[instrument(
        skip(self, command),
        fields(session_id = %self.session.id, command = command.as_command().command_type())
    )]
    pub fn dispatch(&mut self, command: &PlayerCommand) -> Result<Navigation, DomainError> {
        self.logged(|game| match command {
            PlayerCommand::SelectChoice(c) => game.handle_select_choice(c),
            PlayerCommand::SubmitAnswer(c) => game.handle_submit_answer(c),
            PlayerCommand::PickStep(c) => game.handle_pick_step(c),
            PlayerCommand::ConfirmOrder(c) => game.handle_confirm_order(c),
            PlayerCommand::Continue(c) => game.handle_continue(c),
        })
    }

    /// Activates an option control.
    ///
    /// # Errors
    ///
    /// See [`Game::dispatch`].
    pub fn activate(&mut self, action: ControlAction) -> Result<Navigation, DomainError> {
        self.dispatch(&PlayerCommand::from_action(action, Uuid::new_v4()))
    }

    /// Shows the continue control if its delay has elapsed. Returns whether
    /// it appeared.
    pub fn poll_reveal(&mut self) -> bool {
        self.logged(|game| {
            let fired = game
                .session
                .poll_reveal(Uuid::new_v4(), game.clock.as_ref());
            if fired {
                game.surface.show_next(true);
            }
            fired
        })
    }

    /// When the pending continue control is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.session.pending_reveal().map(|p| p.due_at)
    }

    /// Takes the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.session.drain_events()
    }

    /// Read-only snapshot of the session.
    #[must_use]
    pub fn view(&self) -> SessionView {
        session_view(&self.session)
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// The session aggregate.
    #[must_use]
    pub fn session(&self) -> &StorySession {
        &self.session
    }

    /// The surface the game renders into.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. for a driver reading input.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn handle_select_choice(&mut self, command: &SelectChoice) -> Result<Navigation, DomainError> {
        let story = Arc::clone(&self.story);
        let scene = self.current_scene(&story)?;
        let SceneKind::Choice { choices } = &scene.kind else {
            return Err(wrong_kind("select a choice", scene));
        };

        let target = choice::select(
            &mut self.turn(command.correlation_id),
            choices,
            command.index,
        )?;
        Ok(self.navigate(target.as_ref(), command.correlation_id))
    }

    fn handle_submit_answer(&mut self, command: &SubmitAnswer) -> Result<Navigation, DomainError> {
        let story = Arc::clone(&self.story);
        let scene = self.current_scene(&story)?;
        let SceneKind::FreeText { answer, next_scene } = &scene.kind else {
            return Err(wrong_kind("submit an answer", scene));
        };

        let delay = self.options.answer_reveal_delay;
        let scored = free_text::submit(
            &mut self.turn(command.correlation_id),
            scene,
            answer.as_deref(),
            next_scene.as_ref(),
            &command.input,
            delay,
        )?;
        Ok(if scored.is_some() {
            Navigation::Updated
        } else {
            Navigation::Ignored
        })
    }

    fn handle_pick_step(&mut self, command: &PickStep) -> Result<Navigation, DomainError> {
        let story = Arc::clone(&self.story);
        let scene = self.current_scene(&story)?;
        let SceneKind::Ordering { steps, .. } = &scene.kind else {
            return Err(wrong_kind("pick a step", scene));
        };

        ordering::pick(&mut self.turn(command.correlation_id), steps, command.step)?;
        Ok(Navigation::Updated)
    }

    fn handle_confirm_order(&mut self, command: &ConfirmOrder) -> Result<Navigation, DomainError> {
        let story = Arc::clone(&self.story);
        let scene = self.current_scene(&story)?;
        let SceneKind::Ordering {
            steps,
            correct_order,
            next_scene,
        } = &scene.kind
        else {
            return Err(wrong_kind("confirm an order", scene));
        };

        let delay = self.options.ordering_reveal_delay;
        ordering::confirm(
            &mut self.turn(command.correlation_id),
            scene,
            steps.len(),
            correct_order,
            next_scene.as_ref(),
            delay,
        )?;
        Ok(Navigation::Updated)
    }

    fn handle_continue(&mut self, command: &Continue) -> Result<Navigation, DomainError> {
        if *self.session.stage() != Stage::Continuing {
            return Err(DomainError::Validation(format!(
                "continue control is not shown while {}",
                self.session.stage().label()
            )));
        }

        let target = self.session.continue_target().cloned();
        Ok(self.navigate(target.as_ref(), command.correlation_id))
    }

    fn navigate(&mut self, target: Option<&Transition>, correlation_id: Uuid) -> Navigation {
        self.surface.enable_input(true);
        match target {
            None => self.miss(String::new(), correlation_id),
            Some(Transition::Final) => self.end(correlation_id),
            Some(Transition::Scene(id)) => self.render(SceneRef::Named(id.clone()), correlation_id),
        }
    }

    fn render(&mut self, scene_ref: SceneRef, correlation_id: Uuid) -> Navigation {
        let story = Arc::clone(&self.story);
        let Some(scene) = story.resolve(&scene_ref) else {
            return self.miss(scene_ref.to_string(), correlation_id);
        };

        renderer::reset(&mut self.surface);
        renderer::show_text(&mut self.surface, &scene.text, &scene.question);
        let stage = interactions::present(&scene.kind, &mut self.surface, self.rng.as_mut());
        info!(scene = %scene_ref, kind = scene.kind.label(), "scene entered");
        self.session
            .enter_scene(scene_ref.clone(), stage, correlation_id, self.clock.as_ref());

        if let SceneKind::Linear { next_scene } = &scene.kind {
            if let Err(error) = linear::reveal(&mut self.turn(correlation_id), next_scene) {
                warn!(%error, "continue control not shown");
            }
        }
        Navigation::Entered(scene_ref)
    }

    fn end(&mut self, correlation_id: Uuid) -> Navigation {
        let tier = self
            .session
            .reach_ending(correlation_id, self.clock.as_ref());
        let story = Arc::clone(&self.story);
        let ending = tier.ending(story.finals());
        let score = self.session.score();

        renderer::reset(&mut self.surface);
        renderer::show_text(
            &mut self.surface,
            &ending_text(ending, score, self.options.show_final_score),
            &ending.title,
        );
        info!(tier = tier.label(), score, "ending reached");
        Navigation::Ended(tier)
    }

    fn miss(&mut self, target: String, correlation_id: Uuid) -> Navigation {
        warn!(scene_id = %target, "scene not found, staying on current scene");
        self.session
            .miss_transition(target.clone(), correlation_id, self.clock.as_ref());
        Navigation::Missing(target)
    }

    fn current_scene<'s>(&self, story: &'s Story) -> Result<&'s Scene, DomainError> {
        if let Stage::Ended(_) = self.session.stage() {
            return Err(DomainError::Validation("the story has ended".to_owned()));
        }
        let scene_ref = self
            .session
            .scene()
            .ok_or_else(|| DomainError::Validation("no scene on screen".to_owned()))?;
        story.require(scene_ref)
    }

    fn turn(&mut self, correlation_id: Uuid) -> Turn<'_> {
        Turn {
            session: &mut self.session,
            surface: &mut self.surface,
            clock: self.clock.as_ref(),
            correlation_id,
        }
    }

    fn logged<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.session.uncommitted_events().len();
        let result = f(self);
        for event in self.session.uncommitted_events().iter().skip(before) {
            debug!(
                event_type = event.event_type(),
                sequence_number = event.metadata().sequence_number,
                payload = %event.to_payload(),
                "event recorded"
            );
        }
        result
    }
}

fn wrong_kind(action: &str, scene: &Scene) -> DomainError {
    DomainError::Validation(format!(
        "cannot {action} in {} scene {}",
        scene.kind.label(),
        scene.id
    ))
}
