//! Step-wise execution against contexts with hosts attached.

use assert_approx_eq::assert_approx_eq;

use animparse::context::{
    AnimationContext, AnimationHooks, ContextError, HookEvent, RecordingHooks, SteppingHooks,
};
use animparse::dsl::{AnimationObject, Direction, ErrorKind, Vec2};
use animparse::{Player, RunError, Step};

const BOUNCE: &str = "
(define ball ((circle (0 0) 3)))
(place ball (0 100))
(loop 2 (
    (loop 3 ((shift ball up)))
    (loop 3 ((shift ball down)))
))
(erase ball)";

#[test]
fn stepping_host_moves_and_returns() {
    let mut player = Player::new(
        "(define ball ((circle (0 0) 3))) (place ball (0 100)) (loop 3 ((shift ball up)))",
        AnimationContext::with_hooks(SteppingHooks::new(5.0)),
    );
    assert_eq!(player.run(None), 5);

    let pos = player.context().get("ball").unwrap().position;
    assert_approx_eq!(pos.x, 0.0f32);
    assert_approx_eq!(pos.y, 85.0f32);
}

#[test]
fn recording_host_sees_every_command() {
    let mut player = Player::new(BOUNCE, AnimationContext::with_hooks(RecordingHooks::default()));
    assert_eq!(player.run(None), 15);
    assert_eq!(player.step(), Step::Finished);

    let events = player.into_context().into_hooks().events;
    assert_eq!(events.len(), 15);
    assert_eq!(events[0], HookEvent::Declared { name: "ball".into() });
    assert_eq!(
        events[1],
        HookEvent::Placed {
            name: "ball".into(),
            from: Vec2::ZERO,
            to: Vec2::new(0.0, 100.0),
        }
    );
    let ups = events
        .iter()
        .filter(|e| matches!(e, HookEvent::Shifted { direction: Direction::Up, .. }))
        .count();
    assert_eq!(ups, 6);
    assert_eq!(events[14], HookEvent::Erased { name: "ball".into() });
}

#[test]
fn limit_stops_mid_loop_and_resumes() {
    let mut player = Player::new(BOUNCE, AnimationContext::with_hooks(SteppingHooks::new(1.0)));
    assert_eq!(player.run(Some(4)), 4);
    assert_approx_eq!(player.context().get("ball").unwrap().position.y, 98.0f32);

    assert_eq!(player.run(Some(100)), 11);
    assert!(player.is_finished());
    assert!(player.context().is_empty());
    assert_eq!(player.executed(), 15);
}

#[test]
fn script_error_stops_player() {
    let mut player = Player::new("(define a ())\n(place a (1 x))", AnimationContext::new());
    assert_eq!(player.step(), Step::Executed("a".into()));
    assert_eq!(player.step(), Step::Failed);

    match player.error() {
        Some(RunError::Script(e)) => {
            assert_eq!(e.kind, ErrorKind::SyntaxError);
            assert_eq!(e.position.line, 2);
            assert_eq!(e.found.as_deref(), Some("x"));
        }
        other => panic!("expected script error, got {other:?}"),
    }
    assert_eq!(player.run(None), 0);
}

#[test]
fn erase_then_use_is_undeclared() {
    let mut player = Player::new("(define a ()) (erase a) (place a (0 0))", AnimationContext::new());
    assert_eq!(player.run(None), 2);
    assert_eq!(
        player.take_error(),
        Some(RunError::Context(ContextError::UndeclaredName("a".into())))
    );
    // Taking the error does not make the player look finished cleanly.
    assert_eq!(player.step(), Step::Failed);
    assert!(player.is_failed());
}

/// A host that keeps its own scene list in sync via hooks.
#[derive(Default)]
struct Scene {
    visible: Vec<String>,
    trail: Vec<Vec2>,
}

impl AnimationHooks for Scene {
    fn on_declared(&mut self, name: &str, _object: &AnimationObject) {
        self.visible.push(name.to_string());
    }

    fn on_shifted(&mut self, _name: &str, object: &mut AnimationObject, direction: Direction) {
        object.position += direction.unit();
        self.trail.push(object.position);
    }

    fn on_erased(&mut self, name: &str, _object: AnimationObject) {
        self.visible.retain(|n| n != name);
    }
}

#[test]
fn custom_host_through_mutable_reference() {
    let mut scene = Scene::default();
    {
        let mut player = Player::new(
            "(define a ()) (define b ()) (loop 2 ((shift b right))) (erase a)",
            AnimationContext::with_hooks(&mut scene),
        );
        player.run(None);
        assert!(player.error().is_none());
    }

    assert_eq!(scene.visible, vec!["b".to_string()]);
    assert_eq!(scene.trail, vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]);
}

#[test]
fn restart_reuses_hooks() {
    let mut player = Player::new("(define a ())", AnimationContext::with_hooks(RecordingHooks::default()));
    player.run(None);
    player.restart("(define a ()) (erase a)");
    assert_eq!(player.run(None), 2);
    assert_eq!(player.context().hooks().events.len(), 3);
}
