use glam::Vec3;

use super::body::{CollisionMode, DynamicBody, PhysicsSnapshot};
use super::grabbable::{GrabbableId, GrabbableSet};
use super::movement::CarryMovement;
use crate::config::CarryConfig;

/// What the controller is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryState {
    Idle,
    Holding(GrabbableId),
}

/// Why a held object was let go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    Dropped,
    Thrown,
    /// Pulled past the break distance (stuck behind geometry, yanked away)
    Broke,
    /// The object disappeared from the scene while held
    TargetLost,
    /// Grabbing was switched off, e.g. because a weapon was drawn
    Disabled,
}

/// Bookkeeping for the object currently held
#[derive(Debug, Clone, Copy)]
struct HeldObject {
    target: GrabbableId,
    saved: PhysicsSnapshot,
    last_anchor: Vec3,
}

/// Spring-damper controller that carries one dynamic body at a time
///
/// # State machine
///
/// `Idle --grab--> Holding --drop/throw/break--> Idle`
///
/// While holding, [`CarryController::fixed_update`] must run once per fixed
/// physics step, before the engine integrates forces. It pushes the body
/// toward the hand anchor with
///
/// `force = (anchor - position) * spring + (hand_velocity - velocity) * damper`
///
/// The damper term matches the body's velocity to the hand's rather than
/// to zero, so swinging the hand carries momentum into the object.
///
/// The movement controller is wired in at construction and is told about
/// every grab and release.
#[derive(Debug)]
pub struct CarryController<M> {
    config: CarryConfig,
    movement: M,
    held: Option<HeldObject>,
    enabled: bool,
}

impl<M: CarryMovement> CarryController<M> {
    pub fn new(config: CarryConfig, movement: M) -> Self {
        CarryController {
            config,
            movement,
            held: None,
            enabled: true,
        }
    }

    pub fn config(&self) -> &CarryConfig {
        &self.config
    }

    pub fn movement(&self) -> &M {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut M {
        &mut self.movement
    }

    pub fn state(&self) -> CarryState {
        match &self.held {
            Some(held) => CarryState::Holding(held.target),
            None => CarryState::Idle,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns grabbing on or off; turning it off drops whatever is held
    pub fn set_enabled<S: GrabbableSet>(&mut self, enabled: bool, scene: &mut S) {
        if !enabled {
            self.release(scene, ReleaseReason::Disabled);
        }
        self.enabled = enabled;
    }

    /// Starts holding `target`
    ///
    /// Rejected (returns false, nothing changes) when disabled, when
    /// already holding something, when `target` is not in the scene, or
    /// when another controller holds it.
    pub fn grab<S: GrabbableSet>(&mut self, scene: &mut S, target: GrabbableId, hand_anchor: Vec3) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(held) = &self.held {
            log::debug!("Grab of {:?} rejected, already holding {:?}", target, held.target);
            return false;
        }
        let Some(grabbable) = scene.grabbable_mut(target) else {
            log::debug!("Grab of {:?} rejected, no such object", target);
            return false;
        };
        if grabbable.is_held() {
            log::debug!("Grab of {} rejected, held elsewhere", grabbable.name);
            return false;
        }

        let saved = PhysicsSnapshot::capture(&grabbable.body);
        let apply_drag = grabbable.applies_drag_when_held();
        let body = &mut grabbable.body;

        if apply_drag {
            body.set_gravity_enabled(false);
            body.set_linear_damping(self.config.hold_damping);
            body.set_angular_damping(self.config.hold_damping);
        }
        body.set_collision_mode(CollisionMode::ContinuousDynamic);

        grabbable.set_held(true);
        let profile = grabbable.profile();
        log::info!("Grabbed {} ({:?})", grabbable.name, grabbable.weight());

        self.held = Some(HeldObject {
            target,
            saved,
            last_anchor: hand_anchor,
        });
        self.movement
            .set_carry_state(true, profile.speed_multiplier, profile.allow_sprint);
        true
    }

    /// Grabs `target` if it lies within `reach_distance` of `eye`
    ///
    /// This is the interaction entry point: the camera looks at an object
    /// and only bodies within arm's reach can be picked up. Otherwise the
    /// same as [`CarryController::grab`].
    pub fn grab_in_reach<S: GrabbableSet>(
        &mut self,
        scene: &mut S,
        target: GrabbableId,
        eye: Vec3,
        hand_anchor: Vec3,
    ) -> bool {
        let Some(grabbable) = scene.grabbable_mut(target) else {
            return false;
        };

        let distance = grabbable.body.position().distance(eye);
        if distance > self.config.reach_distance {
            log::debug!(
                "{} is out of reach ({:.2}m, reach {:.2}m)",
                grabbable.name,
                distance,
                self.config.reach_distance
            );
            return false;
        }
        self.grab(scene, target, hand_anchor)
    }

    /// Lets go, restoring the body's pre-grab physics
    ///
    /// Returns false (and does nothing) when not holding anything.
    pub fn drop<S: GrabbableSet>(&mut self, scene: &mut S) -> bool {
        self.release(scene, ReleaseReason::Dropped).is_some()
    }

    /// Drops, then launches the body along `forward`
    ///
    /// Only a linear impulse is applied; any spin comes from later
    /// collisions.
    pub fn throw<S: GrabbableSet>(&mut self, scene: &mut S, forward: Vec3) -> bool {
        let Some(target) = self.release(scene, ReleaseReason::Thrown) else {
            return false;
        };

        if let Some(grabbable) = scene.grabbable_mut(target) {
            grabbable
                .body
                .add_impulse(forward.normalize_or_zero() * self.config.throw_impulse);
        }
        true
    }

    /// One fixed physics step while holding
    ///
    /// Releases first if the body is farther than `break_distance` from the
    /// hand anchor, in which case no force is applied this step. Returns the
    /// release reason when the step ended the hold, None otherwise.
    pub fn fixed_update<S: GrabbableSet>(
        &mut self,
        scene: &mut S,
        hand_anchor: Vec3,
        dt: f32,
    ) -> Option<ReleaseReason> {
        let (target, last_anchor) = match &self.held {
            Some(held) => (held.target, held.last_anchor),
            None => return None,
        };

        let grabbable = match scene.grabbable_mut(target) {
            Some(grabbable) => grabbable,
            None => {
                self.release(scene, ReleaseReason::TargetLost);
                return Some(ReleaseReason::TargetLost);
            }
        };

        let distance = grabbable.body.position().distance(hand_anchor);
        if distance > self.config.break_distance {
            log::warn!(
                "{} is {:.2}m from the hand (limit {:.2}m), releasing",
                grabbable.name,
                distance,
                self.config.break_distance
            );
            self.release(scene, ReleaseReason::Broke);
            return Some(ReleaseReason::Broke);
        }

        let hand_velocity = if dt > 0.0 {
            (hand_anchor - last_anchor) / dt
        } else {
            Vec3::ZERO
        };

        let body = &mut grabbable.body;
        let position_error = hand_anchor - body.position();
        let velocity_error = hand_velocity - body.linear_velocity();
        body.add_force(position_error * self.config.spring + velocity_error * self.config.damper);

        if let Some(held) = self.held.as_mut() {
            held.last_anchor = hand_anchor;
        }
        None
    }

    fn release<S: GrabbableSet>(&mut self, scene: &mut S, reason: ReleaseReason) -> Option<GrabbableId> {
        let held = self.held.take()?;

        match scene.grabbable_mut(held.target) {
            Some(grabbable) => {
                held.saved.restore(&mut grabbable.body);
                grabbable.set_held(false);
                log::info!("Released {} ({:?})", grabbable.name, reason);
            }
            None => log::warn!("Held object {:?} is gone ({:?})", held.target, reason),
        }

        self.movement.reset_carry_state();
        Some(held.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carry::{CarryProfile, Grabbable, SimBody, WeightClass, GRAVITY};

    /// Records what the controller told the movement side
    #[derive(Debug, Default)]
    struct MovementProbe {
        carrying: bool,
        multiplier: f32,
        allow_sprint: bool,
        calls: usize,
    }

    impl CarryMovement for MovementProbe {
        fn set_carry_state(&mut self, carrying: bool, speed_multiplier: f32, allow_sprint: bool) {
            self.carrying = carrying;
            self.multiplier = speed_multiplier;
            self.allow_sprint = allow_sprint;
            self.calls += 1;
        }

        fn reset_carry_state(&mut self) {
            self.set_carry_state(false, 1.0, true);
        }
    }

    fn controller() -> CarryController<MovementProbe> {
        CarryController::new(CarryConfig::default(), MovementProbe::default())
    }

    fn scene() -> Vec<Grabbable<SimBody>> {
        vec![
            Grabbable::new(
                "bottle",
                SimBody::new(2.0, Vec3::ZERO)
                    .with_damping(0.37, 0.61)
                    .with_collision_mode(CollisionMode::Discrete),
                WeightClass::Light,
            ),
            Grabbable::new("crate", SimBody::new(20.0, Vec3::X * 5.0), WeightClass::Heavy),
            Grabbable::new("valve", SimBody::new(5.0, Vec3::Z), WeightClass::Heavy)
                .with_drag_when_held(false),
        ]
    }

    const BOTTLE: GrabbableId = GrabbableId(0);
    const CRATE: GrabbableId = GrabbableId(1);
    const VALVE: GrabbableId = GrabbableId(2);

    #[test]
    fn test_grab_configures_body_and_movement() {
        let mut scene = scene();
        let mut carry = controller();

        assert!(carry.grab(&mut scene, CRATE, Vec3::new(5.0, 1.0, 0.0)));
        assert_eq!(carry.state(), CarryState::Holding(CRATE));

        let crate_body = &scene[1].body;
        assert!(!crate_body.gravity_enabled);
        assert_eq!(crate_body.linear_damping, 10.0);
        assert_eq!(crate_body.angular_damping, 10.0);
        assert_eq!(crate_body.collision_mode, CollisionMode::ContinuousDynamic);
        assert!(scene[1].is_held());

        let movement = carry.movement();
        assert!(movement.carrying);
        assert_eq!(movement.multiplier, 0.5);
        assert!(!movement.allow_sprint);
    }

    #[test]
    fn test_grab_without_drag_keeps_gravity() {
        let mut scene = scene();
        let mut carry = controller();

        assert!(carry.grab(&mut scene, VALVE, Vec3::Z));

        let valve = &scene[2].body;
        assert!(valve.gravity_enabled);
        assert_eq!(valve.linear_damping, 0.05);
        assert_eq!(valve.collision_mode, CollisionMode::ContinuousDynamic);
    }

    #[test]
    fn test_grab_drop_restores_exactly() {
        let mut scene = scene();
        let mut carry = controller();
        scene[0].body.gravity_enabled = false;
        let before = PhysicsSnapshot::capture(&scene[0].body);

        assert!(carry.grab(&mut scene, BOTTLE, Vec3::Y));
        assert_ne!(PhysicsSnapshot::capture(&scene[0].body), before);

        assert!(carry.drop(&mut scene));
        let after = PhysicsSnapshot::capture(&scene[0].body);
        assert_eq!(after.linear_damping.to_bits(), before.linear_damping.to_bits());
        assert_eq!(after.angular_damping.to_bits(), before.angular_damping.to_bits());
        assert_eq!(after.gravity_enabled, before.gravity_enabled);
        assert_eq!(after.collision_mode, before.collision_mode);

        assert!(!scene[0].is_held());
        assert_eq!(carry.state(), CarryState::Idle);
        assert!(!carry.movement().carrying);
        assert_eq!(carry.movement().multiplier, 1.0);
        assert!(carry.movement().allow_sprint);
    }

    #[test]
    fn test_grab_drop_without_drag_restores_exactly() {
        let mut scene = scene();
        let mut carry = controller();
        scene[2].body = scene[2].body.clone().with_damping(0.8, 1.3);
        let before = PhysicsSnapshot::capture(&scene[2].body);

        assert!(carry.grab(&mut scene, VALVE, Vec3::Z));
        assert!(carry.drop(&mut scene));

        let after = PhysicsSnapshot::capture(&scene[2].body);
        assert_eq!(after, before);
        assert_eq!(after.collision_mode, CollisionMode::Discrete);
        assert!(!scene[2].is_held());
        assert!(!carry.movement().carrying);
    }

    #[test]
    fn test_grab_in_reach() {
        let mut scene = scene();
        let mut carry = controller();
        let eye = Vec3::new(0.0, 1.6, 0.0);

        // Crate sits 5m out along X, reach is 3m
        assert!(!carry.grab_in_reach(&mut scene, CRATE, eye, Vec3::Y));
        assert_eq!(carry.state(), CarryState::Idle);
        assert!(!scene[1].is_held());
        assert_eq!(carry.movement().calls, 0);

        assert!(!carry.grab_in_reach(&mut scene, GrabbableId(9), eye, Vec3::Y));

        assert!(carry.grab_in_reach(&mut scene, BOTTLE, eye, Vec3::Y));
        assert_eq!(carry.state(), CarryState::Holding(BOTTLE));
    }

    #[test]
    fn test_grab_while_holding_is_rejected() {
        let mut scene = scene();
        let mut carry = controller();

        assert!(carry.grab(&mut scene, BOTTLE, Vec3::Y));
        let crate_before = scene[1].body.clone();

        assert!(!carry.grab(&mut scene, CRATE, Vec3::Y));
        assert_eq!(carry.state(), CarryState::Holding(BOTTLE));
        assert_eq!(scene[1].body, crate_before);
        assert!(!scene[1].is_held());
        assert_eq!(carry.movement().multiplier, 0.9);
    }

    #[test]
    fn test_grab_held_elsewhere_is_rejected() {
        let mut scene = scene();
        let mut first = controller();
        let mut second = controller();

        assert!(first.grab(&mut scene, BOTTLE, Vec3::Y));
        assert!(!second.grab(&mut scene, BOTTLE, Vec3::Y));
        assert_eq!(second.state(), CarryState::Idle);
        assert_eq!(second.movement().calls, 0);
    }

    #[test]
    fn test_grab_missing_target() {
        let mut scene = scene();
        let mut carry = controller();

        assert!(!carry.grab(&mut scene, GrabbableId(9), Vec3::ZERO));
        assert_eq!(carry.state(), CarryState::Idle);
    }

    #[test]
    fn test_drop_is_idempotent() {
        let mut scene = scene();
        let mut carry = controller();

        assert!(!carry.drop(&mut scene));
        assert_eq!(carry.movement().calls, 0);

        carry.grab(&mut scene, BOTTLE, Vec3::Y);
        assert!(carry.drop(&mut scene));
        assert!(!carry.drop(&mut scene));
        assert_eq!(carry.movement().calls, 2);
    }

    #[test]
    fn test_spring_damper_force() {
        let mut scene = scene();
        let mut carry = controller();
        scene[0].body.velocity = Vec3::new(0.0, 0.0, 1.0);
        let anchor = Vec3::new(0.0, 1.0, 0.0);
        carry.grab(&mut scene, BOTTLE, anchor);

        // Hand moves 0.02 along X in one 0.02s step: 1 m/s
        let moved = anchor + Vec3::X * 0.02;
        assert_eq!(carry.fixed_update(&mut scene, moved, 0.02), None);

        let position_error = moved - Vec3::ZERO;
        let velocity_error = Vec3::X - Vec3::new(0.0, 0.0, 1.0);
        let expected = position_error * 150.0 + velocity_error * 10.0;
        assert!((scene[0].body.pending_force() - expected).length() < 1e-3);
    }

    #[test]
    fn test_break_distance_releases() {
        let mut scene = scene();
        let mut carry = controller();
        scene[0].body.gravity_enabled = true;

        // Body at origin, hand 1m away
        assert!(carry.grab(&mut scene, BOTTLE, Vec3::X));
        assert_eq!(carry.movement().multiplier, 0.9);
        assert!(carry.movement().allow_sprint);

        // Hand jumps 3m further in one tick
        let reason = carry.fixed_update(&mut scene, Vec3::X * 4.0, 0.02);
        assert_eq!(reason, Some(ReleaseReason::Broke));
        assert_eq!(carry.state(), CarryState::Idle);

        assert!(scene[0].body.gravity_enabled);
        assert_eq!(scene[0].body.pending_force(), Vec3::ZERO);
        assert!(!carry.movement().carrying);
        assert_eq!(carry.movement().multiplier, 1.0);
        assert!(carry.movement().allow_sprint);
    }

    #[test]
    fn test_throw_applies_linear_impulse_only() {
        let mut scene = scene();
        let mut carry = controller();
        scene[0].body.angular_velocity = Vec3::new(0.0, 0.5, 0.0);
        carry.grab(&mut scene, BOTTLE, Vec3::Y);

        assert!(carry.throw(&mut scene, Vec3::new(0.0, 0.0, 3.0)));

        // 15 impulse on a 2kg body
        assert!((scene[0].body.velocity - Vec3::new(0.0, 0.0, 7.5)).length() < 1e-5);
        assert_eq!(scene[0].body.angular_velocity, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(scene[0].body.collision_mode, CollisionMode::Discrete);
        assert!(!carry.is_holding());
        assert!(!carry.throw(&mut scene, Vec3::Z));
    }

    #[test]
    fn test_disable_drops_and_blocks_grab() {
        let mut scene = scene();
        let mut carry = controller();
        carry.grab(&mut scene, BOTTLE, Vec3::Y);

        carry.set_enabled(false, &mut scene);
        assert!(!carry.is_holding());
        assert!(!scene[0].is_held());
        assert!(!carry.grab(&mut scene, BOTTLE, Vec3::Y));

        carry.set_enabled(true, &mut scene);
        assert!(carry.grab(&mut scene, BOTTLE, Vec3::Y));
    }

    #[test]
    fn test_target_lost() {
        let mut scene = scene();
        let mut carry = controller();
        carry.grab(&mut scene, CRATE, Vec3::X * 5.0);

        scene.truncate(1);
        assert_eq!(
            carry.fixed_update(&mut scene, Vec3::X * 5.0, 0.02),
            Some(ReleaseReason::TargetLost)
        );
        assert!(!carry.movement().carrying);
    }

    #[test]
    fn test_idle_update_does_nothing() {
        let mut scene = scene();
        let mut carry = controller();

        assert_eq!(carry.fixed_update(&mut scene, Vec3::ONE, 0.02), None);
        assert_eq!(scene[0].body.pending_force(), Vec3::ZERO);
    }

    #[test]
    fn test_held_body_settles_at_anchor() {
        let mut scene = scene();
        let mut carry = controller();
        let anchor = Vec3::new(0.5, 1.2, 0.8);
        let dt = carry.config().fixed_timestep;
        carry.grab(&mut scene, BOTTLE, anchor);

        for _ in 0..200 {
            assert_eq!(carry.fixed_update(&mut scene, anchor, dt), None);
            scene[0].body.integrate(dt, GRAVITY);
        }

        assert!(scene[0].body.position.distance(anchor) < 0.01);
        assert!(scene[0].body.velocity.length() < 0.01);
    }

    #[test]
    fn test_custom_profile() {
        let mut scene = vec![Grabbable::new("barrel", SimBody::new(8.0, Vec3::ZERO), WeightClass::Heavy)
            .with_profile(CarryProfile { speed_multiplier: 0.3, allow_sprint: false })];
        let mut carry = controller();

        carry.grab(&mut scene, GrabbableId(0), Vec3::Y);
        assert_eq!(carry.movement().multiplier, 0.3);
    }
}
