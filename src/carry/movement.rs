/// The movement controller's side of carrying
///
/// The carry controller calls `set_carry_state` when a grab succeeds and
/// `reset_carry_state` on every release, and nothing else.
pub trait CarryMovement {
    fn set_carry_state(&mut self, carrying: bool, speed_multiplier: f32, allow_sprint: bool);

    /// Back to not carrying: multiplier 1.0, sprint allowed
    fn reset_carry_state(&mut self);
}
