use serde::{Deserialize, Serialize};

use super::body::DynamicBody;

/// Index of a grabbable object in its `GrabbableSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabbableId(pub usize);

/// Coarse weight classification used to pick a carry profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
    #[default]
    Light,
    Heavy,
}

impl WeightClass {
    pub fn default_profile(self) -> CarryProfile {
        match self {
            WeightClass::Light => CarryProfile::LIGHT,
            WeightClass::Heavy => CarryProfile::HEAVY,
        }
    }
}

/// How carrying an object affects the player's movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarryProfile {
    /// Multiplier on movement speed, in (0, 1]
    pub speed_multiplier: f32,
    pub allow_sprint: bool,
}

impl CarryProfile {
    pub const LIGHT: CarryProfile = CarryProfile {
        speed_multiplier: 0.9,
        allow_sprint: true,
    };

    pub const HEAVY: CarryProfile = CarryProfile {
        speed_multiplier: 0.5,
        allow_sprint: false,
    };

    /// Not carrying anything
    pub const NONE: CarryProfile = CarryProfile {
        speed_multiplier: 1.0,
        allow_sprint: true,
    };
}

/// A dynamic body the player can pick up
#[derive(Debug, Clone)]
pub struct Grabbable<B> {
    pub name: String,
    pub body: B,
    weight: WeightClass,
    profile: CarryProfile,
    /// Crates and props float with extra drag; hinged machinery (valves,
    /// drawers) keeps its own physics and is only pulled.
    apply_drag_when_held: bool,
    held: bool,
}

impl<B: DynamicBody> Grabbable<B> {
    /// Creates a grabbable using the weight class's default profile
    pub fn new(name: impl Into<String>, body: B, weight: WeightClass) -> Self {
        Grabbable {
            name: name.into(),
            body,
            weight,
            profile: weight.default_profile(),
            apply_drag_when_held: true,
            held: false,
        }
    }

    pub fn with_profile(mut self, profile: CarryProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_drag_when_held(mut self, apply: bool) -> Self {
        self.apply_drag_when_held = apply;
        self
    }

    pub fn weight(&self) -> WeightClass {
        self.weight
    }

    pub fn profile(&self) -> CarryProfile {
        self.profile
    }

    pub fn applies_drag_when_held(&self) -> bool {
        self.apply_drag_when_held
    }

    /// True while some carry controller holds this object
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
    }
}

/// Lookup of grabbable objects by ID
///
/// The scene layer owns the objects; the carry controller only keeps the
/// ID of the one it holds and reaches it through this trait every tick.
pub trait GrabbableSet {
    type Body: DynamicBody;

    fn grabbable_mut(&mut self, id: GrabbableId) -> Option<&mut Grabbable<Self::Body>>;
}

impl<B: DynamicBody> GrabbableSet for Vec<Grabbable<B>> {
    type Body = B;

    fn grabbable_mut(&mut self, id: GrabbableId) -> Option<&mut Grabbable<B>> {
        self.get_mut(id.0)
    }
}
