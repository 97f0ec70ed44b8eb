use crate::inventory::GridInventory;
use crate::item::{ItemDefinition, ItemProperties};
use crate::timer::PhaseTimer;

/// Where a weapon is in its reload cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReloadState {
    /// Can fire or start a reload
    Ready,
    /// Waiting for the reload to finish; rounds go in at the end
    Reloading(PhaseTimer),
}

/// A firearm's magazine and reload cycle
///
/// Reloading is a two-state machine advanced by [`Weapon::tick`]. When the
/// timer completes, the missing rounds are drawn from the inventory with
/// `consume_item`; a short supply just loads what there is.
#[derive(Debug, Clone)]
pub struct Weapon {
    item_id: String,
    /// `None` means infinite ammo (no inventory draw)
    ammo_id: Option<String>,
    magazine_size: u32,
    loaded: u32,
    reload_seconds: f32,
    state: ReloadState,
}

impl Weapon {
    /// Creates a weapon with a full magazine
    pub fn new(
        item_id: impl Into<String>,
        ammo_id: Option<String>,
        magazine_size: u32,
        reload_seconds: f32,
    ) -> Self {
        Weapon {
            item_id: item_id.into(),
            ammo_id,
            magazine_size,
            loaded: magazine_size,
            reload_seconds,
            state: ReloadState::Ready,
        }
    }

    /// Builds a weapon from a catalog definition with `Weapon` properties
    pub fn from_definition(definition: &ItemDefinition) -> Option<Self> {
        match &definition.properties {
            ItemProperties::Weapon { ammo_id, magazine_size, reload_seconds } => Some(Self::new(
                definition.id.clone(),
                Some(ammo_id.clone()),
                *magazine_size,
                *reload_seconds,
            )),
            _ => None,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    pub fn magazine_size(&self) -> u32 {
        self.magazine_size
    }

    pub fn state(&self) -> ReloadState {
        self.state
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.state, ReloadState::Reloading(_))
    }

    /// Reload completion in 0.0..=1.0, None when not reloading
    pub fn reload_progress(&self) -> Option<f32> {
        match &self.state {
            ReloadState::Reloading(timer) => Some(timer.progress()),
            ReloadState::Ready => None,
        }
    }

    /// Spends one round; false while reloading or when empty
    pub fn fire(&mut self) -> bool {
        if self.is_reloading() || self.loaded == 0 {
            return false;
        }
        self.loaded -= 1;
        true
    }

    /// Starts a reload; false when already reloading or the magazine is full
    pub fn begin_reload(&mut self) -> bool {
        if self.is_reloading() || self.loaded >= self.magazine_size {
            return false;
        }
        self.state = ReloadState::Reloading(PhaseTimer::new(self.reload_seconds));
        log::debug!("{} reloading", self.item_id);
        true
    }

    /// Abandons a reload in progress (e.g. when holstered); no ammo is drawn
    pub fn cancel_reload(&mut self) {
        self.state = ReloadState::Ready;
    }

    /// Advances the reload by `dt`
    ///
    /// Returns `Some(rounds_loaded)` on the tick the reload completes, which
    /// can be 0 when the inventory has no matching ammo. Returns None on
    /// every other tick.
    pub fn tick(&mut self, dt: f32, inventory: &mut GridInventory) -> Option<u32> {
        let ReloadState::Reloading(timer) = &mut self.state else {
            return None;
        };
        if !timer.advance(dt) {
            return None;
        }
        self.state = ReloadState::Ready;

        let needed = self.magazine_size.saturating_sub(self.loaded);
        let taken = match &self.ammo_id {
            Some(ammo_id) => inventory.consume_item(ammo_id, needed),
            None => needed,
        };

        self.loaded += taken;
        if taken < needed {
            log::info!("{} reloaded {} of {} rounds", self.item_id, taken, needed);
        } else {
            log::debug!("{} reloaded {} rounds", self.item_id, taken);
        }
        Some(taken)
    }
}
