use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use holdfast::carry::{CarryController, GRAVITY, Grabbable, GrabbableId, SimBody, WeightClass};
use holdfast::config::{CarryConfig, GameConfig};
use holdfast::inventory::{PlayerInventory, RotateOutcome};
use holdfast::item::{ItemCatalog, ItemDefinition};
use holdfast::locomotion::{Locomotion, MoveInput};
use holdfast::surface::SurfaceCatalog;
use holdfast::weapon::Weapon;

const SAMPLE_CONFIG: &str = "data/holdfast.json";
const DEFAULT_CATALOG: &str = "data/items.json";
const DEFAULT_SURFACES: &str = "data/surfaces.json";

/// Seconds the reload loop may run before giving up
const RELOAD_TIMEOUT: f32 = 10.0;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// User config if present, else the sample config shipped in `data/`
fn default_config_path() -> PathBuf {
    let user = GameConfig::default_path();
    if user.exists() { user } else { PathBuf::from(SAMPLE_CONFIG) }
}

fn require(catalog: &ItemCatalog, id: &str) -> Result<Arc<ItemDefinition>, String> {
    catalog
        .get(id)
        .ok_or_else(|| format!("Item '{}' is missing from the catalog", id))
}

/// Pickups, loadout, firing and a reload that draws ammo from the grid
fn inventory_session(config: &GameConfig, catalog: &ItemCatalog) -> Result<(), String> {
    let mut inventory = PlayerInventory::from_config(&config.inventory);

    let pistol = require(catalog, "pistol")?;
    let medkit = require(catalog, "medkit")?;
    let crowbar = require(catalog, "crowbar")?;
    let keycard = require(catalog, "keycard_lab")?;

    for item in [&pistol, &crowbar, &medkit, &keycard] {
        if !inventory.pickup(item, 1) {
            log::warn!("No room for {}, left on the floor", item.name);
        }
    }
    let added = inventory
        .grid
        .add_item_by_id(catalog, "pistol_ammo", 45)
        .map_err(|e| format!("Failed to add ammo: {}", e))?;
    if !added {
        log::warn!("Not all ammo fit");
    }

    for entry in inventory.grid.entries() {
        let (x, y) = entry.anchor();
        log::info!(
            "  {} {} x{} at ({}, {}) {}x{}",
            entry.id(),
            entry.item_id(),
            entry.stack_size(),
            x,
            y,
            entry.width(),
            entry.height()
        );
    }

    if let Some(id) = inventory.grid.entries().iter().find(|e| e.item_id() == "crowbar").map(|e| e.id()) {
        match inventory.grid.rotate_item(id) {
            Some(RotateOutcome::InPlace) => log::info!("Crowbar rotated in place"),
            Some(RotateOutcome::Relocated { x, y }) => log::info!("Crowbar rotated, moved to ({}, {})", x, y),
            Some(RotateOutcome::Reverted) => log::info!("No room to rotate the crowbar"),
            None => {}
        }
    }

    if !inventory.loadout.assign(&pistol, 0) {
        log::warn!("Could not assign {} to slot 1", pistol.name);
    }
    let equipped = inventory.loadout.equip(Some(0), &inventory.grid);
    log::info!("Equipped slot {:?}", equipped.map(|slot| slot + 1));

    let mut weapon = Weapon::from_definition(&pistol).ok_or("Pistol has no weapon properties")?;
    let mut shots = 0;
    while weapon.fire() {
        shots += 1;
    }
    log::info!("Fired {} shots, magazine empty", shots);

    if !weapon.begin_reload() {
        log::warn!("{} did not start reloading", weapon.item_id());
    }
    let mut elapsed = 0.0;
    while weapon.is_reloading() && elapsed < RELOAD_TIMEOUT {
        elapsed += 0.1;
        if let Some(progress) = weapon.reload_progress() {
            log::debug!("Reloading {:.0}%", progress * 100.0);
        }
        if let Some(loaded) = weapon.tick(0.1, &mut inventory.grid) {
            log::info!("Loaded {} rounds, {} left in inventory", loaded, inventory.grid.count_item("pistol_ammo"));
        }
    }

    match inventory.use_consumable("medkit") {
        Some(heal) => log::info!("Medkit restored {} health", heal),
        None => log::warn!("No medkit to use"),
    }
    log::info!("Lab door unlocked: {}", inventory.has_key_for("lab_door"));

    if let Some(id) = inventory.grid.entries().iter().find(|e| e.item_id() == "crowbar").map(|e| e.id()) {
        if let Some(stack) = inventory.drop_item(id) {
            log::info!("Dropped {} x{} into the world", stack.item_id, stack.quantity);
        }
    }

    Ok(())
}

/// Grab, hold, yank past the break distance, re-grab and throw
fn carry_session(config: &CarryConfig, locomotion: Locomotion) {
    let dt = config.fixed_timestep;
    let mut scene = vec![
        Grabbable::new("crate", SimBody::new(25.0, Vec3::new(0.0, 0.5, 2.0)), WeightClass::Heavy)
            .with_profile(config.profile_for(WeightClass::Heavy)),
        Grabbable::new("bottle", SimBody::new(0.5, Vec3::new(0.5, 0.8, 1.5)), WeightClass::Light)
            .with_profile(config.profile_for(WeightClass::Light)),
    ];
    let crate_id = GrabbableId(0);
    let bottle_id = GrabbableId(1);

    let mut carry = CarryController::new(config.clone(), locomotion);
    let eye = Vec3::new(0.0, 1.6, 0.0);
    let mut hand = eye + Vec3::new(0.0, -0.4, 1.5);

    let step = |carry: &mut CarryController<Locomotion>, scene: &mut Vec<Grabbable<SimBody>>, hand: Vec3| {
        let released = carry.fixed_update(scene, hand, dt);
        for grabbable in scene.iter_mut() {
            let body = &mut grabbable.body;
            body.integrate(dt, GRAVITY);
            // Flat floor at y = 0
            if body.position.y < 0.0 {
                body.position.y = 0.0;
                body.velocity.y = body.velocity.y.max(0.0);
            }
        }
        released
    };

    if !carry.grab_in_reach(&mut scene, crate_id, eye, hand) {
        log::warn!("Could not pick up the crate");
        return;
    }
    let speed = carry.movement_mut().tick(&MoveInput::sprinting_forward(), dt);
    log::info!("Carrying the crate, moving at {:.1} m/s", speed);

    for _ in 0..50 {
        step(&mut carry, &mut scene, hand);
    }
    log::info!(
        "Crate settled {:.2}m from the hand",
        scene[0].body.position.distance(hand)
    );

    // Player walks away faster than the crate can follow
    for _ in 0..100 {
        hand += Vec3::new(0.0, 0.0, 8.0) * dt;
        if let Some(reason) = step(&mut carry, &mut scene, hand) {
            log::info!("Crate released: {:?}", reason);
            break;
        }
    }

    // Back at the start, reaching for the bottle on the floor
    hand = eye + Vec3::new(0.0, -0.4, 1.5);
    if !carry.grab_in_reach(&mut scene, bottle_id, eye, hand) {
        log::warn!("Could not pick up the bottle");
        return;
    }
    for _ in 0..25 {
        step(&mut carry, &mut scene, hand);
    }

    if !carry.throw(&mut scene, Vec3::new(0.0, 0.3, 1.0)) {
        log::warn!("Nothing in hand to throw");
    }
    for _ in 0..25 {
        step(&mut carry, &mut scene, hand);
    }
    log::info!(
        "Bottle in flight at {:.1} m/s",
        scene[1].body.velocity.length()
    );
}

fn main() -> Result<(), String> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(default_config_path);
    let catalog_path = args.next().unwrap_or_else(|| DEFAULT_CATALOG.to_string());

    let config = GameConfig::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    let catalog = ItemCatalog::load_from_file(&catalog_path)
        .map_err(|e| format!("Failed to load item catalog {}: {}", catalog_path, e))?;
    let surfaces = SurfaceCatalog::load_from_file(DEFAULT_SURFACES)
        .map_err(|e| format!("Failed to load surfaces: {}", e))?;

    inventory_session(&config, &catalog)?;
    carry_session(&config.carry, Locomotion::new(config.locomotion.clone()));

    let mut rng = StdRng::seed_from_u64(0);
    if let Some(step) = surfaces.footstep(Some("PM_Metal"), None, &mut rng) {
        log::info!("Footstep on metal: {} at pitch {:.2}", step.clip, step.pitch);
    }
    let impact = surfaces.impact(None, Some("Wood"), Vec3::new(0.0, 1.0, 3.0), Vec3::NEG_Z, &mut rng);
    log::info!("Bullet hit wood: {:?} with {:?}", impact.clip, impact.vfx);

    Ok(())
}
