//! Surface lookup for footsteps and impacts
//!
//! Colliders are matched to a [`SurfaceDefinition`] in three steps:
//!
//! 1. The physics material name contains a surface kind name
//!    (`"PM_Metal"` matches `Metal`)
//! 2. The collider tag equals a surface kind name
//! 3. Otherwise the default surface
//!
//! The catalog is read-only and handed to whoever needs it.

use std::path::Path;

use glam::Vec3;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset along the hit normal for impact decals, against z-fighting
pub const DECAL_OFFSET: f32 = 0.01;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Could not read surfaces: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse surfaces: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceKind {
    #[default]
    Default,
    Concrete,
    Wood,
    Metal,
    Dirt,
    Flesh,
    Glass,
}

impl SurfaceKind {
    /// The name used for material and tag matching
    pub fn name(self) -> &'static str {
        match self {
            SurfaceKind::Default => "Default",
            SurfaceKind::Concrete => "Concrete",
            SurfaceKind::Wood => "Wood",
            SurfaceKind::Metal => "Metal",
            SurfaceKind::Dirt => "Dirt",
            SurfaceKind::Flesh => "Flesh",
            SurfaceKind::Glass => "Glass",
        }
    }
}

/// Audio and visual effects for one kind of surface
///
/// Clips and effects are asset identifiers; playing them is the host's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceDefinition {
    pub kind: SurfaceKind,
    pub footstep_clips: Vec<String>,
    pub impact_clips: Vec<String>,
    /// Props landing on the surface
    pub collision_clips: Vec<String>,
    /// Bullet hole decal spawned on impact
    pub impact_vfx: Option<String>,
}

impl SurfaceDefinition {
    pub fn new(kind: SurfaceKind) -> Self {
        SurfaceDefinition {
            kind,
            ..Default::default()
        }
    }

    pub fn with_footsteps(mut self, clips: &[&str]) -> Self {
        self.footstep_clips = clips.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_impacts(mut self, clips: &[&str]) -> Self {
        self.impact_clips = clips.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_collisions(mut self, clips: &[&str]) -> Self {
        self.collision_clips = clips.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_impact_vfx(mut self, vfx: impl Into<String>) -> Self {
        self.impact_vfx = Some(vfx.into());
        self
    }

    /// A random footstep clip, None if there are none
    pub fn random_footstep<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.footstep_clips.choose(rng).map(String::as_str)
    }

    pub fn random_impact<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.impact_clips.choose(rng).map(String::as_str)
    }

    pub fn random_collision<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.collision_clips.choose(rng).map(String::as_str)
    }
}

/// A footstep ready to play
#[derive(Debug, Clone, PartialEq)]
pub struct FootstepCue<'a> {
    pub clip: &'a str,
    /// Slight random pitch so repeated steps don't sound identical
    pub pitch: f32,
}

/// A bullet impact ready to play and spawn
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactCue<'a> {
    pub clip: Option<&'a str>,
    pub vfx: Option<&'a str>,
    /// Where to spawn the decal, just off the surface
    pub decal_position: Vec3,
    /// Facing of the decal
    pub decal_normal: Vec3,
}

#[derive(Debug, Deserialize)]
struct SurfaceFile {
    surfaces: Vec<SurfaceDefinition>,
    #[serde(default)]
    default: SurfaceDefinition,
}

/// Read-only set of surfaces plus the fallback
#[derive(Debug, Clone, Default)]
pub struct SurfaceCatalog {
    surfaces: Vec<SurfaceDefinition>,
    default: SurfaceDefinition,
}

impl SurfaceCatalog {
    pub fn new(default: SurfaceDefinition) -> Self {
        SurfaceCatalog {
            surfaces: Vec::new(),
            default,
        }
    }

    /// Adds a surface; earlier surfaces win when several match
    pub fn with_surface(mut self, surface: SurfaceDefinition) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn default_surface(&self) -> &SurfaceDefinition {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Finds the surface for a collider from its material name and tag
    ///
    /// # Example
    ///
    /// ```
    /// use holdfast::surface::{SurfaceCatalog, SurfaceDefinition, SurfaceKind};
    ///
    /// let catalog = SurfaceCatalog::new(SurfaceDefinition::new(SurfaceKind::Default))
    ///     .with_surface(SurfaceDefinition::new(SurfaceKind::Metal))
    ///     .with_surface(SurfaceDefinition::new(SurfaceKind::Wood));
    ///
    /// assert_eq!(catalog.resolve(Some("PM_Metal"), Some("Wood")).kind, SurfaceKind::Metal);
    /// assert_eq!(catalog.resolve(None, Some("Wood")).kind, SurfaceKind::Wood);
    /// assert_eq!(catalog.resolve(None, None).kind, SurfaceKind::Default);
    /// ```
    pub fn resolve(&self, material_name: Option<&str>, tag: Option<&str>) -> &SurfaceDefinition {
        if let Some(material) = material_name {
            if let Some(surface) = self.surfaces.iter().find(|s| material.contains(s.kind.name())) {
                return surface;
            }
        }

        if let Some(tag) = tag {
            if let Some(surface) = self.surfaces.iter().find(|s| s.kind.name() == tag) {
                return surface;
            }
        }

        &self.default
    }

    /// Footstep for the ground under the player
    pub fn footstep<'a, R: Rng + ?Sized>(
        &'a self,
        material_name: Option<&str>,
        tag: Option<&str>,
        rng: &mut R,
    ) -> Option<FootstepCue<'a>> {
        let clip = self.resolve(material_name, tag).random_footstep(rng)?;
        Some(FootstepCue {
            clip,
            pitch: rng.gen_range(0.9..=1.1),
        })
    }

    /// Bullet impact at `position` on a surface facing `normal`
    pub fn impact<'a, R: Rng + ?Sized>(
        &'a self,
        material_name: Option<&str>,
        tag: Option<&str>,
        position: Vec3,
        normal: Vec3,
        rng: &mut R,
    ) -> ImpactCue<'a> {
        let surface = self.resolve(material_name, tag);
        let normal = normal.normalize_or_zero();
        ImpactCue {
            clip: surface.random_impact(rng),
            vfx: surface.impact_vfx.as_deref(),
            decal_position: position + normal * DECAL_OFFSET,
            decal_normal: normal,
        }
    }

    /// Parses `{ "surfaces": [...], "default": {...} }`
    pub fn from_json_str(json: &str) -> Result<Self, SurfaceError> {
        let file: SurfaceFile = serde_json::from_str(json)?;
        Ok(SurfaceCatalog {
            surfaces: file.surfaces,
            default: file.default,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SurfaceError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        log::info!("Loaded {} surfaces", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> SurfaceCatalog {
        SurfaceCatalog::new(SurfaceDefinition::new(SurfaceKind::Default).with_footsteps(&["step_default"]))
            .with_surface(
                SurfaceDefinition::new(SurfaceKind::Metal)
                    .with_footsteps(&["step_metal_1", "step_metal_2", "step_metal_3"])
                    .with_impacts(&["ricochet"])
                    .with_impact_vfx("decal_metal"),
            )
            .with_surface(SurfaceDefinition::new(SurfaceKind::Wood).with_impacts(&["thunk"]))
    }

    #[test]
    fn test_material_beats_tag() {
        let catalog = catalog();

        assert_eq!(catalog.resolve(Some("PM_Metal_Grate"), Some("Wood")).kind, SurfaceKind::Metal);
    }

    #[test]
    fn test_tag_fallback() {
        let catalog = catalog();

        assert_eq!(catalog.resolve(Some("PM_Rubber"), Some("Wood")).kind, SurfaceKind::Wood);
        // Tags match exactly
        assert_eq!(catalog.resolve(None, Some("wood")).kind, SurfaceKind::Default);
    }

    #[test]
    fn test_unknown_is_default() {
        let catalog = catalog();

        assert_eq!(catalog.resolve(Some("PM_Glass"), Some("Glass")).kind, SurfaceKind::Default);
    }

    #[test]
    fn test_random_footstep() {
        let catalog = catalog();
        let metal = catalog.resolve(Some("PM_Metal"), None);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let clip = metal.random_footstep(&mut rng).unwrap();
            assert!(metal.footstep_clips.iter().any(|c| c == clip));
        }

        let wood = catalog.resolve(None, Some("Wood"));
        assert_eq!(wood.random_footstep(&mut rng), None);
        assert_eq!(wood.random_impact(&mut rng), Some("thunk"));
    }

    #[test]
    fn test_footstep_pitch_range() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let cue = catalog.footstep(None, None, &mut rng).unwrap();
            assert_eq!(cue.clip, "step_default");
            assert!((0.9..=1.1).contains(&cue.pitch));
        }
        assert!(catalog.footstep(None, Some("Wood"), &mut rng).is_none());
    }

    #[test]
    fn test_impact_decal_offset() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);

        let cue = catalog.impact(Some("PM_Metal"), None, Vec3::ONE, Vec3::Y * 5.0, &mut rng);
        assert_eq!(cue.clip, Some("ricochet"));
        assert_eq!(cue.vfx, Some("decal_metal"));
        assert!((cue.decal_position - Vec3::new(1.0, 1.01, 1.0)).length() < 1e-6);
        assert_eq!(cue.decal_normal, Vec3::Y);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "surfaces": [
                { "kind": "Concrete", "footstep_clips": ["step_concrete"] },
                { "kind": "Glass", "impact_clips": ["shatter"], "impact_vfx": "cracks" }
            ],
            "default": { "footstep_clips": ["step_default"] }
        }"#;
        let catalog = SurfaceCatalog::from_json_str(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve(None, Some("Glass")).impact_vfx.as_deref(), Some("cracks"));
        assert_eq!(catalog.default_surface().kind, SurfaceKind::Default);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(SurfaceCatalog::from_json_str("{"), Err(SurfaceError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("holdfast-no-such-surfaces.json");

        assert!(matches!(SurfaceCatalog::load_from_file(&path), Err(SurfaceError::Io(_))));
    }
}
