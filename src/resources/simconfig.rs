//! Simulation configuration resource.
//!
//! Holds every tuning constant of the simulation, grouped the way the INI
//! file is. Defaults reproduce the original game's feel, so a missing or
//! partial file is never an error for the simulation itself.
//!
//! # Configuration File Format
//!
//! ```ini
//! [movement]
//! acceleration = 0.3
//! friction = 0.85
//! walk_speed = 1.5
//! sprint_speed = 5
//! move_deadzone = 0.1
//! facing_deadzone = 0.1
//!
//! [actor]
//! width = 32
//! height = 32
//! hitbox_offset_x = 4
//! hitbox_offset_y = 8
//! hitbox_width = 24
//! hitbox_height = 20
//! start_x = 400
//! start_y = 300
//!
//! [energy]
//! max = 100
//! min_sprint = 10
//! sprint_decay = 0.08
//! walk_regen = 0.03
//! idle_regen = 0.06
//! low_energy_notice_interval_ms = 3000
//!
//! [interaction]
//! range = 40
//! cooldown_ms = 500
//! inventory_capacity = 10
//!
//! [particles]
//! gravity = 0.1
//! damping = 0.98
//! dust_chance = 0.4
//!
//! [sim]
//! seed = 1
//! ```
//!
//! Rates in `[energy]` are per millisecond; speeds and accelerations in
//! `[movement]` and `[particles]` are per tick.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "./unscripted.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    /// Velocity gained per tick at full intent.
    pub acceleration: f32,
    /// Velocity multiplier applied after every tick.
    pub friction: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Per-axis speed below which the actor counts as standing still.
    pub move_deadzone: f32,
    /// Vertical speed needed before facing turns up/down.
    pub facing_deadzone: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.3,
            friction: 0.85,
            walk_speed: 1.5,
            sprint_speed: 5.0,
            move_deadzone: 0.1,
            facing_deadzone: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorConfig {
    pub width: f32,
    pub height: f32,
    pub hitbox_offset_x: f32,
    pub hitbox_offset_y: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            hitbox_offset_x: 4.0,
            hitbox_offset_y: 8.0,
            hitbox_width: 24.0,
            hitbox_height: 20.0,
            start_x: 400.0,
            start_y: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyConfig {
    pub max: f32,
    /// Sprinting needs strictly more energy than this.
    pub min_sprint: f32,
    /// Energy lost per ms while sprinting.
    pub sprint_decay: f32,
    /// Energy gained per ms while walking.
    pub walk_regen: f32,
    /// Energy gained per ms while standing still.
    pub idle_regen: f32,
    pub low_energy_notice_interval_ms: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            min_sprint: 10.0,
            sprint_decay: 0.08,
            walk_regen: 0.03,
            idle_regen: 0.06,
            low_energy_notice_interval_ms: 3000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    /// Center-to-center distance under which an object is in reach.
    pub range: f32,
    pub cooldown_ms: f64,
    pub inventory_capacity: usize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            range: 40.0,
            cooldown_ms: 500.0,
            inventory_capacity: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    /// Downward velocity gained per tick.
    pub gravity: f32,
    /// Velocity multiplier applied every tick.
    pub damping: f32,
    /// Per-tick probability of a dust puff while sprinting.
    pub dust_chance: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            damping: 0.98,
            dust_chance: 0.4,
        }
    }
}

/// Simulation configuration resource.
///
/// Passed explicitly into the simulation at construction; there is no global
/// "current configuration".
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub movement: MovementConfig,
    pub actor: ActorConfig,
    pub energy: EnergyConfig,
    pub interaction: InteractionConfig,
    pub particles: ParticleConfig,
    /// Seed for the simulation RNG (loot picks, particle spread).
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with the default tuning.
    pub fn new() -> Self {
        Self {
            movement: MovementConfig::default(),
            actor: ActorConfig::default(),
            energy: EnergyConfig::default(),
            interaction: InteractionConfig::default(),
            particles: ParticleConfig::default(),
            seed: 1,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config from {:?}: walk={} sprint={} energy={} range={} cooldown={}ms seed={}",
            self.config_path,
            self.movement.walk_speed,
            self.movement.sprint_speed,
            self.energy.max,
            self.interaction.range,
            self.interaction.cooldown_ms,
            self.seed
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str, bound: Bound| {
            let value = config.getfloat(section, key).ok().flatten()?;
            if bound.accepts(value) {
                Some(value)
            } else {
                warn!(
                    "Ignoring [{}] {} = {}: must be {}",
                    section,
                    key,
                    value,
                    bound.describe()
                );
                None
            }
        };

        // [movement] section
        let m = &mut self.movement;
        set_f32(&mut m.acceleration, float("movement", "acceleration", Bound::NonNegative));
        set_f32(&mut m.friction, float("movement", "friction", Bound::OpenUnit));
        set_f32(&mut m.walk_speed, float("movement", "walk_speed", Bound::NonNegative));
        set_f32(&mut m.sprint_speed, float("movement", "sprint_speed", Bound::NonNegative));
        set_f32(&mut m.move_deadzone, float("movement", "move_deadzone", Bound::NonNegative));
        set_f32(
            &mut m.facing_deadzone,
            float("movement", "facing_deadzone", Bound::NonNegative),
        );

        // [actor] section
        let a = &mut self.actor;
        set_f32(&mut a.width, float("actor", "width", Bound::NonNegative));
        set_f32(&mut a.height, float("actor", "height", Bound::NonNegative));
        set_f32(&mut a.hitbox_offset_x, float("actor", "hitbox_offset_x", Bound::Finite));
        set_f32(&mut a.hitbox_offset_y, float("actor", "hitbox_offset_y", Bound::Finite));
        set_f32(&mut a.hitbox_width, float("actor", "hitbox_width", Bound::NonNegative));
        set_f32(&mut a.hitbox_height, float("actor", "hitbox_height", Bound::NonNegative));
        set_f32(&mut a.start_x, float("actor", "start_x", Bound::Finite));
        set_f32(&mut a.start_y, float("actor", "start_y", Bound::Finite));

        // [energy] section
        let e = &mut self.energy;
        let min_sprint = e.min_sprint;
        set_f32(&mut e.max, float("energy", "max", Bound::NonNegative));
        set_f32(&mut e.min_sprint, float("energy", "min_sprint", Bound::NonNegative));
        set_f32(&mut e.sprint_decay, float("energy", "sprint_decay", Bound::NonNegative));
        set_f32(&mut e.walk_regen, float("energy", "walk_regen", Bound::NonNegative));
        set_f32(&mut e.idle_regen, float("energy", "idle_regen", Bound::NonNegative));
        if let Some(v) = float("energy", "low_energy_notice_interval_ms", Bound::NonNegative) {
            e.low_energy_notice_interval_ms = v;
        }
        if e.min_sprint > e.max {
            warn!(
                "Ignoring [energy] min_sprint = {}: must not exceed max = {}",
                e.min_sprint, e.max
            );
            e.min_sprint = min_sprint.min(e.max);
        }

        // [interaction] section
        set_f32(
            &mut self.interaction.range,
            float("interaction", "range", Bound::NonNegative),
        );
        if let Some(v) = float("interaction", "cooldown_ms", Bound::NonNegative) {
            self.interaction.cooldown_ms = v;
        }
        if let Some(v) = config
            .getuint("interaction", "inventory_capacity")
            .ok()
            .flatten()
        {
            self.interaction.inventory_capacity = v as usize;
        }

        // [particles] section
        let p = &mut self.particles;
        set_f32(&mut p.gravity, float("particles", "gravity", Bound::Finite));
        set_f32(&mut p.damping, float("particles", "damping", Bound::Unit));
        set_f32(&mut p.dust_chance, float("particles", "dust_chance", Bound::Unit));

        // [sim] section
        if let Some(seed) = config.getuint("sim", "seed").ok().flatten() {
            self.seed = seed;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();
        let mut put = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        let m = &self.movement;
        put("movement", "acceleration", m.acceleration.to_string());
        put("movement", "friction", m.friction.to_string());
        put("movement", "walk_speed", m.walk_speed.to_string());
        put("movement", "sprint_speed", m.sprint_speed.to_string());
        put("movement", "move_deadzone", m.move_deadzone.to_string());
        put("movement", "facing_deadzone", m.facing_deadzone.to_string());

        let a = &self.actor;
        put("actor", "width", a.width.to_string());
        put("actor", "height", a.height.to_string());
        put("actor", "hitbox_offset_x", a.hitbox_offset_x.to_string());
        put("actor", "hitbox_offset_y", a.hitbox_offset_y.to_string());
        put("actor", "hitbox_width", a.hitbox_width.to_string());
        put("actor", "hitbox_height", a.hitbox_height.to_string());
        put("actor", "start_x", a.start_x.to_string());
        put("actor", "start_y", a.start_y.to_string());

        let e = &self.energy;
        put("energy", "max", e.max.to_string());
        put("energy", "min_sprint", e.min_sprint.to_string());
        put("energy", "sprint_decay", e.sprint_decay.to_string());
        put("energy", "walk_regen", e.walk_regen.to_string());
        put("energy", "idle_regen", e.idle_regen.to_string());
        put(
            "energy",
            "low_energy_notice_interval_ms",
            e.low_energy_notice_interval_ms.to_string(),
        );

        let i = &self.interaction;
        put("interaction", "range", i.range.to_string());
        put("interaction", "cooldown_ms", i.cooldown_ms.to_string());
        put(
            "interaction",
            "inventory_capacity",
            i.inventory_capacity.to_string(),
        );

        let p = &self.particles;
        put("particles", "gravity", p.gravity.to_string());
        put("particles", "damping", p.damping.to_string());
        put("particles", "dust_chance", p.dust_chance.to_string());

        put("sim", "seed", self.seed.to_string());
        config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Values a tuning key accepts. Every bound also requires the value to be
/// finite once narrowed to `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Finite,
    NonNegative,
    /// Strictly between 0 and 1.
    OpenUnit,
    /// Between 0 and 1 inclusive.
    Unit,
}

impl Bound {
    fn accepts(self, value: f64) -> bool {
        if !(value as f32).is_finite() {
            return false;
        }
        match self {
            Bound::Finite => true,
            Bound::NonNegative => value >= 0.0,
            Bound::OpenUnit => value > 0.0 && value < 1.0,
            Bound::Unit => (0.0..=1.0).contains(&value),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Bound::Finite => "a finite number",
            Bound::NonNegative => "finite and non-negative",
            Bound::OpenUnit => "strictly between 0 and 1",
            Bound::Unit => "between 0 and 1",
        }
    }
}

fn set_f32(slot: &mut f32, value: Option<f64>) {
    if let Some(v) = value {
        *slot = v as f32;
    }
}
