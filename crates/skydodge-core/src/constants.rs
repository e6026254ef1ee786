//! Simulation constants and tuning parameters.
//!
//! Speeds, turn rates and cadences are per frame. The simulation is stepped
//! once per displayed frame and does not scale by elapsed time.

// --- World ---

/// Extent of the initial hazard field (x, y, z), centered on the origin.
pub const WORLD_SIZE: [f64; 3] = [8000.0, 2500.0, 8000.0];

/// Initial hazards are kept at least this far (plus their own radius)
/// from the player spawn point.
pub const SAFE_SPAWN_RADIUS: f64 = 600.0;

// --- Streaming ---

/// Target obstacle population.
pub const OBSTACLE_COUNT: usize = 300;

/// Distance ahead of the player at which new hazards are centered.
pub const STREAM_SPAWN_RADIUS: f64 = 4000.0;

/// Hazards farther than this from the player are removed.
pub const STREAM_DESPAWN_RADIUS: f64 = 4500.0;

/// Edge length of the jitter cube around the spawn center.
pub const STREAM_SPAWN_VOLUME: f64 = 4000.0;

/// Obstacle drift bound; each velocity axis is drawn from ±half of this.
pub const OBSTACLE_MAX_SPEED: f64 = 0.5;

/// Fraction of obstacles that are destructible bonus targets.
pub const OBSTACLE_BONUS_CHANCE: f64 = 0.15;

/// Hitbox shrink applied to an obstacle's largest scale axis.
pub const OBSTACLE_HITBOX_FACTOR: f64 = 0.85;

/// Score for destroying a bonus obstacle.
pub const OBSTACLE_BONUS_SCORE: u32 = 25;

/// Target decoy aircraft population.
pub const DECOY_COUNT: usize = 15;

/// Decoy cruise speed.
pub const DECOY_SPEED: f64 = 1.8;

/// Decoy collision radius.
pub const DECOY_RADIUS: f64 = 12.0;

/// Score for shooting down a decoy.
pub const DECOY_SCORE: u32 = 5;

/// Extra reach granted to player projectiles against decoys and obstacles.
pub const PROJECTILE_TARGET_MARGIN: f64 = 10.0;

// --- Rival ---

/// Rival spawn distance from the origin.
pub const RIVAL_SPAWN_DISTANCE: f64 = 10_000.0;

/// Half-range of the rival's spawn elevation angle (radians).
pub const RIVAL_SPAWN_ELEVATION: f64 = 0.25;

pub const RIVAL_CRUISE_SPEED: f64 = 1.4;
pub const RIVAL_ESCAPE_SPEED: f64 = 4.0;

/// Slerp factor toward the desired heading each frame.
pub const RIVAL_TURN_RATE: f64 = 0.05;

pub const RIVAL_RADIUS: f64 = 14.0;

/// Projectiles hit the rival within this multiple of its radius.
pub const RIVAL_HIT_RADIUS_FACTOR: f64 = 2.0;

pub const RIVAL_SCORE: u32 = 500;

/// Obstacles closer than this push the rival away.
pub const RIVAL_AVOIDANCE_DISTANCE: f64 = 400.0;

/// Obstacle scan stops once this many threats are found.
pub const RIVAL_AVOIDANCE_MAX_THREATS: usize = 4;

/// Player closer than this sends the rival into a panic.
pub const RIVAL_PANIC_DISTANCE: f64 = 1500.0;

/// HUD lock cue distance.
pub const TARGET_LOCK_DISTANCE: f64 = 800.0;

// --- Bosses ---

/// Bosses spawn this far ahead of the player.
pub const BOSS_SPAWN_DISTANCE: f64 = 8000.0;

/// Player within this distance reveals the boss.
pub const BOSS_REVEAL_DISTANCE: f64 = 5000.0;

pub const DEATH_STAR_HIT_POINTS: i32 = 500;
pub const DEATH_STAR_RADIUS: f64 = 240.0;
pub const DEATH_STAR_DAMAGE: i32 = 10;
pub const DEATH_STAR_SCORE: u32 = 2000;
pub const DEATH_STAR_SPIN_Y: f64 = 0.005;
pub const DEATH_STAR_SPIN_Z: f64 = 0.002;

pub const PLANET_HIT_POINTS: i32 = 200;
pub const PLANET_RADIUS: f64 = 800.0;
pub const PLANET_SPIN_Y: f64 = 0.001;
pub const PLANET_SCORE: u32 = 5000;

/// Mansion footprint radius and the extra slack given to projectiles.
pub const WEAK_POINT_RADIUS: f64 = 60.0;
pub const WEAK_POINT_HIT_MARGIN: f64 = 40.0;
pub const WEAK_POINT_DAMAGE: i32 = 5;

pub const TURRET_COUNT: usize = 8;

/// Distance of the turret ring from the planet's pole axis.
pub const TURRET_RING_RADIUS: f64 = 140.0;

/// Turrets sit this far below the planet surface line.
pub const TURRET_SINK: f64 = 10.0;

/// Turret shots leave this far above the turret base.
pub const TURRET_MUZZLE_HEIGHT: f64 = 10.0;

/// Frames between turret shots once the planet is revealed.
pub const TURRET_FIRE_INTERVAL_FRAMES: u64 = 25;

pub const TURRET_PROJECTILE_SPEED: f64 = 6.0;
pub const TURRET_PROJECTILE_LIFE: i32 = 200;

// --- Player weapons ---

pub const PROJECTILE_SPEED: f64 = 25.0;
pub const PROJECTILE_LIFE: i32 = 100;

/// Minimum wall-clock gap between player shots.
pub const FIRE_COOLDOWN_MS: u64 = 400;

/// Projectiles spawn this far ahead of the player.
pub const MUZZLE_OFFSET: f64 = 50.0;

/// Aim point distance along the cursor ray.
pub const AIM_DISTANCE: f64 = 1000.0;

// --- Chase camera ---

/// Camera offset in the player's local frame.
pub const CAMERA_OFFSET: [f64; 3] = [0.0, 96.0, -255.0];

/// Fraction of the remaining gap the camera closes each frame.
pub const CAMERA_FOLLOW: f64 = 0.12;

/// Vertical field of view (degrees).
pub const CAMERA_FOV_DEGREES: f64 = 75.0;

pub const DEFAULT_ASPECT: f64 = 16.0 / 9.0;

// --- Effects ---

/// Explosion life lost per frame (life starts at 1.0).
pub const EXPLOSION_DECAY: f64 = 0.02;

// --- Display ---

/// Maximum number of trail points kept per entity.
pub const TRAIL_MAX_POINTS: usize = 50;
