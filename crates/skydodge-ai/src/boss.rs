//! Boss behaviors.
//!
//! Each boss kind implements `BossBehavior`; `behavior(kind)` selects the
//! implementation for the active variant. Like the rival steering, these
//! operate on plain data and leave entity bookkeeping to the caller.

use glam::DVec3;
use rand::{Rng, RngCore};

use skydodge_core::components::{Boss, Turret, WeakPoint};
use skydodge_core::constants::*;
use skydodge_core::enums::{BossKind, ExplosionKind};
use skydodge_core::geometry;

/// Per-frame inputs to a boss.
pub struct BossTickContext {
    pub boss_position: DVec3,
    pub player_position: DVec3,
    pub frame: u64,
}

/// A hostile projectile launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurretShot {
    pub origin: DVec3,
    pub velocity: DVec3,
}

/// How a projectile interacted with a boss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// Did not touch any boss surface.
    Miss,
    /// Struck a damageable surface.
    Damaged {
        damage: i32,
        explosion: ExplosionKind,
        scale: f64,
    },
    /// Struck armor: consumed the projectile, no damage.
    Absorbed { explosion: ExplosionKind, scale: f64 },
}

/// What happens when a boss runs out of hit points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Depletion {
    pub score: u32,
    /// Boss to spawn next, `None` when this was the last one.
    pub next: Option<BossKind>,
    pub explosion: ExplosionKind,
    pub scale: f64,
}

/// Common interface for boss kinds.
pub trait BossBehavior: Sync {
    /// Name shown on the health bar.
    fn display_name(&self) -> &'static str;

    /// Fresh boss state at full health.
    fn spawn_state(&self) -> Boss;

    /// Mark the boss revealed. Returns true only on the first reveal.
    fn on_reveal(&self, boss: &mut Boss) -> bool {
        if boss.revealed {
            return false;
        }
        boss.revealed = true;
        true
    }

    /// Advance one frame. May return a shot at the player.
    fn on_tick(
        &self,
        boss: &mut Boss,
        ctx: &BossTickContext,
        rng: &mut dyn RngCore,
    ) -> Option<TurretShot>;

    /// Resolve a player projectile at `point`. Any hit also reveals the boss.
    fn on_hit(&self, boss: &mut Boss, boss_position: DVec3, point: DVec3) -> HitResult;

    /// Reward and follow-up once hit points are gone.
    fn on_depleted(&self) -> Depletion;
}

/// Behavior for the active boss variant.
pub fn behavior(kind: BossKind) -> &'static dyn BossBehavior {
    match kind {
        BossKind::DeathStar => &DeathStar,
        BossKind::Planet => &Planet,
    }
}

/// Reveal the boss if the player has flown inside the reveal radius.
pub fn reveal_by_proximity(boss: &mut Boss, boss_position: DVec3, player_position: DVec3) -> bool {
    let within = boss_position.distance_squared(player_position)
        <= BOSS_REVEAL_DISTANCE * BOSS_REVEAL_DISTANCE;
    within && behavior(boss.kind).on_reveal(boss)
}

/// World position of a weak point, following the boss's spin about y.
pub fn weak_point_position(boss: &Boss, boss_position: DVec3) -> Option<DVec3> {
    boss.weak_point
        .map(|wp| boss_position + geometry::rotate_about_y(wp.local_offset, boss.spin_y))
}

/// Muzzle position of a turret in world space.
pub fn turret_muzzle(boss: &Boss, boss_position: DVec3, turret: &Turret) -> DVec3 {
    boss_position
        + geometry::rotate_about_y(turret.local_offset, boss.spin_y)
        + DVec3::new(0.0, TURRET_MUZZLE_HEIGHT, 0.0)
}

/// Armored sphere. A pure target with no weapons.
pub struct DeathStar;

impl BossBehavior for DeathStar {
    fn display_name(&self) -> &'static str {
        "DEATH STAR"
    }

    fn spawn_state(&self) -> Boss {
        Boss {
            kind: BossKind::DeathStar,
            hit_points: DEATH_STAR_HIT_POINTS,
            max_hit_points: DEATH_STAR_HIT_POINTS,
            revealed: false,
            spin_y: 0.0,
            spin_z: 0.0,
            weak_point: None,
            turrets: Vec::new(),
        }
    }

    fn on_tick(
        &self,
        boss: &mut Boss,
        _ctx: &BossTickContext,
        _rng: &mut dyn RngCore,
    ) -> Option<TurretShot> {
        boss.spin_y += DEATH_STAR_SPIN_Y;
        boss.spin_z += DEATH_STAR_SPIN_Z;
        None
    }

    fn on_hit(&self, boss: &mut Boss, boss_position: DVec3, point: DVec3) -> HitResult {
        if !geometry::within(point, boss_position, DEATH_STAR_RADIUS) {
            return HitResult::Miss;
        }
        self.on_reveal(boss);
        boss.hit_points -= DEATH_STAR_DAMAGE;
        HitResult::Damaged {
            damage: DEATH_STAR_DAMAGE,
            explosion: ExplosionKind::BossImpact,
            scale: 0.5,
        }
    }

    fn on_depleted(&self) -> Depletion {
        Depletion {
            score: DEATH_STAR_SCORE,
            next: Some(BossKind::Planet),
            explosion: ExplosionKind::BossWreck,
            scale: 10.0,
        }
    }
}

/// Indestructible planet with a mansion weak point on its north pole and a
/// ring of turrets around it.
pub struct Planet;

impl Planet {
    fn turret_ring() -> Vec<Turret> {
        (0..TURRET_COUNT)
            .map(|i| {
                let angle = i as f64 / TURRET_COUNT as f64 * std::f64::consts::TAU;
                Turret {
                    local_offset: DVec3::new(
                        angle.cos() * TURRET_RING_RADIUS,
                        PLANET_RADIUS - TURRET_SINK,
                        angle.sin() * TURRET_RING_RADIUS,
                    ),
                }
            })
            .collect()
    }
}

impl BossBehavior for Planet {
    fn display_name(&self) -> &'static str {
        "THE PLANET"
    }

    fn spawn_state(&self) -> Boss {
        Boss {
            kind: BossKind::Planet,
            hit_points: PLANET_HIT_POINTS,
            max_hit_points: PLANET_HIT_POINTS,
            revealed: false,
            spin_y: 0.0,
            spin_z: 0.0,
            weak_point: Some(WeakPoint {
                local_offset: DVec3::new(0.0, PLANET_RADIUS, 0.0),
                hit_radius: WEAK_POINT_RADIUS + WEAK_POINT_HIT_MARGIN,
            }),
            turrets: Self::turret_ring(),
        }
    }

    fn on_tick(
        &self,
        boss: &mut Boss,
        ctx: &BossTickContext,
        rng: &mut dyn RngCore,
    ) -> Option<TurretShot> {
        boss.spin_y += PLANET_SPIN_Y;

        if !boss.revealed || ctx.frame % TURRET_FIRE_INTERVAL_FRAMES != 0 {
            return None;
        }

        let index = rng.gen_range(0..TURRET_COUNT);
        let turret = boss.turrets.get(index)?;
        let origin = turret_muzzle(boss, ctx.boss_position, turret);
        let aim = geometry::direction(origin, ctx.player_position)?;
        Some(TurretShot {
            origin,
            velocity: aim * TURRET_PROJECTILE_SPEED,
        })
    }

    fn on_hit(&self, boss: &mut Boss, boss_position: DVec3, point: DVec3) -> HitResult {
        if let (Some(weak_point), Some(center)) =
            (boss.weak_point, weak_point_position(boss, boss_position))
        {
            if geometry::within(point, center, weak_point.hit_radius) {
                self.on_reveal(boss);
                boss.hit_points -= WEAK_POINT_DAMAGE;
                return HitResult::Damaged {
                    damage: WEAK_POINT_DAMAGE,
                    explosion: ExplosionKind::WeakPointImpact,
                    scale: 0.8,
                };
            }
        }

        if geometry::within(point, boss_position, PLANET_RADIUS) {
            self.on_reveal(boss);
            return HitResult::Absorbed {
                explosion: ExplosionKind::PlanetSurface,
                scale: 0.2,
            };
        }

        HitResult::Miss
    }

    fn on_depleted(&self) -> Depletion {
        Depletion {
            score: PLANET_SCORE,
            next: None,
            explosion: ExplosionKind::PlanetWreck,
            scale: 30.0,
        }
    }
}
