//! Projectiles plugin: **message-based producer → consumer** spawning + pooling.
//!
//! # Data flow
//! ```text
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Enemy producers: actors::fire_volleys                                 │
//!│      - ticks FireProfile clocks, writes 2 SpawnProjectileRequest per volley│
//!└────────────────────────────────────────────────────────────────────────────┘
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (B) Player producer: player::shoot (Space)                                │
//!│      - writes 1 SpawnProjectileRequest along the facing                    │
//!│                                                                            │
//!│  (C) Consumer: allocate_projectiles                                        │
//!│      - pops ProjectilePool, writes Transform / velocity / layers           │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (Avian)                         │
//!│  (E) process_projectile_contacts: damage, ActorHit / ActorDefeated,        │
//!│      ProjectileState -> PendingReturn                                      │
//!│  (F) cull_escaped_projectiles: out of the playfield -> PendingReturn       │
//!│  (G) return_to_pool_commit: Inactive invariants, push back to the pool     │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never borrow the pool and never see the entity they caused to exist; the
//! allocator is the single writer of pool state on the way out, the commit on the way back.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod effects;
pub mod messages;
pub mod pool;
pub mod spawner;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app
            .world()
            .get_resource::<Tunables>()
            .map_or_else(|| Tunables::default().projectile_pool_capacity, |t| t.projectile_pool_capacity);

        app.insert_resource(pool::ProjectilePool::new(capacity))
            .add_message::<messages::SpawnProjectileRequest>()
            .add_message::<messages::ProjectileImpact>()
            .add_systems(Startup, pool::init_projectile_pool);

        app.add_systems(
            Update,
            (allocator::allocate_projectiles, effects::spawn_hit_sparks, effects::fade_hit_sparks)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_projectile_contacts.after(CollisionEventSystems),
                commit::cull_escaped_projectiles,
                commit::return_to_pool_commit
                    .after(collision::process_projectile_contacts)
                    .after(commit::cull_escaped_projectiles),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(OnExit(GameState::InGame), commit::recall_all_projectiles);
    }
}
