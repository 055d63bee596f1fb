//! Actor registry and per-frame update protocol
//!
//! Actors live in a slotmap arena and are referenced by stable [`ActorKey`]
//! handles. Iteration order is carried by a separate `live` list; actors
//! registered while an update pass is running are diverted to a `pending`
//! list and only promoted between passes, so a frame never updates an actor
//! it created.

use slotmap::SlotMap;

use super::actor::{Actor, ActorState};

slotmap::new_key_type! {
    /// Stable handle to an actor in the world's arena
    pub struct ActorKey;
}

/// Deferred world mutations requested from inside an update pass
///
/// Actor behaviors run while the world is mid-iteration, so they cannot
/// touch the live collection directly. Spawns, removals, and quit requests
/// collected here are applied by [`World::update`] once the pass is over.
#[derive(Default)]
pub struct UpdateContext {
    spawned: Vec<Actor>,
    removed: Vec<ActorKey>,
    quit: bool,
}

impl UpdateContext {
    /// Queue a new actor for registration
    ///
    /// The actor lands in the pending list and is not updated this frame.
    pub fn spawn(&mut self, actor: Actor) {
        self.spawned.push(actor);
    }

    /// Queue an actor for removal after the pass
    pub fn remove(&mut self, key: ActorKey) {
        self.removed.push(key);
    }

    /// Ask the engine to stop the frame loop
    pub fn request_quit(&mut self) {
        self.quit = true;
    }
}

/// What one `update` call did, so the engine can keep the renderer's
/// drawable set in sync
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Actors promoted from pending to live this call
    pub promoted: Vec<ActorKey>,
    /// Actors destroyed this call (explicit removals and reaped dead)
    pub destroyed: Vec<ActorKey>,
    /// Whether some actor requested the frame loop to stop
    pub quit_requested: bool,
}

/// Owner of every actor and driver of the update pass
#[derive(Default)]
pub struct World {
    arena: SlotMap<ActorKey, Actor>,
    live: Vec<ActorKey>,
    pending: Vec<ActorKey>,
    is_updating: bool,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor and return its handle
    ///
    /// Goes to the pending list when an update pass is running, otherwise
    /// straight to the live list. No duplicate detection.
    pub fn add_actor(&mut self, actor: Actor) -> ActorKey {
        let key = self.arena.insert(actor);
        if self.is_updating {
            self.pending.push(key);
        } else {
            self.live.push(key);
        }
        key
    }

    /// Destroy an actor by identity
    ///
    /// Removes the key from whichever list currently holds it using
    /// swap-with-last-and-pop: O(1), does not preserve the relative order
    /// of the remaining entries. Removing an absent key is a silent no-op,
    /// so the call is idempotent.
    pub fn remove_actor(&mut self, key: ActorKey) {
        if let Some(position) = self.pending.iter().position(|&k| k == key) {
            self.pending.swap_remove(position);
        }
        if let Some(position) = self.live.iter().position(|&k| k == key) {
            self.live.swap_remove(position);
        }
        // Dropping the actor cascades to its components.
        self.arena.remove(key);
    }

    /// Borrow an actor; `None` once destroyed
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.arena.get(key)
    }

    /// Mutably borrow an actor; `None` once destroyed
    pub fn actor_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.arena.get_mut(key)
    }

    /// Whether the key still refers to a living (or pending) actor
    pub fn contains(&self, key: ActorKey) -> bool {
        self.arena.contains_key(key)
    }

    /// Keys of the live collection, in iteration order
    pub fn live_actors(&self) -> &[ActorKey] {
        &self.live
    }

    /// Keys waiting to be promoted at the end of the current pass
    pub fn pending_actors(&self) -> &[ActorKey] {
        &self.pending
    }

    /// Whether an update pass is currently iterating the live collection
    pub fn is_updating(&self) -> bool {
        self.is_updating
    }

    /// Total number of actors, live and pending
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the world holds no actors at all
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Run one update pass over every live actor
    ///
    /// Protocol, in order:
    /// 1. raise the iterating flag;
    /// 2. update each actor currently live, in collection order — actors
    ///    spawned during the pass go to pending and are *not* updated;
    /// 3. drop the flag;
    /// 4. promote pending actors to the end of the live list, in queue order;
    /// 5. collect explicit removal requests and every `Dead` live actor into
    ///    a removal list (the live list is never mutated while scanned);
    /// 6. destroy the collected actors, erasing them from the live list.
    pub fn update(&mut self, dt: f32) -> UpdateReport {
        let mut ctx = UpdateContext::default();

        self.is_updating = true;
        for index in 0..self.live.len() {
            let key = self.live[index];
            if let Some(actor) = self.arena.get_mut(key) {
                actor.update(&mut ctx, dt);
            }
        }
        for actor in ctx.spawned.drain(..) {
            self.add_actor(actor);
        }
        self.is_updating = false;

        let promoted = std::mem::take(&mut self.pending);
        self.live.extend_from_slice(&promoted);

        let mut destroyed: Vec<ActorKey> = ctx
            .removed
            .drain(..)
            .filter(|&key| self.arena.contains_key(key))
            .collect();
        let dead: Vec<ActorKey> = self
            .live
            .iter()
            .copied()
            .filter(|&key| {
                !destroyed.contains(&key)
                    && matches!(self.arena.get(key), Some(a) if a.state() == ActorState::Dead)
            })
            .collect();
        destroyed.extend(dead);
        for &key in &destroyed {
            self.remove_actor(key);
        }

        UpdateReport {
            promoted,
            destroyed,
            quit_requested: ctx.quit,
        }
    }

    /// Destroy every remaining actor (iteration order unspecified)
    pub fn clear(&mut self) {
        log::debug!("Destroying {} remaining actor(s)", self.arena.len());
        self.live.clear();
        self.pending.clear();
        self.arena.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{ActorBehavior, Capabilities, Component};
    use crate::foundation::math::Transform2;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TickComponent {
        ticks: Rc<Cell<u32>>,
    }

    impl Component for TickComponent {
        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE
        }

        fn update(&mut self, _owner: &mut Transform2, _dt: f32) {
            self.ticks.set(self.ticks.get() + 1);
        }
    }

    fn ticking_actor(ticks: &Rc<Cell<u32>>) -> Actor {
        let mut actor = Actor::new();
        actor.add_component(Box::new(TickComponent {
            ticks: Rc::clone(ticks),
        }));
        actor
    }

    struct SpawnOnce {
        child_ticks: Rc<Cell<u32>>,
        spawned: bool,
    }

    impl ActorBehavior for SpawnOnce {
        fn update(&mut self, _actor: &mut Actor, ctx: &mut UpdateContext, _dt: f32) {
            if !self.spawned {
                ctx.spawn(ticking_actor(&self.child_ticks));
                self.spawned = true;
            }
        }
    }

    #[test]
    fn test_mid_update_spawn_is_deferred_one_frame() {
        let child_ticks = Rc::new(Cell::new(0));
        let mut world = World::new();
        world.add_actor(Actor::with_behavior(Box::new(SpawnOnce {
            child_ticks: Rc::clone(&child_ticks),
            spawned: false,
        })));

        let report = world.update(0.016);
        // The child was promoted but not updated during the frame that
        // created it.
        assert_eq!(report.promoted.len(), 1);
        assert_eq!(child_ticks.get(), 0);
        // Present exactly once in the live collection.
        let child = report.promoted[0];
        assert_eq!(world.live_actors().iter().filter(|&&k| k == child).count(), 1);

        world.update(0.016);
        assert_eq!(child_ticks.get(), 1);
    }

    struct DieImmediately;

    impl ActorBehavior for DieImmediately {
        fn update(&mut self, actor: &mut Actor, _ctx: &mut UpdateContext, _dt: f32) {
            actor.set_state(ActorState::Dead);
        }
    }

    struct DropFlag {
        dropped: Rc<Cell<u32>>,
    }

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    impl Component for DropFlag {
        fn capabilities(&self) -> Capabilities {
            Capabilities::empty()
        }
    }

    #[test]
    fn test_actor_dying_during_own_update_is_reaped_same_call() {
        let dropped = Rc::new(Cell::new(0));
        let mut world = World::new();
        let mut actor = Actor::with_behavior(Box::new(DieImmediately));
        actor.add_component(Box::new(DropFlag {
            dropped: Rc::clone(&dropped),
        }));
        let key = world.add_actor(actor);

        let report = world.update(0.016);

        assert_eq!(report.destroyed, vec![key]);
        assert!(!world.contains(key));
        assert!(world.live_actors().is_empty());
        // Destructor ran exactly once, cascading to components.
        assert_eq!(dropped.get(), 1);
    }

    #[test]
    fn test_remove_actor_is_idempotent() {
        let mut world = World::new();
        let a = world.add_actor(Actor::new());
        let b = world.add_actor(Actor::new());

        world.remove_actor(a);
        world.remove_actor(a);

        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert_eq!(world.live_actors(), &[b]);
    }

    #[test]
    fn test_swap_pop_removal_reorders_remainder() {
        let mut world = World::new();
        let a = world.add_actor(Actor::new());
        let b = world.add_actor(Actor::new());
        let c = world.add_actor(Actor::new());

        world.remove_actor(a);
        // Last entry was swapped into the hole.
        assert_eq!(world.live_actors(), &[c, b]);
    }

    #[test]
    fn test_paused_actor_component_state_unchanged() {
        let ticks = Rc::new(Cell::new(0));
        let mut world = World::new();
        let key = world.add_actor(ticking_actor(&ticks));
        world
            .actor_mut(key)
            .unwrap()
            .set_state(ActorState::Paused);

        world.update(0.016);
        assert_eq!(ticks.get(), 0);

        world.actor_mut(key).unwrap().set_state(ActorState::Active);
        world.update(0.016);
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn test_ctx_remove_destroys_after_pass() {
        struct RemoveOther {
            target: ActorKey,
        }
        impl ActorBehavior for RemoveOther {
            fn update(&mut self, _actor: &mut Actor, ctx: &mut UpdateContext, _dt: f32) {
                ctx.remove(self.target);
            }
        }

        let ticks = Rc::new(Cell::new(0));
        let mut world = World::new();
        let target = world.add_actor(ticking_actor(&ticks));
        world.add_actor(Actor::with_behavior(Box::new(RemoveOther { target })));

        let report = world.update(0.016);
        assert!(report.destroyed.contains(&target));
        assert!(!world.contains(target));
        // The target still got its update this frame; removal applies after
        // the pass, never mid-iteration.
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn test_clear_destroys_everything() {
        let mut world = World::new();
        world.add_actor(Actor::new());
        world.add_actor(Actor::new());
        world.clear();
        assert!(world.is_empty());
        assert!(world.live_actors().is_empty());
    }
}
