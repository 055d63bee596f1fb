//! Actor: a positioned entity owning an ordered set of components

use crate::assets::TextureCache;
use crate::foundation::math::{Transform2, Vec2};
use crate::render::Canvas;

use super::component::{Capabilities, Component, ComponentId};
use super::world::UpdateContext;

/// Actor lifecycle state
///
/// `Active` and `Paused` may toggle freely; `Dead` is terminal. A dead
/// actor receives no further updates and is destroyed by the world's next
/// reap pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorState {
    /// Updated and drawn every frame
    #[default]
    Active,
    /// Skipped by the update pass; still drawn
    Paused,
    /// Scheduled for destruction at the next reap pass
    Dead,
}

/// Subclass-style extension point for actor-specific per-frame logic
///
/// Runs before the actor's components each frame, with mutable access to
/// the actor and to the world's deferred-mutation context.
pub trait ActorBehavior {
    /// Per-frame behavior; `dt` is elapsed seconds
    fn update(&mut self, actor: &mut Actor, ctx: &mut UpdateContext, dt: f32);
}

struct ComponentEntry {
    id: ComponentId,
    priority: i32,
    component: Box<dyn Component>,
}

/// A positioned, scaled, rotated entity with an ordered collection of
/// exclusively-owned components
///
/// Dropping an actor drops its components first, in insertion order, then
/// the remaining fields (field declaration order).
pub struct Actor {
    components: Vec<ComponentEntry>,
    behavior: Option<Box<dyn ActorBehavior>>,
    state: ActorState,
    transform: Transform2,
    next_component_id: u64,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor {
    /// Create an active actor at the origin with no components
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            behavior: None,
            state: ActorState::Active,
            transform: Transform2::default(),
            next_component_id: 0,
        }
    }

    /// Create an actor with a behavior extension
    pub fn with_behavior(behavior: Box<dyn ActorBehavior>) -> Self {
        Self {
            behavior: Some(behavior),
            ..Self::new()
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Change the lifecycle state
    ///
    /// `Dead` is terminal: once dead, further transitions are ignored.
    pub fn set_state(&mut self, state: ActorState) {
        if self.state == ActorState::Dead {
            return;
        }
        self.state = state;
    }

    /// Position in world space
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Uniform scale factor
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    /// Set the position; no validation
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    /// Set the uniform scale; negative or zero values are the caller's
    /// responsibility (deliberately not validated)
    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = rotation;
    }

    /// The full transform
    pub fn transform(&self) -> &Transform2 {
        &self.transform
    }

    /// Attach a component, keeping the collection ordered by priority
    ///
    /// The stable insert position is before the first component with
    /// strictly lower priority, so equal priorities keep insertion order.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;
        let priority = component.priority();
        let position = self
            .components
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(self.components.len());
        self.components.insert(
            position,
            ComponentEntry {
                id,
                priority,
                component,
            },
        );
        id
    }

    /// Detach and drop a component by identity; no-op when absent
    pub fn remove_component(&mut self, id: ComponentId) {
        if let Some(position) = self.components.iter().position(|entry| entry.id == id) {
            self.components.remove(position);
        }
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Identities of components that participate in the render pass,
    /// in collection order
    pub fn drawable_components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components
            .iter()
            .filter(|entry| entry.component.capabilities().contains(Capabilities::DRAW))
            .map(|entry| entry.id)
    }

    /// Advance this actor by one frame
    ///
    /// Does nothing unless the state is `Active`. Otherwise runs the
    /// behavior extension first, then every updatable component in
    /// collection order. `dt` is non-negative elapsed seconds; negative
    /// values are unspecified behavior, deliberately not clamped.
    pub fn update(&mut self, ctx: &mut UpdateContext, dt: f32) {
        if self.state != ActorState::Active {
            return;
        }
        if let Some(mut behavior) = self.behavior.take() {
            behavior.update(self, ctx, dt);
            if self.behavior.is_none() {
                self.behavior = Some(behavior);
            }
        }
        self.update_components(dt);
    }

    fn update_components(&mut self, dt: f32) {
        let transform = &mut self.transform;
        for entry in &mut self.components {
            if entry.component.capabilities().contains(Capabilities::UPDATE) {
                entry.component.update(transform, dt);
            }
        }
    }

    /// Draw one component by identity; reports whether it still exists
    pub(crate) fn draw_component(
        &self,
        id: ComponentId,
        assets: &TextureCache,
        canvas: &mut Canvas,
    ) -> bool {
        match self.components.iter().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.component.draw(&self.transform, assets, canvas);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingComponent {
        updates: Rc<Cell<u32>>,
        priority: i32,
        order_log: Rc<std::cell::RefCell<Vec<i32>>>,
    }

    impl Component for CountingComponent {
        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn update(&mut self, _owner: &mut Transform2, _dt: f32) {
            self.updates.set(self.updates.get() + 1);
            self.order_log.borrow_mut().push(self.priority);
        }
    }

    fn counting(
        priority: i32,
        updates: &Rc<Cell<u32>>,
        log: &Rc<std::cell::RefCell<Vec<i32>>>,
    ) -> Box<dyn Component> {
        Box::new(CountingComponent {
            updates: Rc::clone(updates),
            priority,
            order_log: Rc::clone(log),
        })
    }

    #[test]
    fn test_components_update_in_priority_order() {
        let updates = Rc::new(Cell::new(0));
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        actor.add_component(counting(10, &updates, &log));
        actor.add_component(counting(50, &updates, &log));
        actor.add_component(counting(10, &updates, &log));

        let mut ctx = UpdateContext::default();
        actor.update(&mut ctx, 0.016);

        assert_eq!(*log.borrow(), vec![50, 10, 10]);
        assert_eq!(updates.get(), 3);
    }

    #[test]
    fn test_paused_actor_skips_updates() {
        let updates = Rc::new(Cell::new(0));
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        actor.add_component(counting(0, &updates, &log));
        actor.set_position(Vec2::new(7.0, 7.0));
        actor.set_state(ActorState::Paused);

        let mut ctx = UpdateContext::default();
        actor.update(&mut ctx, 0.016);

        assert_eq!(updates.get(), 0);
        assert_eq!(actor.position(), Vec2::new(7.0, 7.0));
    }

    #[test]
    fn test_pause_resume_toggles_but_dead_is_terminal() {
        let mut actor = Actor::new();
        actor.set_state(ActorState::Paused);
        assert_eq!(actor.state(), ActorState::Paused);
        actor.set_state(ActorState::Active);
        assert_eq!(actor.state(), ActorState::Active);

        actor.set_state(ActorState::Dead);
        actor.set_state(ActorState::Active);
        assert_eq!(actor.state(), ActorState::Dead);
    }

    #[test]
    fn test_remove_component_is_noop_when_absent() {
        let updates = Rc::new(Cell::new(0));
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        let id = actor.add_component(counting(0, &updates, &log));
        actor.remove_component(id);
        assert_eq!(actor.component_count(), 0);
        // Second removal of the same identity is silently ignored.
        actor.remove_component(id);
        assert_eq!(actor.component_count(), 0);
    }

    #[test]
    fn test_behavior_runs_before_components() {
        struct MarkBehavior {
            log: Rc<std::cell::RefCell<Vec<i32>>>,
        }
        impl ActorBehavior for MarkBehavior {
            fn update(&mut self, _actor: &mut Actor, _ctx: &mut UpdateContext, _dt: f32) {
                self.log.borrow_mut().push(-1);
            }
        }

        let updates = Rc::new(Cell::new(0));
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut actor = Actor::with_behavior(Box::new(MarkBehavior {
            log: Rc::clone(&log),
        }));
        actor.add_component(counting(0, &updates, &log));

        let mut ctx = UpdateContext::default();
        actor.update(&mut ctx, 0.016);

        assert_eq!(*log.borrow(), vec![-1, 0]);
    }
}
