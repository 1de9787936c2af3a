//! Contact event dispatch
//!
//! The solver reports contacts as shape-handle pairs once per step. The
//! dispatcher holds per-shape callback lists and fans each event out to
//! both participants, in registration order, after the step that produced
//! it. Callbacks registered for a shape with contact events disabled never
//! fire until events are enabled on that shape.

use super::ShapeHandle;
use crate::foundation::math::Vec2;
use std::collections::HashMap;

/// Two shapes began touching
#[derive(Debug, Clone, Copy)]
pub struct ContactBegin {
    /// First participant
    pub shape_a: ShapeHandle,
    /// Second participant
    pub shape_b: ShapeHandle,
}

/// Two shapes stopped touching
#[derive(Debug, Clone, Copy)]
pub struct ContactEnd {
    /// First participant
    pub shape_a: ShapeHandle,
    /// Second participant
    pub shape_b: ShapeHandle,
}

/// A contact applied significant force during the step
#[derive(Debug, Clone, Copy)]
pub struct ContactHit {
    /// First participant
    pub shape_a: ShapeHandle,
    /// Second participant
    pub shape_b: ShapeHandle,
    /// Direction of the strongest force in the contact, unit length
    pub direction: Vec2,
    /// Magnitude of the total force applied across the contact
    pub force: f32,
}

/// One fixed step's worth of contact events, drained from the solver
#[derive(Debug, Default)]
pub struct ContactEvents {
    /// Contacts that started this step
    pub begin: Vec<ContactBegin>,
    /// Contacts that ended this step
    pub end: Vec<ContactEnd>,
    /// Force reports for contacts active this step
    pub hit: Vec<ContactHit>,
}

impl ContactEvents {
    /// Whether the batch carries no events at all
    pub fn is_empty(&self) -> bool {
        self.begin.is_empty() && self.end.is_empty() && self.hit.is_empty()
    }
}

type Callbacks<E> = HashMap<ShapeHandle, Vec<Box<dyn FnMut(&E)>>>;

/// Routes solver contact events to per-shape gameplay callbacks
#[derive(Default)]
pub struct CollisionDispatcher {
    begin: Callbacks<ContactBegin>,
    end: Callbacks<ContactEnd>,
    hit: Callbacks<ContactHit>,
}

impl CollisionDispatcher {
    /// Register a callback for contacts beginning on `shape`
    pub fn register_begin(
        &mut self,
        shape: ShapeHandle,
        callback: impl FnMut(&ContactBegin) + 'static,
    ) {
        self.begin.entry(shape).or_default().push(Box::new(callback));
    }

    /// Register a callback for contacts ending on `shape`
    pub fn register_end(
        &mut self,
        shape: ShapeHandle,
        callback: impl FnMut(&ContactEnd) + 'static,
    ) {
        self.end.entry(shape).or_default().push(Box::new(callback));
    }

    /// Register a callback for force reports on `shape`
    pub fn register_hit(
        &mut self,
        shape: ShapeHandle,
        callback: impl FnMut(&ContactHit) + 'static,
    ) {
        self.hit.entry(shape).or_default().push(Box::new(callback));
    }

    /// Drop every callback registered for `shape`.
    ///
    /// Called when the shape is destroyed so stale handles cannot
    /// accumulate registrations.
    pub fn unregister_shape(&mut self, shape: ShapeHandle) {
        self.begin.remove(&shape);
        self.end.remove(&shape);
        self.hit.remove(&shape);
    }

    /// Whether any callback is registered for `shape`
    pub fn has_callbacks(&self, shape: ShapeHandle) -> bool {
        self.begin.contains_key(&shape)
            || self.end.contains_key(&shape)
            || self.hit.contains_key(&shape)
    }

    /// Dispatch a batch of events to the callbacks of both participants
    pub fn process(&mut self, events: &ContactEvents) {
        for event in &events.begin {
            Self::fan_out(&mut self.begin, event.shape_a, event);
            Self::fan_out(&mut self.begin, event.shape_b, event);
        }
        for event in &events.end {
            Self::fan_out(&mut self.end, event.shape_a, event);
            Self::fan_out(&mut self.end, event.shape_b, event);
        }
        for event in &events.hit {
            Self::fan_out(&mut self.hit, event.shape_a, event);
            Self::fan_out(&mut self.hit, event.shape_b, event);
        }
    }

    fn fan_out<E>(callbacks: &mut Callbacks<E>, shape: ShapeHandle, event: &E) {
        if let Some(list) = callbacks.get_mut(&shape) {
            for callback in list.iter_mut() {
                callback(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapier2d::prelude::ColliderSet;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_shapes() -> (ShapeHandle, ShapeHandle) {
        let mut set = ColliderSet::new();
        let a = set.insert(rapier2d::prelude::ColliderBuilder::ball(0.5));
        let b = set.insert(rapier2d::prelude::ColliderBuilder::ball(0.5));
        (a, b)
    }

    #[test]
    fn begin_event_reaches_both_participants() {
        let (a, b) = two_shapes();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = CollisionDispatcher::default();

        let sink = Rc::clone(&hits);
        dispatcher.register_begin(a, move |_| sink.borrow_mut().push("a"));
        let sink = Rc::clone(&hits);
        dispatcher.register_begin(b, move |_| sink.borrow_mut().push("b"));

        let mut events = ContactEvents::default();
        events.begin.push(ContactBegin { shape_a: a, shape_b: b });
        dispatcher.process(&events);

        assert_eq!(*hits.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn callbacks_fire_in_registration_order() {
        let (a, b) = two_shapes();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = CollisionDispatcher::default();

        for tag in [1, 2, 3] {
            let sink = Rc::clone(&order);
            dispatcher.register_begin(a, move |_| sink.borrow_mut().push(tag));
        }

        let mut events = ContactEvents::default();
        events.begin.push(ContactBegin { shape_a: a, shape_b: b });
        dispatcher.process(&events);

        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn unregistered_shape_receives_nothing() {
        let (a, b) = two_shapes();
        let fired = Rc::new(RefCell::new(false));
        let mut dispatcher = CollisionDispatcher::default();

        let sink = Rc::clone(&fired);
        dispatcher.register_end(a, move |_| *sink.borrow_mut() = true);
        dispatcher.unregister_shape(a);
        assert!(!dispatcher.has_callbacks(a));

        let mut events = ContactEvents::default();
        events.end.push(ContactEnd { shape_a: a, shape_b: b });
        dispatcher.process(&events);

        assert!(!*fired.borrow());
    }

    #[test]
    fn hit_carries_force_payload() {
        let (a, b) = two_shapes();
        let seen = Rc::new(RefCell::new(None));
        let mut dispatcher = CollisionDispatcher::default();

        let sink = Rc::clone(&seen);
        dispatcher.register_hit(a, move |hit: &ContactHit| {
            *sink.borrow_mut() = Some((hit.direction, hit.force));
        });

        let mut events = ContactEvents::default();
        events.hit.push(ContactHit {
            shape_a: a,
            shape_b: b,
            direction: Vec2::new(0.0, 1.0),
            force: 12.5,
        });
        dispatcher.process(&events);

        let (direction, force) = seen.borrow().expect("hit callback fired");
        assert_eq!(direction, Vec2::new(0.0, 1.0));
        assert_eq!(force, 12.5);
    }
}
