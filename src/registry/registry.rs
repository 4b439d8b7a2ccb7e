use chrono::{DateTime, Utc};

use crate::frames::{
    earth_fixed_to_geodetic, inertial_to_fixed, inertial_velocity_to_fixed, range_rate_km_s,
    EarthFixedVector, LocalFrame,
};
use crate::observer::ObserverLocation;
use crate::propagation::{GmstClock, Propagator, SiderealClock};
use crate::registry::object::{Identity, ObjectState, TrackedObject};
use crate::signal;

/// Catalog of tracked objects and the current best-signal selection.
///
/// At most one object carries the active flag, and only while it is visible
/// with a non-zero signal. Ticks take `&mut self`, so callers sharing a
/// registry across tasks serialize them behind a lock.
pub struct Registry<P: Propagator, C = GmstClock> {
    propagator: P,
    clock: C,
    objects: Vec<TrackedObject<P::Elements>>,
    active: Option<usize>,
}

impl<P: Propagator, C: SiderealClock> Registry<P, C> {
    pub fn new(propagator: P, clock: C) -> Self {
        Self {
            propagator,
            clock,
            objects: Vec::new(),
            active: None,
        }
    }

    /// Registers an object at the end of the catalog and returns its
    /// position. An object that is already present (same catalog number, or
    /// same name when unnumbered) keeps its position and gets the new
    /// elements, with its derived state reset.
    pub fn add(&mut self, identity: Identity, elements: P::Elements) -> usize {
        match self.position_of(&identity) {
            Some(index) => {
                log::debug!("Replacing elements for {}", identity.name);
                self.objects[index] = TrackedObject::new(identity, elements);
                if self.active == Some(index) {
                    self.active = None;
                    self.reselect_active();
                }
                index
            }
            None => {
                self.objects.push(TrackedObject::new(identity, elements));
                self.objects.len() - 1
            }
        }
    }

    /// Removes the first object with this name.
    pub fn remove(&mut self, name: &str) -> Option<TrackedObject<P::Elements>> {
        let index = self.position(name)?;
        let removed = self.objects.remove(index);
        match self.active {
            Some(active) if active == index => {
                self.active = None;
                self.reselect_active();
            }
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.active = None;
    }

    /// Swaps in a freshly loaded catalog, e.g. after a TLE reload.
    pub fn replace_catalog<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Identity, P::Elements)>,
    {
        self.clear();
        for (identity, elements) in entries {
            self.add(identity, elements);
        }
        log::info!("Catalog replaced, {} objects tracked", self.objects.len());
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in catalog order.
    pub fn objects(&self) -> &[TrackedObject<P::Elements>] {
        &self.objects
    }

    /// First object with this name.
    pub fn get(&self, name: &str) -> Option<&TrackedObject<P::Elements>> {
        self.objects.iter().find(|o| o.identity.name == name)
    }

    pub fn get_by_catalog_number(&self, catalog_number: u64) -> Option<&TrackedObject<P::Elements>> {
        self.objects
            .iter()
            .find(|o| o.identity.catalog_number == Some(catalog_number))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.identity.name == name)
    }

    fn position_of(&self, identity: &Identity) -> Option<usize> {
        self.objects
            .iter()
            .position(|o| o.identity.same_object(identity))
    }

    /// One tick: every object is updated against the same observer position
    /// and sidereal angle, then the selection is recomputed.
    pub fn update_all(&mut self, observer: &ObserverLocation, time: DateTime<Utc>) {
        let frame = LocalFrame::at(observer.position_earth_fixed());
        let sidereal = self.clock.sidereal_angle(time);

        let mut failures = 0;
        for object in self.objects.iter_mut() {
            if !refresh(object, &self.propagator, &frame, sidereal, time) {
                failures += 1;
            }
        }
        if failures > 0 {
            log::debug!(
                "Tick {}: {} of {} objects failed to propagate",
                time,
                failures,
                self.objects.len()
            );
        }

        self.reselect_active();
    }

    /// Updates a single object and recomputes the selection. Returns the
    /// object's new state, or `None` if it is not registered.
    pub fn update_one(
        &mut self,
        identity: &Identity,
        observer_fixed: EarthFixedVector,
        time: DateTime<Utc>,
    ) -> Option<ObjectState> {
        let index = self.position_of(identity)?;
        let frame = LocalFrame::at(observer_fixed);
        let sidereal = self.clock.sidereal_angle(time);
        refresh(
            &mut self.objects[index],
            &self.propagator,
            &frame,
            sidereal,
            time,
        );
        self.reselect_active();
        Some(self.objects[index].state)
    }

    /// Picks the visible object with the strictly greatest signal; the first
    /// in catalog order wins a tie.
    pub fn reselect_active(&mut self) {
        let previous = self.active.take();
        if let Some(object) = previous.and_then(|i| self.objects.get_mut(i)) {
            object.is_active = false;
        }

        let mut best: Option<usize> = None;
        for (i, object) in self.objects.iter().enumerate() {
            if !object.signal.has_signal() {
                continue;
            }
            match best {
                Some(b)
                    if object.signal.signal_strength
                        <= self.objects[b].signal.signal_strength => {}
                _ => best = Some(i),
            }
        }

        if let Some(index) = best {
            self.objects[index].is_active = true;
            self.active = Some(index);
        }

        let previous_name = previous
            .and_then(|i| self.objects.get(i))
            .map(|o| o.identity.name.as_str());
        let current_name = best.map(|i| self.objects[i].identity.name.as_str());
        if previous_name != current_name {
            match current_name {
                Some(name) => log::info!("Best object is now {}", name),
                None => log::info!("No object visible"),
            }
        }
    }

    /// Visible objects, strongest first. Equal strengths keep catalog order.
    pub fn visible_sorted(&self) -> Vec<&TrackedObject<P::Elements>> {
        let mut visible: Vec<_> = self.objects.iter().filter(|o| o.signal.visible).collect();
        visible.sort_by(|a, b| {
            b.signal
                .signal_strength
                .total_cmp(&a.signal.signal_strength)
        });
        visible
    }

    pub fn visible_count(&self) -> usize {
        self.objects.iter().filter(|o| o.signal.visible).count()
    }

    pub fn best(&self) -> Option<&TrackedObject<P::Elements>> {
        self.active.and_then(|i| self.objects.get(i))
    }
}

/// Propagates one object and stores its derived fields. A propagation
/// failure marks the object not visible but keeps the cached positions.
/// Returns whether propagation succeeded.
fn refresh<P: Propagator>(
    object: &mut TrackedObject<P::Elements>,
    propagator: &P,
    frame: &LocalFrame,
    sidereal: f64,
    time: DateTime<Utc>,
) -> bool {
    let state = match propagator.propagate(&object.elements, time) {
        Ok(state) => state,
        Err(e) => {
            log::debug!("{}: {}", object.identity.name, e);
            object.state = ObjectState::Uninitialized;
            object.signal = signal::SignalState::NONE;
            object.last_error = Some(e.to_string());
            return false;
        }
    };
    object.state = ObjectState::Propagated;

    let fixed = inertial_to_fixed(&state.position, sidereal);
    let fixed_velocity = inertial_velocity_to_fixed(&state.position, &state.velocity, sidereal);
    let fix = frame.look_at(&fixed);
    let signal = signal::evaluate(fix.elevation_deg, fix.range_km);

    object.inertial = Some(state);
    object.earth_fixed = Some(fixed);
    object.earth_fixed_velocity = Some(fixed_velocity);
    object.ground_point = Some(earth_fixed_to_geodetic(&fixed));
    object.topocentric = Some(fix);
    object.range_rate_km_s = Some(range_rate_km_s(&frame.origin(), &fixed, &fixed_velocity));
    object.signal = signal;
    object.state = if signal.visible {
        ObjectState::Visible
    } else {
        ObjectState::NotVisible
    };
    object.last_update = Some(time);
    object.last_error = None;
    true
}
