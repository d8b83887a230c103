//! Ring spawner
//!
//! Rings are emitted around an anchor point that drifts between five
//! waypoints (four inset corners plus the screen center). The spawn timer
//! speeds up and rings shrink a little with every spawn, which is the whole
//! difficulty ramp.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::ease::Ease;
use super::ring::{Projection, Ring, RingShape};
use super::timer::RepeatingTimer;
use super::tween::Tween;
use crate::tuning::{RingTuning, SpawnStyle, SpawnTuning, Tuning};

/// Spawn interval and ring size, both ramping down toward a floor
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSchedule {
    interval_ms: u32,
    base_radius: u32,
    min_interval_ms: u32,
    min_base_radius: u32,
    interval_factor: f32,
    radius_factor: f32,
}

impl SpawnSchedule {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            interval_ms: tuning.start_interval_ms,
            base_radius: tuning.start_base_radius,
            min_interval_ms: tuning.min_interval_ms,
            min_base_radius: tuning.min_base_radius,
            interval_factor: tuning.interval_factor,
            radius_factor: tuning.radius_factor,
        }
    }

    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[inline]
    pub fn base_radius(&self) -> u32 {
        self.base_radius
    }

    /// One difficulty step
    pub fn ramp(&mut self) {
        self.interval_ms = scale_floor(self.interval_ms, self.interval_factor).max(self.min_interval_ms);
        self.base_radius = scale_floor(self.base_radius, self.radius_factor).max(self.min_base_radius);
    }
}

#[inline]
fn scale_floor(value: u32, factor: f32) -> u32 {
    (value as f64 * factor as f64).floor() as u32
}

/// The five drift waypoints for a screen of size `bounds`
pub fn drift_waypoints(bounds: Vec2, margin: f32) -> Vec<Vec2> {
    let (w, h) = (bounds.x, bounds.y);
    vec![
        Vec2::new(margin, margin),         // top-left
        Vec2::new(w - margin, margin),     // top-right
        Vec2::new(w - margin, h - margin), // bottom-right
        Vec2::new(margin, h - margin),     // bottom-left
        Vec2::new(w / 2.0, h / 2.0),       // center
    ]
}

/// Endless chain of eased moves between shuffled waypoints
#[derive(Debug, Clone)]
pub struct AnchorDrift {
    anchor: Vec2,
    waypoints: Vec<Vec2>,
    queue: VecDeque<Vec2>,
    last: Option<Vec2>,
    leg: Option<Tween>,
    min_leg_ms: u32,
    max_leg_ms: u32,
}

impl AnchorDrift {
    /// Leg durations are floored at 1 ms so a chain always advances
    pub fn new(start: Vec2, waypoints: Vec<Vec2>, min_leg_ms: u32, max_leg_ms: u32) -> Self {
        let min_leg_ms = min_leg_ms.max(1);
        Self {
            anchor: start,
            waypoints,
            queue: VecDeque::new(),
            last: None,
            leg: None,
            min_leg_ms,
            max_leg_ms: max_leg_ms.max(min_leg_ms),
        }
    }

    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Leg currently in flight, if the drift has started
    #[inline]
    pub fn leg(&self) -> Option<&Tween> {
        self.leg.as_ref()
    }

    /// Begin the chain at `now_ms`; no-op if already running
    pub fn start(&mut self, now_ms: f64, rng: &mut impl Rng) {
        if self.leg.is_none() {
            self.begin_leg(now_ms, rng);
        }
    }

    /// Next waypoint to visit, reshuffling when a cycle is exhausted
    pub fn next_waypoint(&mut self, rng: &mut impl Rng) -> Vec2 {
        if self.queue.is_empty() {
            self.refill(rng);
        }
        let target = self.queue.pop_front().unwrap_or(self.anchor);
        self.last = Some(target);
        target
    }

    fn refill(&mut self, rng: &mut impl Rng) {
        let mut order = self.waypoints.clone();
        order.shuffle(rng);
        // Never revisit the point we just reached across the cycle seam
        if order.len() > 1 && self.last.is_some_and(|last| order[0] == last) {
            order.rotate_left(1);
        }
        self.queue = order.into();
    }

    fn begin_leg(&mut self, at_ms: f64, rng: &mut impl Rng) {
        let target = self.next_waypoint(rng);
        let duration = rng.random_range(self.min_leg_ms..=self.max_leg_ms);
        log::trace!(
            "Anchor drift: ({:.0}, {:.0}) -> ({:.0}, {:.0}) over {} ms",
            self.anchor.x,
            self.anchor.y,
            target.x,
            target.y,
            duration
        );
        self.leg = Some(Tween::new(
            self.anchor,
            target,
            at_ms,
            duration as f64,
            Ease::SineInOut,
        ));
    }

    /// Advance to `now_ms`, chaining as many legs as have completed
    pub fn update(&mut self, now_ms: f64, rng: &mut impl Rng) -> Vec2 {
        loop {
            let Some(leg) = self.leg.as_ref() else {
                break;
            };
            if !leg.is_finished(now_ms) {
                self.anchor = leg.sample(now_ms);
                break;
            }
            let (reached, ended_at) = (leg.to, leg.end_ms());
            self.anchor = reached;
            self.begin_leg(ended_at, rng);
        }
        self.anchor
    }
}

/// Emits rings on a ramping timer around the drifting anchor
#[derive(Debug, Clone)]
pub struct RingSpawner {
    rings: RingTuning,
    style: SpawnStyle,
    schedule: SpawnSchedule,
    drift: AnchorDrift,
    timer: Option<RepeatingTimer>,
    spawned: u32,
}

impl RingSpawner {
    /// Spawner for a screen of size `bounds`; the anchor starts at its center
    pub fn new(bounds: Vec2, tuning: &Tuning) -> Self {
        let spawn = &tuning.spawn;
        let waypoints = drift_waypoints(bounds, spawn.waypoint_margin);
        Self {
            rings: tuning.rings.clone(),
            style: spawn.style,
            schedule: SpawnSchedule::new(spawn),
            drift: AnchorDrift::new(bounds * 0.5, waypoints, spawn.drift_min_ms, spawn.drift_max_ms),
            timer: None,
            spawned: 0,
        }
    }

    #[inline]
    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    #[inline]
    pub fn drift(&self) -> &AnchorDrift {
        &self.drift
    }

    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.drift.anchor()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Total rings emitted so far
    #[inline]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Start the spawn timer and the anchor drift
    pub fn start(&mut self, now_ms: f64, rng: &mut impl Rng) {
        self.drift.start(now_ms, rng);
        if self.timer.is_none() {
            self.timer = Some(RepeatingTimer::start(
                now_ms,
                self.schedule.interval_ms() as f64,
            ));
            log::debug!(
                "Spawner started: interval {} ms, base radius {}",
                self.schedule.interval_ms(),
                self.schedule.base_radius()
            );
        }
    }

    /// Cancel the spawn timer. Drift and rings already in flight continue.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("Spawner stopped after {} rings", self.spawned);
        }
    }

    /// Advance drift and fire any due spawns. `next_id` supplies ring ids.
    pub fn update(&mut self, now_ms: f64, rng: &mut impl Rng, next_id: &mut u32) -> Vec<Ring> {
        self.drift.update(now_ms, rng);

        let mut spawned = Vec::new();
        loop {
            let Some(fired_at) = self.timer.as_mut().and_then(|timer| timer.poll(now_ms)) else {
                break;
            };

            let id = *next_id;
            *next_id += 1;
            spawned.push(self.spawn_one(id, now_ms, rng));

            self.schedule.ramp();
            let interval = self.schedule.interval_ms();
            if let Some(timer) = self.timer.as_mut() {
                timer.set_delay(fired_at, interval as f64);
            }
        }
        spawned
    }

    fn spawn_one(&mut self, id: u32, now_ms: f64, rng: &mut impl Rng) -> Ring {
        let wobble = self.rings.wobble.max(0);
        let jitter = Vec2::new(
            rng.random_range(-wobble..=wobble) as f32,
            rng.random_range(-wobble..=wobble) as f32,
        );
        let anchor = self.drift.anchor();

        let shape = match self.style {
            SpawnStyle::Perspective => RingShape::perspective(Projection {
                center: anchor,
                offset: jitter,
                base_radius: self.schedule.base_radius() as f32,
                z_start: self.rings.z_start,
                z_end: self.rings.z_end,
                focal: self.rings.focal,
            }),
            SpawnStyle::Flat => RingShape::flat(anchor + jitter, self.rings.flat_radius),
        };

        self.spawned += 1;
        log::debug!(
            "Ring {} spawned at ({:.0}, {:.0}), next in {} ms",
            id,
            anchor.x,
            anchor.y,
            self.schedule.interval_ms()
        );
        Ring::new(id, shape, self.rings.lifetime_ms, now_ms)
    }
}
