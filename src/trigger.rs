/*

    Door trigger: an oriented box polled once per tick
    with the position of whoever may walk through it.

    Entering the box reports Opened right away. Leaving it
    starts a countdown of `closing_time` seconds, at the end
    of which Closed is reported. Re-entering during the
    countdown cancels it and reports Opened again.

    Only the events are produced here, playing animations
    or sounds is up to the caller.

    @date: 22 Nov, 2025
*/

use crate::geometry::rotation_xyz;
use crate::obb::Obb;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    Opened,
    Closed,
}

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct TriggerConfig {
    #[serde(deserialize_with = "deser_vec3")]
    pub position: Vector3,

    /// Degrees, applied as Rx * Ry * Rz
    #[serde(deserialize_with = "deser_vec3")]
    pub rotation: Vector3,

    #[default(Vector3::ONE)]
    #[serde(deserialize_with = "deser_vec3")]
    pub half_widths: Vector3,

    #[default = 5.0]
    #[serde(deserialize_with = "deser_float")]
    pub closing_time: Float,

    #[default = true]
    #[serde(deserialize_with = "deser_bool")]
    pub active: bool,
}

#[derive(Debug, Clone, SmartDefault)]
pub struct DoorTrigger {
    #[default(Obb::unit())]
    bounds: Obb,
    #[default = true]
    active: bool,
    #[default = 5.0]
    closing_time: Float,
    countdown: Float,
    inside: bool,
}

impl DoorTrigger {
    pub fn new(bounds: Obb) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    /// Box centered at `position`, axes are the rows of `orientation`
    pub fn from_placement(position: Vector3, orientation: &Matrix3, half_widths: Vector3) -> Self {
        Self::new(Obb::from_rotation(position, half_widths, orientation))
    }

    pub fn from_config(config: &TriggerConfig) -> Self {
        let r = radians3(config.rotation);
        let mut trigger = Self::from_placement(config.position, &rotation_xyz(r.x, r.y, r.z), config.half_widths);
        trigger.set_closing_time(config.closing_time);
        trigger.set_active(config.active);
        trigger
    }

    pub fn bounds(&self) -> &Obb {
        &self.bounds
    }

    /// Replace the box, e.g. after the owning entity moved. Keeps inside/countdown state.
    pub fn set_bounds(&mut self, bounds: Obb) {
        self.bounds = bounds;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn closing_time(&self) -> Float {
        self.closing_time
    }

    /// Negative values are ignored
    pub fn set_closing_time(&mut self, dt: Float) {
        if dt >= 0.0 {
            self.closing_time = dt;
        } else {
            warn!("Ignoring negative closing time {}", dt);
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Seconds left before Closed fires, zero when not counting down
    pub fn countdown(&self) -> Float {
        self.countdown
    }

    /// Advance by `dt` seconds with the tracked point at `point`
    pub fn poll(&mut self, dt: Float, point: &Vector3) -> Option<DoorEvent> {
        // nothing to do, door is disabled
        if !self.active {
            return None;
        }

        if self.bounds.contains_point(point) {
            self.countdown = 0.0;
            if self.inside {
                return None;
            }
            // was outside, now inside
            self.inside = true;
            debug!("Door trigger entered at {}", point);
            return Some(DoorEvent::Opened);
        }

        // was inside, now outside
        if self.inside {
            self.inside = false;
            self.countdown = self.closing_time;
            debug!("Door trigger left, closing in {}s", self.closing_time);
            if self.countdown > 0.0 {
                return None;
            }
        }
        else if self.countdown > 0.0 {
            self.countdown -= dt;
        }
        else {
            return None;
        }

        if self.countdown <= 0.0 {
            self.countdown = 0.0;
            debug!("Door trigger closed");
            return Some(DoorEvent::Closed);
        }
        None
    }
}
