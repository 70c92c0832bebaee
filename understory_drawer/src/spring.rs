// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spring parameters handed to the host animation primitive.
//!
//! The drawer only decides *what* a settle animation looks like: its duration,
//! its damping ratio and its initial velocity. Hosts that have a native spring
//! primitive can forward these directly. Hosts that tick animations on their
//! own clock can sample [`SpringAnimation::fraction_at`] every frame.

/// Residual amplitude of the spring envelope at `duration`.
const SETTLE_THRESHOLD: f64 = 1.0e-3;

/// Smallest damping ratio used when sampling the curve; an undamped spring
/// would never settle.
const MIN_DAMPING_RATIO: f64 = 0.05;

/// A spring-driven transition, parameterised like a duration-based spring.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpringAnimation {
    /// Duration in seconds.
    pub duration: f64,
    /// `1.0` settles without oscillation; values closer to `0.0` oscillate more.
    pub damping_ratio: f64,
    /// Initial velocity along the drawer axis, in thousands of value units per
    /// second.
    ///
    /// Its sign follows the drawer value. Primitives that only accept a speed
    /// should use [`SpringAnimation::initial_speed`].
    pub velocity: f64,
}

impl SpringAnimation {
    /// Creates spring parameters.
    #[must_use]
    pub const fn new(duration: f64, damping_ratio: f64, velocity: f64) -> Self {
        Self {
            duration,
            damping_ratio,
            velocity,
        }
    }

    /// Unsigned initial velocity.
    #[must_use]
    pub fn initial_speed(&self) -> f64 {
        self.velocity.abs()
    }

    /// Returns `true` if the animation has no duration and should be applied
    /// immediately.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.duration.is_nan() || self.duration <= 0.0
    }

    /// Progress of the spring at `elapsed` seconds.
    ///
    /// Starts at `0.0`, ends at exactly `1.0` once `elapsed >= duration` and may
    /// overshoot in between when underdamped. `initial_velocity` is expressed
    /// in fractions of the total distance per second.
    #[must_use]
    pub fn fraction_at(&self, elapsed: f64, initial_velocity: f64) -> f64 {
        if self.is_instant() || elapsed >= self.duration {
            return 1.0;
        }
        if elapsed <= 0.0 {
            return 0.0;
        }

        let zeta = if self.damping_ratio > MIN_DAMPING_RATIO {
            self.damping_ratio
        } else {
            MIN_DAMPING_RATIO
        };
        // Pick the natural frequency so the envelope `e^(-ζωt)` has decayed to
        // the settle threshold when `t == duration`.
        let omega = -libm::log(SETTLE_THRESHOLD) / (zeta * self.duration);

        // Displacement from the target, starting at -1.
        let x0 = -1.0;
        let v0 = initial_velocity;
        let t = elapsed;

        let displacement = if zeta < 1.0 {
            let omega_d = omega * libm::sqrt(1.0 - zeta * zeta);
            let envelope = libm::exp(-zeta * omega * t);
            envelope
                * (x0 * libm::cos(omega_d * t)
                    + (v0 + zeta * omega * x0) / omega_d * libm::sin(omega_d * t))
        } else if zeta == 1.0 {
            libm::exp(-omega * t) * (x0 + (v0 + omega * x0) * t)
        } else {
            let root = libm::sqrt(zeta * zeta - 1.0);
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            c1 * libm::exp(r1 * t) + c2 * libm::exp(r2 * t)
        };
        1.0 + displacement
    }

    /// Interpolated value between `from` and `to` at `elapsed` seconds.
    ///
    /// The initial velocity is taken from [`SpringAnimation::velocity`] and
    /// normalised by the travelled distance.
    #[must_use]
    pub fn value_at(&self, from: f64, to: f64, elapsed: f64) -> f64 {
        let distance = to - from;
        let normalized_velocity = if distance == 0.0 {
            0.0
        } else {
            self.velocity * 1000.0 / distance
        };
        from + distance * self.fraction_at(elapsed, normalized_velocity)
    }
}
