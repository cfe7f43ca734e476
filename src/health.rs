//! Health collaborator used by the quick slot
//!
//! The inventory never owns a character's health. It only needs to ask
//! whether healing makes sense and then apply it, so it talks to the
//! [`HealthPool`] trait. [`Health`] is the stock implementation.

/// What the inventory needs from a character's health
pub trait HealthPool {
    fn is_dead(&self) -> bool;

    fn current(&self) -> f32;

    fn max(&self) -> f32;

    /// Heals up to `amount`, capped at max; returns the amount actually healed
    fn heal(&mut self, amount: f32) -> f32;

    fn is_full(&self) -> bool {
        self.current() >= self.max()
    }
}

/// Represents a character's health points
///
/// Death is sticky: once current health reaches zero, further damage
/// and healing are ignored.
///
/// # Example
///
/// ```rust
/// use satchel::health::{Health, HealthPool};
///
/// let mut health = Health::new(100.0);
/// health.take_damage(30.0);
/// assert_eq!(health.current(), 70.0);
/// assert_eq!(health.percentage(), 0.7);
/// ```
#[derive(Debug, Clone)]
pub struct Health {
    current: f32,
    max: f32,
    dead: bool,
}

impl Health {
    /// Creates a new Health instance with full health
    ///
    /// A negative or non-finite max is treated as 0, which starts dead.
    pub fn new(max: f32) -> Self {
        Self::with_current(max, max)
    }

    /// Creates a Health instance at a given level (clamped to 0..=max)
    pub fn with_current(current: f32, max: f32) -> Self {
        let max = if max.is_finite() && max > 0.0 { max } else { 0.0 };
        let current = if current.is_nan() { 0.0 } else { current.clamp(0.0, max) };
        Health {
            current,
            max,
            dead: current <= 0.0,
        }
    }

    /// Returns health as a percentage (0.0 to 1.0)
    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    /// Applies damage to health
    ///
    /// Returns a `DamageResult` describing what happened.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        if self.dead {
            return DamageResult::no_damage();
        }

        let old_health = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        if self.current <= 0.0 {
            self.dead = true;
        }

        DamageResult {
            damage_dealt: old_health - self.current,
            is_fatal: self.dead,
        }
    }
}

impl HealthPool for Health {
    fn is_dead(&self) -> bool {
        self.dead
    }

    fn current(&self) -> f32 {
        self.current
    }

    fn max(&self) -> f32 {
        self.max
    }

    fn heal(&mut self, amount: f32) -> f32 {
        if self.dead {
            return 0.0;
        }
        let old_health = self.current;
        self.current = (self.current + amount).clamp(0.0, self.max);
        self.current - old_health
    }
}

/// Result of a damage operation
#[derive(Debug, Clone, PartialEq)]
pub struct DamageResult {
    /// Actual damage dealt (may be less than requested if target had less health)
    pub damage_dealt: f32,
    /// Whether this damage killed the target
    pub is_fatal: bool,
}

impl DamageResult {
    /// Creates a result representing no damage dealt
    pub fn no_damage() -> Self {
        DamageResult {
            damage_dealt: 0.0,
            is_fatal: false,
        }
    }
}
