//! Keyed scalar animation curves.
//!
//! Keys are kept sorted by time with unique times. Edits go through
//! [`AnimCurve::modify_key_at`], which stages a single key insertion/update
//! and applies it on [`KeyModify::commit`]; an uncommitted session leaves the
//! curve exactly as it was.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::time::SceneTime;

/// How the segment starting at a key is interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Hold the key's value until the next key.
    Constant,
    #[default]
    Linear,
    /// Cubic Hermite using the keys' slopes.
    Cubic,
}

/// Tangent slopes (value units per second) on either side of a key.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KeySlopes {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub right: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub time: SceneTime,
    pub value: f32,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub slopes: KeySlopes,
}

impl Key {
    pub fn new(time: SceneTime, value: f32) -> Self {
        Self {
            time,
            value,
            interpolation: Interpolation::default(),
            slopes: KeySlopes::default(),
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimCurve {
    /// Value reported when the curve has no keys.
    #[serde(default)]
    pub default_value: f32,
    #[serde(default)]
    keys: Vec<Key>,
}

impl AnimCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a curve from keys in any order. Duplicate times are rejected.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Result<Self, DocumentError> {
        let mut keys: Vec<Key> = keys.into_iter().collect();
        keys.sort_by_key(|k| k.time);
        let curve = Self {
            default_value: 0.0,
            keys,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn with_default_value(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[inline]
    pub fn key(&self, index: usize) -> Option<&Key> {
        self.keys.get(index)
    }

    #[inline]
    pub fn key_value(&self, index: usize) -> Option<f32> {
        self.keys.get(index).map(|k| k.value)
    }

    /// Index of the key at exactly `time`.
    pub fn find_key(&self, time: SceneTime) -> Option<usize> {
        self.keys.binary_search_by_key(&time, |k| k.time).ok()
    }

    /// Set the value of an existing key. Returns false when `index` is out of
    /// bounds.
    pub fn set_value(&mut self, index: usize, value: f32) -> bool {
        match self.keys.get_mut(index) {
            Some(key) => {
                key.value = value;
                true
            }
            None => false,
        }
    }

    /// Sample the curve at `time`.
    pub fn evaluate(&self, time: SceneTime) -> f32 {
        let keys = &self.keys;
        let (first, last) = match (keys.first(), keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.default_value,
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        let next = match keys.binary_search_by_key(&time, |k| k.time) {
            Ok(idx) => return keys[idx].value,
            Err(idx) => idx,
        };
        let k0 = &keys[next - 1];
        let k1 = &keys[next];
        let u = time.fraction_between(k0.time, k1.time);
        match k0.interpolation {
            Interpolation::Constant => k0.value,
            Interpolation::Linear => lerp(k0.value, k1.value, u),
            Interpolation::Cubic => {
                let dt = (k1.time.as_seconds() - k0.time.as_seconds()) as f32;
                hermite(
                    k0.value,
                    k0.slopes.right * dt,
                    k1.value,
                    k1.slopes.left * dt,
                    u as f32,
                )
            }
        }
    }

    /// Open a modify session for the key at `time`, staging a new key if
    /// none exists there yet.
    pub fn modify_key_at(&mut self, time: SceneTime) -> KeyModify<'_> {
        let (index, created, value, interpolation) =
            match self.keys.binary_search_by_key(&time, |k| k.time) {
                Ok(idx) => (idx, false, self.keys[idx].value, self.keys[idx].interpolation),
                Err(idx) => {
                    let inherited = if idx > 0 {
                        self.keys[idx - 1].interpolation
                    } else {
                        self.keys
                            .get(idx)
                            .map(|k| k.interpolation)
                            .unwrap_or_default()
                    };
                    (idx, true, self.evaluate(time), inherited)
                }
            };
        KeyModify {
            curve: self,
            index,
            created,
            time,
            value,
            interpolation,
        }
    }

    /// Check ordering and finiteness invariants.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.default_value.is_finite() {
            return Err(DocumentError::invalid("curve default value must be finite"));
        }
        for pair in self.keys.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(DocumentError::invalid(format!(
                    "key times must be strictly increasing ({} then {})",
                    pair[0].time, pair[1].time
                )));
            }
        }
        if let Some(key) = self.keys.iter().find(|k| !k.value.is_finite()) {
            return Err(DocumentError::invalid(format!(
                "key value at {} is not finite",
                key.time
            )));
        }
        Ok(())
    }
}

#[inline]
fn lerp(a: f32, b: f32, u: f64) -> f32 {
    (a as f64 + (b as f64 - a as f64) * u) as f32
}

fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * t3 - 3.0 * t2 + 1.0) * p0
        + (t3 - 2.0 * t2 + t) * m0
        + (-2.0 * t3 + 3.0 * t2) * p1
        + (t3 - t2) * m1
}

/// Outcome of a committed key edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCommit {
    pub index: usize,
    pub created: bool,
}

/// Staged edit of one key. Nothing touches the curve until [`commit`].
///
/// [`commit`]: KeyModify::commit
#[must_use = "a key edit has no effect until committed"]
#[derive(Debug)]
pub struct KeyModify<'a> {
    curve: &'a mut AnimCurve,
    index: usize,
    created: bool,
    time: SceneTime,
    value: f32,
    interpolation: Interpolation,
}

impl KeyModify<'_> {
    /// Index the key has (or will have once inserted).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether committing inserts a new key.
    #[inline]
    pub fn created(&self) -> bool {
        self.created
    }

    /// Staged value; for a new key this starts as the curve's evaluation at
    /// the key time.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn commit(self) -> KeyCommit {
        let KeyModify {
            curve,
            index,
            created,
            time,
            value,
            interpolation,
        } = self;
        if created {
            curve.keys.insert(
                index,
                Key {
                    time,
                    value,
                    interpolation,
                    slopes: KeySlopes::default(),
                },
            );
        } else {
            curve.keys[index].value = value;
        }
        KeyCommit { index, created }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(ticks: i64) -> SceneTime {
        SceneTime(ticks)
    }

    fn curve(points: &[(i64, f32)]) -> AnimCurve {
        AnimCurve::from_keys(points.iter().map(|&(tk, v)| Key::new(t(tk), v))).expect("valid curve")
    }

    #[test]
    fn from_keys_sorts_and_rejects_duplicates() {
        let c = curve(&[(20, 2.0), (0, 0.0), (10, 1.0)]);
        let times: Vec<i64> = c.keys().iter().map(|k| k.time.ticks()).collect();
        assert_eq!(times, vec![0, 10, 20]);

        let dup = AnimCurve::from_keys([Key::new(t(5), 1.0), Key::new(t(5), 2.0)]);
        assert!(dup.is_err());
    }

    #[test]
    fn evaluate_holds_ends_and_interpolates_linearly() {
        let c = curve(&[(0, 0.0), (100, 10.0)]);
        assert_relative_eq!(c.evaluate(t(-50)), 0.0);
        assert_relative_eq!(c.evaluate(t(25)), 2.5);
        assert_relative_eq!(c.evaluate(t(100)), 10.0);
        assert_relative_eq!(c.evaluate(t(500)), 10.0);
    }

    #[test]
    fn evaluate_empty_uses_default_value() {
        let c = AnimCurve::new().with_default_value(4.25);
        assert_eq!(c.evaluate(t(42)), 4.25);
    }

    #[test]
    fn evaluate_constant_and_cubic() {
        let c = AnimCurve::from_keys([
            Key::new(t(0), 1.0).with_interpolation(Interpolation::Constant),
            Key::new(t(100), 3.0),
        ])
        .expect("valid curve");
        assert_eq!(c.evaluate(t(99)), 1.0);

        // Flat slopes: smoothstep, symmetric around the midpoint.
        let c = AnimCurve::from_keys([
            Key::new(t(0), 0.0).with_interpolation(Interpolation::Cubic),
            Key::new(t(100), 1.0),
        ])
        .expect("valid curve");
        assert_relative_eq!(c.evaluate(t(50)), 0.5, epsilon = 1e-6);
        assert!(c.evaluate(t(10)) < 0.1);
    }

    #[test]
    fn modify_existing_key_updates_in_place() {
        let mut c = curve(&[(0, 1.0), (10, 2.0)]);
        let mut edit = c.modify_key_at(t(10));
        assert!(!edit.created());
        assert_eq!(edit.value(), 2.0);
        edit.set_value(0.0);
        let commit = edit.commit();
        assert_eq!(commit, KeyCommit { index: 1, created: false });
        assert_eq!(c.key_count(), 2);
        assert_eq!(c.key_value(1), Some(0.0));
    }

    #[test]
    fn modify_new_key_inserts_sorted_with_evaluated_default() {
        let mut c = curve(&[(0, 0.0), (100, 10.0)]);
        let edit = c.modify_key_at(t(50));
        assert!(edit.created());
        assert_eq!(edit.index(), 1);
        assert_relative_eq!(edit.value(), 5.0);
        edit.commit();
        assert_eq!(c.key_count(), 3);
        assert_eq!(c.find_key(t(50)), Some(1));
        assert_relative_eq!(c.key_value(1).unwrap(), 5.0);
    }

    #[test]
    fn inserted_key_inherits_neighbour_interpolation() {
        let mut c = AnimCurve::from_keys([
            Key::new(t(0), 0.0).with_interpolation(Interpolation::Constant),
            Key::new(t(100), 1.0),
        ])
        .expect("valid curve");
        c.modify_key_at(t(50)).commit();
        assert_eq!(c.key(1).unwrap().interpolation, Interpolation::Constant);

        c.modify_key_at(t(-10)).commit();
        assert_eq!(c.key(0).unwrap().interpolation, Interpolation::Constant);
    }

    #[test]
    fn dropped_session_leaves_curve_untouched() {
        let mut c = curve(&[(0, 1.0)]);
        let before = c.clone();
        {
            let mut edit = c.modify_key_at(t(30));
            edit.set_value(9.0);
        }
        assert_eq!(c, before);
    }

    #[test]
    fn set_value_out_of_bounds() {
        let mut c = curve(&[(0, 1.0)]);
        assert!(c.set_value(0, 2.0));
        assert!(!c.set_value(3, 2.0));
        assert_eq!(c.key_value(0), Some(2.0));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let c = AnimCurve::from_keys([Key::new(t(0), f32::NAN)]);
        assert!(c.is_err());
    }
}
