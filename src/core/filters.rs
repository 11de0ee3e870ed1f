use crate::models::{Preset, Profile};

/// Check whether two profiles can meet without timezone friction
///
/// Virtual presets don't care about timezones.
#[inline]
pub fn timezone_compatible(a: &Profile, b: &Profile, preset: &Preset) -> bool {
    a.tz == b.tz || preset.is_virtual
}

/// Check whether a pair may be scored at all
///
/// In-person presets only pair people from the same city. This runs before
/// scoring and is separate from the timezone penalty applied inside it.
#[inline]
pub fn pair_eligible(a: &Profile, b: &Profile, preset: &Preset) -> bool {
    preset.is_virtual || a.city == b.city
}

/// Check whether a third member can join a pair
///
/// For in-person presets all three people must share one city.
#[inline]
pub fn pod_eligible(a: &Profile, b: &Profile, c: &Profile, preset: &Preset) -> bool {
    preset.is_virtual || (a.city == b.city && b.city == c.city)
}
