//! Read-only predicates over a loadout.

use crate::config::TrackingMode;
use crate::engine::ReloadError;
use crate::state::{ActorLoadout, RecordKind, WeaponConfig};

/// Returns true when reloading `weapon` would have no effect.
///
/// Capacity weapons are full when every chamber is loaded, advanced repeating
/// weapons when they are cocked, and everything else as soon as a loaded
/// record exists.
pub fn is_fully_loaded(loadout: &ActorLoadout, weapon: &WeaponConfig, mode: TrackingMode) -> bool {
    if mode == TrackingMode::Advanced && weapon.is_repeating {
        return loadout.record(weapon.id, RecordKind::Loaded).is_some();
    }
    loadout
        .loaded_state(weapon.id)
        .is_some_and(|state| state.is_full())
}

/// Same check as [`is_fully_loaded`], reported as the warning a reload would raise.
pub fn check_fully_loaded(
    loadout: &ActorLoadout,
    weapon: &WeaponConfig,
    mode: TrackingMode,
) -> Result<(), ReloadError> {
    if !is_fully_loaded(loadout, weapon, mode) {
        return Ok(());
    }
    let name = weapon.name.clone();
    let cocks = mode == TrackingMode::Advanced && weapon.is_repeating;
    if weapon.multi_round_capacity().is_some() && !cocks {
        Err(ReloadError::AlreadyFullyLoaded { weapon: name })
    } else {
        Err(ReloadError::AlreadyLoaded { weapon: name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;
    use crate::state::{ChamberCount, LoadedState, RecordBody};

    fn simple(loaded: u8, capacity: u8) -> RecordBody {
        RecordBody::Loaded(LoadedState::Simple {
            base_name: "Loaded".into(),
            chambers: Some(ChamberCount::new(loaded, capacity)),
        })
    }

    #[test]
    fn partially_loaded_capacity_weapon_is_not_full() {
        let weapon = WeaponConfig::new(REVOLVER, "Revolver").chambered(3);
        let loadout = gunner()
            .with_weapon(weapon.clone())
            .with_record(REVOLVER, "Loaded (2/3)", simple(2, 3));

        assert!(!is_fully_loaded(&loadout, &weapon, TrackingMode::Simple));
        assert_eq!(check_fully_loaded(&loadout, &weapon, TrackingMode::Simple), Ok(()));
    }

    #[test]
    fn full_capacity_weapon_reports_fully_loaded() {
        let weapon = WeaponConfig::new(REVOLVER, "Revolver").chambered(3);
        let loadout = gunner()
            .with_weapon(weapon.clone())
            .with_record(REVOLVER, "Loaded (3/3)", simple(3, 3));

        assert!(matches!(
            check_fully_loaded(&loadout, &weapon, TrackingMode::Simple),
            Err(ReloadError::AlreadyFullyLoaded { .. })
        ));
    }

    #[test]
    fn single_round_weapon_is_full_once_loaded() {
        let weapon = WeaponConfig::new(PISTOL, "Pistol");
        let empty = gunner().with_weapon(weapon.clone());
        assert!(!is_fully_loaded(&empty, &weapon, TrackingMode::Simple));

        let loaded = empty.with_record(
            PISTOL,
            "Loaded",
            RecordBody::Loaded(LoadedState::Simple {
                base_name: "Loaded".into(),
                chambers: None,
            }),
        );
        assert!(matches!(
            check_fully_loaded(&loaded, &weapon, TrackingMode::Simple),
            Err(ReloadError::AlreadyLoaded { .. })
        ));
    }

    #[test]
    fn cocked_repeater_is_full() {
        let weapon = WeaponConfig::new(REPEATER, "Repeater").with_capacity(8).repeating();
        let loadout = gunner()
            .with_weapon(weapon.clone())
            .with_record(REPEATER, "Loaded", RecordBody::Loaded(LoadedState::Cocked));

        assert!(is_fully_loaded(&loadout, &weapon, TrackingMode::Advanced));
        assert!(matches!(
            check_fully_loaded(&loadout, &weapon, TrackingMode::Advanced),
            Err(ReloadError::AlreadyLoaded { .. })
        ));
    }
}
