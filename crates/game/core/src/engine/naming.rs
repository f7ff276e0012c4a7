//! Display names derived from loaded counts.

use crate::state::{AmmunitionRef, ChamberCount, LoadedAmmunition};

/// `Loaded (2/3)`
pub(super) fn simple_chambers(base: &str, count: ChamberCount) -> String {
    format!("{base} ({}/{})", count.loaded, count.capacity)
}

/// `Loaded (Round) (2/3)` or `Loaded (2 Round, 1 Silver Round) (3/6)`
pub(super) fn capacity(base: &str, ammunition: &[LoadedAmmunition], count: ChamberCount) -> String {
    match ammunition {
        [] => simple_chambers(base, count),
        [only] => format!(
            "{base} ({}) ({}/{})",
            only.ammunition.name, count.loaded, count.capacity
        ),
        entries => {
            let description = entries
                .iter()
                .map(|entry| format!("{} {}", entry.quantity, entry.ammunition.name))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{base} ({description}) ({}/{})", count.loaded, count.capacity)
        }
    }
}

/// `Loaded Round 2/3`
pub(super) fn capacity_floaty(
    base: &str,
    ammunition: &AmmunitionRef,
    count: ChamberCount,
) -> String {
    format!(
        "{base} {} {}/{}",
        ammunition.name, count.loaded, count.capacity
    )
}

/// `Loaded (Round)`
pub(super) fn with_ammunition(base: &str, ammunition: Option<&AmmunitionRef>) -> String {
    match ammunition {
        Some(ammunition) => format!("{base} ({})", ammunition.name),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemId, SourceId};

    fn ammo(name: &str, source: u32) -> AmmunitionRef {
        AmmunitionRef {
            id: ItemId(source),
            source_id: SourceId(source),
            name: name.to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn capacity_name_lists_each_type_when_mixed() {
        let entries = vec![
            LoadedAmmunition {
                ammunition: ammo("Round", 1),
                quantity: 2,
            },
            LoadedAmmunition::one(ammo("Silver Round", 2)),
        ];

        assert_eq!(
            capacity("Loaded", &entries, ChamberCount::new(3, 6)),
            "Loaded (2 Round, 1 Silver Round) (3/6)"
        );
        assert_eq!(
            capacity("Loaded", &entries[..1], ChamberCount::new(2, 6)),
            "Loaded (Round) (2/6)"
        );
    }
}
