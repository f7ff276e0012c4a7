use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Host identifier of an actor (character or NPC).
    ActorId,
    "actor"
);

id_type!(
    /// Host identifier of a token placed in the scene.
    TokenId,
    "token"
);

id_type!(
    /// Identifier of an inventory item: weapons and ammunition stacks.
    ItemId,
    "item"
);

id_type!(
    /// Compendium identity shared by every copy of the same ammunition.
    ///
    /// Two stacks of the same arrows carry different [`ItemId`]s but the same
    /// `SourceId`, which is what loaded chambers are grouped by.
    SourceId,
    "source"
);

id_type!(
    /// Identifier of a loaded-state, magazine, conjured-round or chamber record.
    RecordId,
    "record"
);
