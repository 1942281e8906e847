//! Helpers shared by the unit and property tests of every tree.

pub(crate) mod quick;
