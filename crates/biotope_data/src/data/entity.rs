use serde::{Deserialize, Serialize};

/// Identifier of an organism, unique for the life of the process.
pub type OrganismId = u64;
/// Identifier of a vegetation cluster, unique for the life of the process.
pub type VegetationId = u64;

/// Identity and age shared by organisms and vegetation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    /// Species identifier.
    pub name: String,
    /// Age in days.
    pub age: u32,
    pub alive: bool,
}

impl Entity {
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32, id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            alive: true,
        }
    }
}
