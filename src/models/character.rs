use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Character {
    pub character_id: i64,
    pub character_name: String,
    pub character_description: String,
    pub designation: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CharacterAssignment {
    pub player_id: String,
    pub character_id: Option<i64>,
}

pub fn find_by_name<'a>(characters: &'a [Character], name: &str) -> Option<&'a Character> {
    return characters.iter().find(|c| c.character_name == name);
}
