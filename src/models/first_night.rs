use serde::{Deserialize, Serialize};

/// Per-character night rules as computed by the backend. The wire names keep the
/// backend's spelling.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CharacterActionInfo {
    #[serde(rename = "recieve_information")]
    pub receive_information: bool,
    #[serde(rename = "information_recieved")]
    pub information_received: Option<String>,
    pub action: Option<String>,
    pub response_required: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FirstNightPlayer {
    pub player_id: String,
    pub player_name: String,
    pub character_id: Option<i64>,
    pub character_name: Option<String>,
    pub designation: Option<String>,
    pub first_night_order: Option<i64>,
    pub character_action_info: CharacterActionInfo,
}

impl FirstNightPlayer {
    pub fn packet(&self, information_received: String) -> FirstNightPacket {
        return FirstNightPacket {
            player_id: self.player_id.clone(),
            character_id: self.character_id,
            designation: self.designation.clone(),
            first_night_order: self.first_night_order,
            receives_information: self.character_action_info.receive_information,
            information_received,
            action: self.character_action_info.action.clone(),
            response_required: self.character_action_info.response_required,
        };
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FirstNightPacket {
    pub player_id: String,
    pub character_id: Option<i64>,
    pub designation: Option<String>,
    pub first_night_order: Option<i64>,
    pub receives_information: bool,
    pub information_received: String,
    pub action: Option<String>,
    pub response_required: bool,
}
