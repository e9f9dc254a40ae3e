/// A decision for the local side, as understood by `/choose`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// move SLOT [TARGET] [mega|zmove|terastallize]
    Move {
        /// Server move slot (1-based)
        slot: usize,
        /// Target position for multi-target formats
        target: Option<i32>,
        mega: bool,
        zmove: bool,
        terastallize: bool,
    },

    /// switch SLOT
    Switch {
        /// Server team slot (1-based)
        slot: usize,
    },
}

impl Choice {
    /// A plain move choice with no modifiers
    pub fn move_slot(slot: usize) -> Self {
        Self::Move {
            slot,
            target: None,
            mega: false,
            zmove: false,
            terastallize: false,
        }
    }

    /// Render the choice as the argument of `/choose`
    pub fn to_protocol_string(&self) -> String {
        match self {
            Self::Move {
                slot,
                target,
                mega,
                zmove,
                terastallize,
            } => {
                let mut text = format!("move {}", slot);
                if let Some(target) = target {
                    text.push_str(&format!(" {}", target));
                }
                if *mega {
                    text.push_str(" mega");
                }
                if *zmove {
                    text.push_str(" zmove");
                }
                if *terastallize {
                    text.push_str(" terastallize");
                }
                text
            }
            Self::Switch { slot } => format!("switch {}", slot),
        }
    }
}

/// Commands that clients can send to server
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// /choose CHOICE
    Choose(Choice),

    /// /forfeit
    Forfeit,

    /// Raw command for catch-all
    Raw(String),
}

impl ClientCommand {
    /// Serialize command to protocol format
    pub fn to_protocol_string(&self) -> String {
        match self {
            Self::Choose(choice) => format!("/choose {}", choice.to_protocol_string()),
            Self::Forfeit => "/forfeit".to_string(),
            Self::Raw(command) => command.clone(),
        }
    }
}

/// Client message with optional room context
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMessage {
    pub room_id: Option<String>,
    pub command: ClientCommand,
}

impl ClientMessage {
    /// A command addressed to a battle room
    pub fn in_room(room_id: impl Into<String>, command: ClientCommand) -> Self {
        Self {
            room_id: Some(room_id.into()),
            command,
        }
    }

    /// Serialize to wire format: ROOMID|TEXT or |TEXT
    pub fn to_wire_format(&self) -> String {
        let text = self.command.to_protocol_string();
        match &self.room_id {
            Some(room) => format!("{}|{}", room, text),
            None => format!("|{}", text),
        }
    }
}
