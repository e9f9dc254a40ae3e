mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod request;

pub use battle::{Gender, HpStatus, Player, PokemonDetails, PokemonRef, Stat, to_id};
pub use request::{
    ActivePokemon, BattleRequest, MoveSlot, SideInfo, SidePokemon, SidePokemonStats,
};

use crate::ParseError;
use battle::require;

/// A WebSocket frame: optional `>ROOMID` header followed by protocol lines
#[derive(Debug, Clone, PartialEq)]
pub struct ServerFrame {
    pub room_id: Option<String>,
    pub lines: Vec<String>,
}

/// Split a complete frame into its room id and non-empty lines
pub fn parse_server_frame(frame: &str) -> ServerFrame {
    let mut lines = frame.lines().peekable();
    let mut room_id = None;

    // Check if first line is >ROOMID
    if let Some(room) = lines.peek().and_then(|l| l.strip_prefix('>')) {
        room_id = Some(room.trim().to_string());
        lines.next();
    }

    let lines = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().to_string())
        .collect();

    ServerFrame { room_id, lines }
}

/// Split one protocol line on the `|` delimiter.
///
/// Token 0 is the room marker (usually empty), token 1 the message kind.
pub fn split_line(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n']).split('|').collect()
}

/// Every battle message kind the tracker distinguishes.
///
/// Kinds that carry no trackable state land in [`BattleEvent::Ignored`]; kinds
/// the tracker has never heard of land in [`BattleEvent::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // === Initialization ===
    Player {
        player: Player,
        username: String,
    },
    TeamSize {
        player: Player,
        size: u8,
    },
    GameType(String),
    Gen(u8),
    Tier(String),

    // === Progress ===
    Turn(u32),
    Win(String),
    Tie,
    /// Raw JSON payload of a |request| line
    Request(String),

    // === Major actions ===
    Switch {
        pokemon: PokemonRef,
        details: PokemonDetails,
        condition: String,
    },
    Drag {
        pokemon: PokemonRef,
        details: PokemonDetails,
        condition: String,
    },
    DetailsChange {
        pokemon: PokemonRef,
        details: PokemonDetails,
        condition: Option<String>,
    },
    FormeChange {
        pokemon: PokemonRef,
        species: String,
        condition: Option<String>,
    },
    Move {
        pokemon: PokemonRef,
        move_name: String,
        target: Option<PokemonRef>,
    },
    Faint(PokemonRef),

    // === HP ===
    Damage {
        pokemon: PokemonRef,
        condition: String,
    },
    Heal {
        pokemon: PokemonRef,
        condition: String,
    },
    SetHp {
        pokemon: PokemonRef,
        condition: String,
    },

    // === Status ===
    Status {
        pokemon: PokemonRef,
        status: String,
    },
    CureStatus {
        pokemon: PokemonRef,
        status: String,
    },
    CureTeam(PokemonRef),

    // === Boosts ===
    Boost {
        pokemon: PokemonRef,
        stat: Stat,
        amount: i32,
    },
    Unboost {
        pokemon: PokemonRef,
        stat: Stat,
        amount: i32,
    },
    SetBoost {
        pokemon: PokemonRef,
        stat: Stat,
        amount: i32,
    },
    ClearBoost(PokemonRef),
    ClearAllBoost,
    ClearPositiveBoost(PokemonRef),
    ClearNegativeBoost(PokemonRef),
    InvertBoost(PokemonRef),
    CopyBoost {
        source: PokemonRef,
        target: PokemonRef,
    },

    // === Field ===
    Weather {
        weather: String,
        upkeep: bool,
    },
    SideStart {
        side: Player,
        condition: String,
    },
    SideEnd {
        side: Player,
        condition: String,
    },

    // === Volatiles ===
    VolatileStart {
        pokemon: PokemonRef,
        effect: String,
        detail: Option<String>,
    },
    VolatileEnd {
        pokemon: PokemonRef,
        effect: String,
    },

    // === Revealed information and transformations ===
    Ability {
        pokemon: PokemonRef,
        ability: String,
    },
    Item {
        pokemon: PokemonRef,
        item: String,
    },
    EndItem {
        pokemon: PokemonRef,
        item: String,
    },
    Mega {
        pokemon: PokemonRef,
        megastone: Option<String>,
    },
    Primal(PokemonRef),
    Transform {
        pokemon: PokemonRef,
        into: Option<PokemonRef>,
    },
    Terastallize {
        pokemon: PokemonRef,
        tera_type: String,
    },

    /// Cosmetic or informational kind with no tracked state
    Ignored(String),
    /// Kind not in the vocabulary
    Unknown(String),
}

/// Kinds that are explicitly ignored: animations, flavor text, room chatter
pub const IGNORED_KINDS: &[&str] = &[
    "",
    "-activate",
    "-anim",
    "-block",
    "-center",
    "-combine",
    "-crit",
    "-endability",
    "-fail",
    "-fieldactivate",
    "-fieldend",
    "-fieldstart",
    "-hint",
    "-hitcount",
    "-immune",
    "-message",
    "-miss",
    "-mustrecharge",
    "-notarget",
    "-nothing",
    "-prepare",
    "-resisted",
    "-singlemove",
    "-singleturn",
    "-supereffective",
    "-swapsideconditions",
    "-waiting",
    "-zbroken",
    "-zpower",
    "badge",
    "bigerror",
    "c",
    "c:",
    "cant",
    "chat",
    "clearpoke",
    "debug",
    "deinit",
    "error",
    "html",
    "inactive",
    "inactiveoff",
    "init",
    "j",
    "J",
    "join",
    "l",
    "L",
    "leave",
    "message",
    "n",
    "N",
    "name",
    "poke",
    "rated",
    "raw",
    "replace",
    "rule",
    "seed",
    "sentchoice",
    "start",
    "swap",
    "t:",
    "teampreview",
    "timestamp",
    "title",
    "uhtml",
    "upkeep",
];

/// Parse one protocol line into a [`BattleEvent`]
pub fn parse_battle_line(line: &str) -> Result<BattleEvent, ParseError> {
    if line.trim().is_empty() {
        return Err(ParseError::EmptyMessage);
    }
    parse_battle_event(&split_line(line))
}

/// Classify pre-split tokens by their kind (token 1) and parse the fields
pub fn parse_battle_event(parts: &[&str]) -> Result<BattleEvent, ParseError> {
    require(parts, 2)?;

    match parts[1] {
        "player" => battle_init::parse_player(parts),
        "teamsize" => battle_init::parse_teamsize(parts),
        "gametype" => battle_init::parse_gametype(parts),
        "gen" => battle_init::parse_gen(parts),
        "tier" => battle_init::parse_tier(parts),

        "turn" => battle_progress::parse_turn(parts),
        "win" => battle_progress::parse_win(parts),
        "tie" => Ok(BattleEvent::Tie),
        "request" => battle_progress::parse_request(parts),

        "switch" => battle_major::parse_switch(parts),
        "drag" => battle_major::parse_drag(parts),
        "detailschange" => battle_major::parse_detailschange(parts),
        "-formechange" => battle_major::parse_formechange(parts),
        "move" => battle_major::parse_move(parts),
        "faint" => battle_major::parse_faint(parts),

        "-damage" => battle_minor::parse_damage(parts),
        "-heal" => battle_minor::parse_heal(parts),
        "-sethp" => battle_minor::parse_sethp(parts),
        "-status" => battle_minor::parse_status(parts),
        "-curestatus" => battle_minor::parse_curestatus(parts),
        "-cureteam" => battle_minor::parse_cureteam(parts),
        "-boost" => battle_minor::parse_boost(parts),
        "-unboost" => battle_minor::parse_unboost(parts),
        "-setboost" => battle_minor::parse_setboost(parts),
        "-clearboost" => battle_minor::parse_clearboost(parts),
        "-clearallboost" => Ok(BattleEvent::ClearAllBoost),
        "-clearpositiveboost" => battle_minor::parse_clearpositiveboost(parts),
        "-clearnegativeboost" => battle_minor::parse_clearnegativeboost(parts),
        "-invertboost" => battle_minor::parse_invertboost(parts),
        "-copyboost" => battle_minor::parse_copyboost(parts),
        "-weather" => battle_minor::parse_weather(parts),
        "-sidestart" => battle_minor::parse_sidestart(parts),
        "-sideend" => battle_minor::parse_sideend(parts),
        "-start" => battle_minor::parse_start(parts),
        "-end" => battle_minor::parse_end(parts),
        "-ability" => battle_minor::parse_ability(parts),
        "-item" => battle_minor::parse_item(parts),
        "-enditem" => battle_minor::parse_enditem(parts),
        "-mega" => battle_minor::parse_mega(parts),
        "-primal" => battle_minor::parse_primal(parts),
        "-transform" => battle_minor::parse_transform(parts),
        "-terastallize" => battle_minor::parse_terastallize(parts),

        kind if IGNORED_KINDS.contains(&kind) => Ok(BattleEvent::Ignored(kind.to_string())),
        kind => Ok(BattleEvent::Unknown(kind.to_string())),
    }
}
