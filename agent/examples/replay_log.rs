//! Replay Log Example
//!
//! Feeds a recorded battle log through the agent and prints the commands it
//! would send. Frames in the log are separated by blank lines and each starts
//! with a `>battle-...` header.
//!
//! ```text
//! cargo run -p duelist-agent --example replay_log -- [LOG] [CONFIG]
//! ```
//!
//! Without arguments a short built-in log is replayed.

use anyhow::Result;
use duelist_agent::{AgentConfig, RandomPolicy};

const SAMPLE_LOG: &str = r#">battle-gen7ou-42
|init|battle
|player|p1|duelist|1|
|player|p2|opponent|2|
|gametype|singles
|gen|7
|switch|p1a: Pikachu|Pikachu, L50, M|100/100
|switch|p2a: Snorlax|Snorlax, F|100/100
|turn|1

>battle-gen7ou-42
|request|{"rqid":1,"active":[{"moves":[{"move":"Thunderbolt","id":"thunderbolt","pp":24,"maxpp":24,"disabled":false},{"move":"Quick Attack","id":"quickattack","pp":48,"maxpp":48,"disabled":false}]}],"side":{"name":"duelist","id":"p1","pokemon":[{"ident":"p1: Pikachu","details":"Pikachu, L50, M","condition":"100/100","active":true},{"ident":"p1: Gengar","details":"Gengar, M","condition":"260/260","active":false}]}}

>battle-gen7ou-42
|move|p1a: Pikachu|Thunderbolt|p2a: Snorlax
|-damage|p2a: Snorlax|72/100
|move|p2a: Snorlax|Body Slam|p1a: Pikachu
|-damage|p1a: Pikachu|0 fnt
|faint|p1a: Pikachu
|upkeep

>battle-gen7ou-42
|request|{"rqid":2,"forceSwitch":[true],"side":{"name":"duelist","id":"p1","pokemon":[{"ident":"p1: Pikachu","details":"Pikachu, L50, M","condition":"0 fnt","active":true},{"ident":"p1: Gengar","details":"Gengar, M","condition":"260/260","active":false}]}}

>battle-gen7ou-42
|win|opponent"#;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let log = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_LOG.to_string(),
    };
    let config = match args.next() {
        Some(path) => AgentConfig::from_path(path)?,
        None => AgentConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    let mut agent = duelist_agent::spawn(&config, RandomPolicy::new())?;

    let frames = agent.frames.clone();
    let feeder = tokio::spawn(async move {
        for frame in log.split("\n\n").filter(|f| !f.trim().is_empty()) {
            if frames.send(frame.to_string()).await.is_err() {
                break;
            }
        }
    });
    drop(agent.frames);

    while let Some(message) = agent.commands.recv().await {
        println!("{}", message.to_wire_format());
    }

    feeder.await?;
    agent.task.await??;
    Ok(())
}
