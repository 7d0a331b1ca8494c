//! Rendering of game messages and the synthesized advisories.

use nu_model::combat::{IonStorm, Minefield};
use nu_model::message::Message;
use nu_model::Snapshot;
use serde_json::Value;
use v3_format::messages::MessageKind;
use v3_format::text;

use crate::owner::OwnerMap;

/// Renders the inbox: game messages newest-first, then the synthesized
/// storm, minefield and configuration blocks.
pub fn render_inbox(snapshot: &Snapshot, owners: &OwnerMap) -> Vec<String> {
    let mut messages: Vec<&Message> = snapshot.messages.iter().collect();
    messages.sort_by(|a, b| b.id.cmp(&a.id));

    let mut out: Vec<String> = messages.into_iter().map(render_message).collect();

    for storm in &snapshot.ionstorms {
        out.push(render_storm(storm));
    }
    for mine in &snapshot.minefields {
        out.push(render_minefield(mine, snapshot, owners));
    }
    out.extend(render_config_digests(snapshot));

    out
}

/// Renders the outbox from `mymessages`.
pub fn render_outbox(snapshot: &Snapshot) -> Vec<String> {
    let mut messages: Vec<&Message> = snapshot.mymessages.iter().collect();
    messages.sort_by(|a, b| b.id.cmp(&a.id));

    messages
        .into_iter()
        .map(|message| {
            let header = MessageKind::Outbound.header(message.target);
            let body = text::word_wrap(&text::strip_html(&message.body), text::MESSAGE_WIDTH);
            format!("{header}\n{body}")
        })
        .collect()
}

fn render_message(message: &Message) -> String {
    let kind = MessageKind::try_from(message.messagetype).unwrap_or_else(|_| {
        log::warn!(
            "message {}: unknown type {}, treating as system",
            message.id,
            message.messagetype
        );
        MessageKind::System
    });

    let mut out = kind.header(message.target);
    if !message.headline.is_empty() {
        out.push('\n');
        out.push_str(&message.headline);
    }

    let body = text::word_wrap(&text::strip_html(&message.body), text::MESSAGE_WIDTH);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }

    if message.x != 0 && message.y != 0 && !names_location(&out, message.x, message.y) {
        out.push_str(&format!("\n\nLocation: ({}, {})", message.x, message.y));
    }

    out
}

/// Whether the text already mentions the coordinate pair.
fn names_location(body: &str, x: i32, y: i32) -> bool {
    let normalized = body.replace("( ", "(").replace(" )", ")");
    normalized.contains(&format!("({x}, {y})")) || normalized.contains(&format!("({x},{y})"))
}

fn render_storm(storm: &IonStorm) -> String {
    let class = match storm.voltage {
        ..=50 => "Harmless",
        51..=100 => "Moderate",
        101..=150 => "Strong",
        151..=200 => "Dangerous",
        _ => "Very dangerous",
    };
    let trend = if storm.isgrowing {
        "Growing"
    } else {
        "Weakening"
    };

    format!(
        "{}\nION Storm\nStorm #{}\nCentered at: ({}, {})\nVoltage: {}\nHeading: {}\nSpeed: Warp {}\nRadius: {}\nClass: {}\n{}",
        MessageKind::System.header(storm.id),
        storm.id,
        storm.x,
        storm.y,
        storm.voltage,
        storm.heading,
        storm.warp,
        storm.radius,
        class,
        trend,
    )
}

fn render_minefield(mine: &Minefield, snapshot: &Snapshot, owners: &OwnerMap) -> String {
    let race = owners.race(mine.ownerid);
    let owner = snapshot
        .races
        .iter()
        .find(|r| r.id == race)
        .map_or_else(|| format!("race {race}"), |r| r.adjective.clone());
    let kind = if mine.isweb { "Web mines" } else { "Mines" };

    format!(
        "{}\nMine field #{}\nAt: ({}, {})\nOwner: {}\nUnits: {}\nType: {}",
        MessageKind::MineScan.header(mine.id),
        mine.id,
        mine.x,
        mine.y,
        owner,
        mine.units,
        kind,
    )
}

/// The three synthesized configuration summaries: host settings, game
/// scalars, and every array either object carries.
fn render_config_digests(snapshot: &Snapshot) -> Vec<String> {
    let settings = serde_json::to_value(&snapshot.settings).unwrap_or(Value::Null);
    let game = serde_json::to_value(&snapshot.game).unwrap_or(Value::Null);

    let digest = |title: &str, body: String| {
        format!("{}\n{title}\n{body}", MessageKind::System.header(0))
    };

    vec![
        digest("Host settings", scalar_lines(&settings)),
        digest("Game configuration", scalar_lines(&game)),
        digest(
            "Configuration arrays",
            format!("{}{}", array_lines(&settings), array_lines(&game)),
        ),
    ]
}

fn scalar_lines(value: &Value) -> String {
    let Value::Object(map) = value else {
        return String::new();
    };
    let mut out = String::new();
    for (key, value) in map {
        match value {
            Value::Array(_) | Value::Object(_) => {}
            other => {
                out.push_str(&format!("{key} = {}\n", scalar_text(other)));
            }
        }
    }
    out
}

fn array_lines(value: &Value) -> String {
    let Value::Object(map) = value else {
        return String::new();
    };
    let mut out = String::new();
    for (key, value) in map {
        if let Value::Array(items) = value {
            let rendered: Vec<String> = items.iter().map(scalar_text).collect();
            out.push_str(&format!("{key} = {}\n", rendered.join(", ")));
        }
    }
    out
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_model::game::Player;

    fn owners() -> OwnerMap {
        OwnerMap::new(&[Player {
            id: 2,
            raceid: 7,
            ..Player::default()
        }])
    }

    #[test]
    fn messages_are_sorted_newest_first() {
        let snapshot = Snapshot {
            messages: vec![
                Message {
                    id: 1,
                    messagetype: 8,
                    body: "old".to_owned(),
                    target: 5,
                    ..Message::default()
                },
                Message {
                    id: 2,
                    messagetype: 8,
                    body: "new".to_owned(),
                    target: 5,
                    ..Message::default()
                },
            ],
            ..Snapshot::default()
        };

        let rendered = render_inbox(&snapshot, &owners());
        // Two game messages plus the three configuration digests.
        assert_eq!(rendered.len(), 5);
        assert!(rendered[0].contains("new"));
        assert!(rendered[1].contains("old"));
        assert!(rendered[0].starts_with("(-s0005)<<< Ship >>>"));
    }

    #[test]
    fn location_is_appended_once() {
        let message = Message {
            id: 1,
            messagetype: 14,
            body: "Sensors picked something up.".to_owned(),
            x: 2300,
            y: 1800,
            ..Message::default()
        };
        let rendered = render_message(&message);
        assert!(rendered.ends_with("Location: (2300, 1800)"));

        let message = Message {
            body: "Something at ( 2300, 1800 ) moved.".to_owned(),
            ..message
        };
        let rendered = render_message(&message);
        assert!(!rendered.contains("Location:"));
    }

    #[test]
    fn storm_classes() {
        let mut storm = IonStorm {
            id: 4,
            voltage: 40,
            isgrowing: true,
            ..IonStorm::default()
        };
        assert!(render_storm(&storm).contains("Harmless"));
        storm.voltage = 170;
        assert!(render_storm(&storm).contains("Dangerous"));
        storm.voltage = 300;
        assert!(render_storm(&storm).contains("Very dangerous"));
        assert!(render_storm(&storm).contains("Growing"));
    }
}
