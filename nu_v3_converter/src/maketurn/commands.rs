//! Serialization of command records.

use serde::Serialize;
use serde_json::Value;

/// The document uploaded to the server: one `commands` section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TurnDocument {
    pub commands: Vec<String>,
}

/// Serializes one entity into its command record
/// (`Kind<id>=key1:::value1|||key2:::value2|||…`).
///
/// Every field of the entity goes in, including the ones the converter never
/// interpreted; the server rejects commands with missing fields.
pub fn command<T: Serialize>(kind: &str, id: i32, entity: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(entity)?;
    let Value::Object(map) = value else {
        anyhow::bail!("{kind} {id} did not serialize to an object");
    };

    let fields: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{key}:::{}", value_text(value)))
        .collect();
    Ok(format!("{kind}{id}={}", fields.join("|||")))
}

/// Whether two entities serialize identically; untouched entities produce
/// no command.
pub fn unchanged<T: Serialize>(a: &T, b: &T) -> bool {
    match (serde_json::to_value(a), serde_json::to_value(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_model::planet::Stock;

    #[test]
    fn commands_carry_every_field() {
        let mut stock = Stock {
            id: 12,
            starbaseid: 3,
            stocktype: 5,
            stockid: 2,
            amount: 7,
            builtamount: 7,
            ..Stock::default()
        };
        stock
            .extra
            .insert("opaque".to_owned(), serde_json::json!("kept"));

        let text = command("Stock", stock.id, &stock).unwrap();
        assert!(text.starts_with("Stock12="));
        assert!(text.contains("amount:::7"));
        assert!(text.contains("opaque:::kept"));
        assert!(text.contains("|||"));
    }

    #[test]
    fn unchanged_entities_are_detected() {
        let stock = Stock::default();
        assert!(unchanged(&stock, &stock.clone()));

        let mut edited = stock.clone();
        edited.amount = 1;
        assert!(!unchanged(&stock, &edited));
    }
}
