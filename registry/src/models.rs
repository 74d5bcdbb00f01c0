use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role {other:?}")),
        }
    }
}

/// Staff account. Password is stored as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Fields this crate does not know, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Catalog entry, `chance` is a relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(rename = "nome")]
    pub name: String,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(
        rename = "cadastrado_por",
        default = "unknown_staff",
        deserialize_with = "staff_or_unknown"
    )]
    pub registered_by: String,
    #[serde(rename = "data_cadastro", default, deserialize_with = "string_or_empty")]
    pub registered_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "premio", default, deserialize_with = "string_or_empty")]
    pub prize: String,
    #[serde(rename = "data_sorteio", default, deserialize_with = "string_or_empty")]
    pub drawn_at: String,
    #[serde(
        rename = "atendente_cadastro",
        default = "unknown_staff",
        deserialize_with = "staff_or_unknown"
    )]
    pub registered_by: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn unknown_staff() -> String {
    "N/A".to_string()
}

// null reads the same as a missing field
fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn staff_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_staff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("Admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_deployed_field_names() {
        let record = DrawRecord {
            national_id: "12345678909".to_string(),
            prize: "Caneca".to_string(),
            drawn_at: "01/02/2025 10:00:00".to_string(),
            registered_by: "ana".to_string(),
            extra: Map::new(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["cpf"], "12345678909");
        assert_eq!(value["premio"], "Caneca");
        assert_eq!(value["data_sorteio"], "01/02/2025 10:00:00");
        assert_eq!(value["atendente_cadastro"], "ana");
    }

    #[test]
    fn test_participant_without_staff() {
        let participant: Participant =
            serde_json::from_str(r#"{"cpf": "12345678909", "data_cadastro": "x"}"#).unwrap();

        assert_eq!(participant.registered_by, "N/A");
    }

    #[test]
    fn test_draw_with_null_prize() {
        let record: DrawRecord =
            serde_json::from_str(r#"{"cpf": "12345678909", "premio": null}"#).unwrap();

        assert_eq!(record.prize, "");
        assert_eq!(record.drawn_at, "");
        assert_eq!(record.registered_by, "N/A");
    }

    #[test]
    fn test_unknown_fields_kept() {
        let json = r#"{"cpf":"12345678909","cadastrado_por":"ana","data_cadastro":"x","loja":"Centro"}"#;
        let participant: Participant = serde_json::from_str(json).unwrap();

        assert_eq!(participant.extra["loja"], "Centro");
        assert_eq!(serde_json::to_value(&participant).unwrap()["loja"], "Centro");
    }

    #[test]
    fn test_integer_chance() {
        let prize: Prize = serde_json::from_str(r#"{"nome": "Brinde", "chance": 3}"#).unwrap();

        assert_eq!(prize.chance, 3.0);
    }
}
