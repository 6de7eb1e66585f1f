//! Crew and crew member records.
//!
//! Membership is normalized: a member points at its crew through `crew_id`,
//! and a crew's roster is derived from the member list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::Resource;

fn default_true() -> bool {
    true
}

/// A moving crew (team).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// DTO for creating or updating a crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Crew {
    /// Members assigned to this crew.
    pub fn members<'a>(&self, members: &'a [CrewMember]) -> impl Iterator<Item = &'a CrewMember> + use<'a> {
        let id = self.id;
        members.iter().filter(move |m| m.crew_id == Some(id))
    }
}

/// Role of a crew member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Team Lead")]
    TeamLead,
    Driver,
    Helper,
    Specialist,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::TeamLead,
        Position::Driver,
        Position::Helper,
        Position::Specialist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TeamLead => "Team Lead",
            Position::Driver => "Driver",
            Position::Helper => "Helper",
            Position::Specialist => "Specialist",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown position '{s}'"))
    }
}

/// Accepts a missing, null or empty position as `None`.
fn deserialize_position<'de, D>(deserializer: D) -> Result<Option<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// An individual crew member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    #[serde(default)]
    pub crew_id: Option<i64>,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_position")]
    pub position: Option<Position>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// DTO for creating or updating a crew member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMemberInput {
    pub crew_id: Option<i64>,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<Position>,
    pub is_active: bool,
}

impl Resource for Crew {
    type Input = CrewInput;

    const PATH: &'static str = "crews";
    const LABEL: &'static str = "Crew";

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn with_id(id: i64, input: CrewInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            is_active: input.is_active,
        }
    }

    fn to_input(&self) -> CrewInput {
        CrewInput {
            name: self.name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }
}

impl Resource for CrewMember {
    type Input = CrewMemberInput;

    const PATH: &'static str = "crew_members";
    const LABEL: &'static str = "Crew member";

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn with_id(id: i64, input: CrewMemberInput) -> Self {
        Self {
            id,
            crew_id: input.crew_id,
            name: input.name,
            phone: input.phone,
            email: input.email,
            position: input.position,
            is_active: input.is_active,
        }
    }

    fn to_input(&self) -> CrewMemberInput {
        CrewMemberInput {
            crew_id: self.crew_id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            position: self.position,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, crew_id: Option<i64>) -> CrewMember {
        CrewMember {
            id,
            crew_id,
            name: format!("Member {id}"),
            phone: None,
            email: None,
            position: Some(Position::Helper),
            is_active: true,
        }
    }

    #[test]
    fn test_position_wire_names() {
        assert_eq!(serde_json::to_string(&Position::TeamLead).unwrap(), "\"Team Lead\"");
        assert_eq!("Driver".parse::<Position>().unwrap(), Position::Driver);
        assert!("Boss".parse::<Position>().is_err());
    }

    #[test]
    fn test_member_tolerates_blank_position() {
        let json = r#"{"id":1,"name":"Sam","phone":null,"email":null,"position":""}"#;
        let m: CrewMember = serde_json::from_str(json).unwrap();
        assert_eq!(m.position, None);
        assert_eq!(m.crew_id, None);
        assert!(m.is_active);

        let json = r#"{"id":2,"name":"Kim","position":"Team Lead","is_active":false,"crew_id":4}"#;
        let m: CrewMember = serde_json::from_str(json).unwrap();
        assert_eq!(m.position, Some(Position::TeamLead));
        assert_eq!(m.crew_id, Some(4));
        assert!(!m.is_active);
    }

    #[test]
    fn test_member_rejects_unknown_position() {
        let json = r#"{"id":1,"name":"Sam","position":"Captain"}"#;
        assert!(serde_json::from_str::<CrewMember>(json).is_err());
    }

    #[test]
    fn test_crew_ignores_embedded_members() {
        let json = r#"{"id":1,"name":"Alpha","description":"Main","is_active":true,"members":[{"id":9}]}"#;
        let crew: Crew = serde_json::from_str(json).unwrap();
        assert_eq!(crew.name, "Alpha");
    }

    #[test]
    fn test_crew_members_join() {
        let crew = Crew {
            id: 1,
            name: "Alpha".to_string(),
            description: None,
            is_active: true,
        };
        let members = vec![member(1, Some(1)), member(2, Some(2)), member(3, Some(1)), member(4, None)];

        let ids: Vec<i64> = crew.members(&members).map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
