use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::models::{OutcomeKind, SportParams};
use crate::errors::{EngineError, EngineResult};

/// Home and away totals of a directly comparable scoreboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTotals {
    pub home: i64,
    pub away: i64,
}

impl SideTotals {
    pub fn new(home: i64, away: i64) -> Self {
        Self { home, away }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriesLine {
    pub tries: i64,
    pub conversions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerLine {
    pub towers: i64,
    /// One flag per marker cone, `true` when knocked down
    pub cones: Vec<bool>,
}

/// Sport-specific scoreboard, one variant per outcome kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scoreboard {
    Goals(SideTotals),
    Sets(SideTotals),
    Points(SideTotals),
    Runs(SideTotals),
    Tries { home: TriesLine, away: TriesLine },
    TowerCapture { home: TowerLine, away: TowerLine },
    Generic(SideTotals),
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Home,
    Away,
}

impl Side {
    /// Legacy payloads name the away side either `away` or `visitor`
    fn suffixes(self) -> &'static [&'static str] {
        match self {
            Side::Home => &["home"],
            Side::Away => &["away", "visitor"],
        }
    }
}

impl Scoreboard {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Scoreboard::Goals(_) => OutcomeKind::Goals,
            Scoreboard::Sets(_) => OutcomeKind::Sets,
            Scoreboard::Points(_) => OutcomeKind::Points,
            Scoreboard::Runs(_) => OutcomeKind::Runs,
            Scoreboard::Tries { .. } => OutcomeKind::Tries,
            Scoreboard::TowerCapture { .. } => OutcomeKind::TowerCapture,
            Scoreboard::Generic(_) => OutcomeKind::Generic,
        }
    }

    /// Builds a typed scoreboard from a legacy key/value payload.
    ///
    /// Missing or non-numeric fields count as zero. Only a payload that is
    /// not a JSON object is rejected.
    pub fn from_payload(
        kind: OutcomeKind,
        payload: &Value,
        params: &SportParams,
    ) -> EngineResult<Scoreboard> {
        let fields = payload.as_object().ok_or_else(|| {
            EngineError::MalformedScoreboard(format!(
                "expected a key/value object, got {}",
                describe(payload)
            ))
        })?;

        let scoreboard = match kind {
            OutcomeKind::Goals => Scoreboard::Goals(read_totals(fields, "goals")),
            OutcomeKind::Sets => Scoreboard::Sets(read_totals(fields, "sets")),
            OutcomeKind::Points => Scoreboard::Points(read_totals(fields, "points")),
            OutcomeKind::Runs => Scoreboard::Runs(read_totals(fields, "runs")),
            OutcomeKind::Tries => Scoreboard::Tries {
                home: read_tries(fields, Side::Home),
                away: read_tries(fields, Side::Away),
            },
            OutcomeKind::TowerCapture => Scoreboard::TowerCapture {
                home: read_towers(fields, Side::Home, params.cone_slots),
                away: read_towers(fields, Side::Away, params.cone_slots),
            },
            OutcomeKind::Generic => Scoreboard::Generic(SideTotals::new(
                read_count(fields, &plain_keys(Side::Home)),
                read_count(fields, &plain_keys(Side::Away)),
            )),
        };

        Ok(scoreboard)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn side_keys(field: &str, side: Side) -> Vec<String> {
    side.suffixes()
        .iter()
        .map(|suffix| format!("{}_{}", field, suffix))
        .collect()
}

fn plain_keys(side: Side) -> Vec<String> {
    side.suffixes().iter().map(|s| s.to_string()).collect()
}

fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[String]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(key))
}

fn read_count(fields: &Map<String, Value>, keys: &[String]) -> i64 {
    match lookup(fields, keys) {
        None | Some(Value::Null) => 0,
        Some(value) => as_count(value).unwrap_or_else(|| {
            debug!("Ignoring non-numeric scoreboard field {:?}: {}", keys, value);
            0
        }),
    }
}

fn as_count(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v.trunc() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn read_flag(fields: &Map<String, Value>, keys: &[String]) -> bool {
    match lookup(fields, keys) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn read_totals(fields: &Map<String, Value>, field: &str) -> SideTotals {
    SideTotals::new(
        read_count(fields, &side_keys(field, Side::Home)),
        read_count(fields, &side_keys(field, Side::Away)),
    )
}

fn read_tries(fields: &Map<String, Value>, side: Side) -> TriesLine {
    TriesLine {
        tries: read_count(fields, &side_keys("tries", side)),
        conversions: read_count(fields, &side_keys("conversions", side)),
    }
}

fn read_towers(fields: &Map<String, Value>, side: Side, cone_slots: u8) -> TowerLine {
    let cones = (1..=cone_slots)
        .map(|slot| {
            let keys: Vec<String> = side
                .suffixes()
                .iter()
                .map(|suffix| format!("cone_{}_{}", suffix, slot))
                .collect();
            read_flag(fields, &keys)
        })
        .collect();

    TowerLine {
        towers: read_count(fields, &side_keys("towers", side)),
        cones,
    }
}
