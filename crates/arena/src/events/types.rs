use battle_core::{EndReason, MatchId, Outcome};
use serde::{Deserialize, Serialize};

/// Match lifecycle transitions, published in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArenaEvent {
    Queued {
        match_id: MatchId,
        priority: i32,
    },
    Started {
        match_id: MatchId,
    },
    Completed {
        match_id: MatchId,
        outcome: Outcome,
        reason: EndReason,
        rounds: u32,
    },
    Failed {
        match_id: MatchId,
        error: String,
    },
    Cancelled {
        match_id: MatchId,
    },
}

impl ArenaEvent {
    pub fn match_id(&self) -> &MatchId {
        match self {
            Self::Queued { match_id, .. }
            | Self::Started { match_id }
            | Self::Completed { match_id, .. }
            | Self::Failed { match_id, .. }
            | Self::Cancelled { match_id } => match_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = ArenaEvent::Completed {
            match_id: MatchId::from("m-7"),
            outcome: Outcome::SideA,
            reason: EndReason::Elimination,
            rounds: 4,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "completed");
        assert_eq!(json["match_id"], "m-7");
        assert_eq!(json["outcome"], "side_a");
        assert_eq!(json["rounds"], 4);

        let back: ArenaEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
