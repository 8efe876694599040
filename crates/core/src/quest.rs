//! The daily quest line and submission limits.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Score;

/// Longest accepted quest id.
pub const MAX_QUEST_ID_LEN: usize = 64;

/// Largest score a single quest submission may carry.
pub const MAX_QUEST_SCORE: Score = 1_000_000;

/// One stage of the daily quest line, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStage {
    /// Timed trivia.
    Trivia,
    /// Pattern memory.
    Pattern,
    /// Bias identification quiz.
    Bias,
}

impl QuestStage {
    /// All stages in play order.
    pub const ALL: [QuestStage; 3] = [QuestStage::Trivia, QuestStage::Pattern, QuestStage::Bias];

    /// Wire identifier, also used as the quest id on submission.
    pub fn id(self) -> &'static str {
        match self {
            QuestStage::Trivia => "trivia",
            QuestStage::Pattern => "pattern",
            QuestStage::Bias => "bias",
        }
    }

    /// First stage not yet completed, given the completed quest ids.
    pub fn first_pending<'a, I>(completed: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a String> + Clone,
    {
        Self::ALL.into_iter().find(|stage| {
            !completed
                .clone()
                .into_iter()
                .any(|id| id.as_str() == stage.id())
        })
    }
}

/// Reject quest submissions that could never come from a real client.
pub fn validate_submission(quest_id: &str, score: Score) -> Result<(), CoreError> {
    let trimmed = quest_id.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("questId must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_QUEST_ID_LEN {
        return Err(CoreError::Validation(format!(
            "questId must be at most {MAX_QUEST_ID_LEN} characters"
        )));
    }
    if !(0..=MAX_QUEST_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "score must be between 0 and {MAX_QUEST_SCORE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn stage_ids_are_the_wire_names() {
        let ids: Vec<&str> = QuestStage::ALL.into_iter().map(QuestStage::id).collect();
        assert_eq!(ids, vec!["trivia", "pattern", "bias"]);
    }

    #[test]
    fn first_pending_skips_completed() {
        let mut done = BTreeSet::new();
        assert_eq!(QuestStage::first_pending(&done), Some(QuestStage::Trivia));

        done.insert("trivia".to_string());
        assert_eq!(QuestStage::first_pending(&done), Some(QuestStage::Pattern));

        done.insert("pattern".to_string());
        done.insert("bias".to_string());
        assert_eq!(QuestStage::first_pending(&done), None);
    }

    #[test]
    fn submission_validation() {
        assert!(validate_submission("trivia", 30).is_ok());
        assert!(validate_submission("trivia", 0).is_ok());
        assert_matches!(validate_submission("", 30), Err(CoreError::Validation(_)));
        assert_matches!(validate_submission("   ", 30), Err(CoreError::Validation(_)));
        assert_matches!(validate_submission("trivia", -1), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_submission("trivia", MAX_QUEST_SCORE + 1),
            Err(CoreError::Validation(_))
        );
        let long = "q".repeat(MAX_QUEST_ID_LEN + 1);
        assert_matches!(validate_submission(&long, 1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn quest_id_length_counts_characters() {
        let emoji = "\u{1F3C6}".repeat(20);
        assert!(emoji.len() > MAX_QUEST_ID_LEN);
        assert!(validate_submission(&emoji, 1).is_ok());

        let at_limit = "\u{e9}".repeat(MAX_QUEST_ID_LEN);
        assert!(validate_submission(&at_limit, 1).is_ok());
        let over = "\u{e9}".repeat(MAX_QUEST_ID_LEN + 1);
        assert_matches!(validate_submission(&over, 1), Err(CoreError::Validation(_)));
    }
}
