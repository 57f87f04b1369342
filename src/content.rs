//! Guidance text shown when a checkpoint opens and in the victory summary.
//!
//! The engine never generates or edits this content; it only looks entries
//! up by checkpoint index.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::CHECKPOINT_COUNT;
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub number: u8,
    pub title: String,
    pub description: String,
}

impl Habit {
    /// Title without its "Habit N: " prefix, as listed in the victory summary.
    pub fn short_title(&self) -> &str {
        let prefix = format!("Habit {}: ", self.number);
        self.title.strip_prefix(prefix.as_str()).unwrap_or(&self.title)
    }
}

/// Exactly seven habits, indexed by checkpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guidebook {
    habits: Vec<Habit>,
}

impl Guidebook {
    pub fn new(habits: Vec<Habit>) -> Result<Self, GameError> {
        if habits.len() != CHECKPOINT_COUNT {
            return Err(GameError::GuidebookLength(habits.len()));
        }
        Ok(Self { habits })
    }

    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let habits: Vec<Habit> = serde_json::from_str(text)?;
        Self::new(habits)
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::GuidebookIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn get(&self, index: usize) -> Option<&Habit> {
        self.habits.get(index)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }
}

impl Default for Guidebook {
    fn default() -> Self {
        let habits = SEVEN_HABITS
            .iter()
            .enumerate()
            .map(|(i, (title, description))| Habit {
                number: i as u8 + 1,
                title: (*title).to_string(),
                description: (*description).to_string(),
            })
            .collect();
        Self { habits }
    }
}

const SEVEN_HABITS: [(&str, &str); CHECKPOINT_COUNT] = [
    (
        "Habit 1: Be Proactive",
        "Take responsibility for your life. Focus on what you can control and influence. \
         Don't blame circumstances or others. Your choices determine your responses. \
         Between stimulus and response lies your freedom to choose.",
    ),
    (
        "Habit 2: Begin with the End in Mind",
        "Define clear goals and measures of success. Create a personal mission statement. \
         Envision what you want to become. Live with purpose and intention. \
         All things are created twice - first mentally, then physically.",
    ),
    (
        "Habit 3: Put First Things First",
        "Prioritize important over urgent tasks. Focus on activities that align with your goals. \
         Manage time based on priorities, not just schedules. Say no to the unimportant. \
         Effective management is discipline.",
    ),
    (
        "Habit 4: Think Win-Win",
        "Seek mutual benefit in all interactions. Life is cooperative, not competitive. \
         Build relationships based on trust and abundance. Both parties can succeed. \
         Win-Win or No Deal is the highest form of negotiation.",
    ),
    (
        "Habit 5: Seek First to Understand, Then to Be Understood",
        "Listen with empathy before speaking. Understand others' perspectives deeply. \
         Diagnose before you prescribe. When people feel understood, they become more open \
         to influence. Empathic listening builds trust.",
    ),
    (
        "Habit 6: Synergize",
        "Value differences and work together creatively. The whole is greater than the sum \
         of its parts. Embrace diverse perspectives to find better solutions. Teamwork \
         produces better results than individual effort. Unity is strength.",
    ),
    (
        "Habit 7: Sharpen the Saw",
        "Regularly renew yourself in four areas: physical (exercise), mental (learning), \
         social/emotional (relationships), and spiritual (values). Continuous improvement \
         is essential. Take time to maintain and enhance your greatest asset - you.",
    ),
];
