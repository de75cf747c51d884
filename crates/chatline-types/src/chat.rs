//! Chat message, conversation key, time window, and contact types.
//!
//! A conversation is the message stream between exactly two users. It is
//! addressed by a [`ConversationKey`], which is symmetric in its two
//! participants, and queried over an inclusive [`TimeWindow`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single message exchanged between two users.
///
/// `timestamp` is seconds since the Unix epoch and is the sort and range key
/// for history queries. Field names on the wire follow the chat client
/// (`from`, `to`, `message`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "to")]
    pub recipient: String,
    #[serde(rename = "message")]
    pub content: String,
    pub timestamp: i64,
}

impl ChatMessage {
    /// The conversation this message belongs to.
    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::new(&self.sender, &self.recipient)
    }
}

/// Symmetric identifier for the conversation between two users.
///
/// The participants are stored in lexicographic order, so
/// `ConversationKey::new("a", "b") == ConversationKey::new("b", "a")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    low: String,
    high: String,
}

impl ConversationKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// Both participants, in canonical order.
    pub fn participants(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    /// The participant that is not `username`, if `username` is a participant.
    ///
    /// For a self-conversation this returns `username` itself.
    pub fn counterpart(&self, username: &str) -> Option<&str> {
        if self.low == username {
            Some(&self.high)
        } else if self.high == username {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.low, self.high)
    }
}

/// One end of a [`TimeWindow`].
///
/// Variant order gives the ordering: `NegInfinity < At(_) < PosInfinity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBound {
    NegInfinity,
    At(i64),
    PosInfinity,
}

impl TimeBound {
    /// Clamp to the `i64` timestamp domain, for stores that need concrete values.
    pub fn as_timestamp(self) -> i64 {
        match self {
            TimeBound::NegInfinity => i64::MIN,
            TimeBound::At(ts) => ts,
            TimeBound::PosInfinity => i64::MAX,
        }
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBound::NegInfinity => write!(f, "-inf"),
            TimeBound::At(ts) => write!(f, "{ts}"),
            TimeBound::PosInfinity => write!(f, "+inf"),
        }
    }
}

/// A time bound string that is neither an infinity nor an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time bound: '{0}'")]
pub struct TimeBoundParseError(pub String);

impl FromStr for TimeBound {
    type Err = TimeBoundParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+inf" | "inf" => Ok(TimeBound::PosInfinity),
            "-inf" => Ok(TimeBound::NegInfinity),
            other => other
                .parse::<i64>()
                .map(TimeBound::At)
                .map_err(|_| TimeBoundParseError(s.to_string())),
        }
    }
}

/// Inclusive `[from, to]` range over message timestamps.
///
/// `from <= to` is the caller's responsibility; an inverted window simply
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: TimeBound,
    pub to: TimeBound,
}

impl TimeWindow {
    pub fn new(from: TimeBound, to: TimeBound) -> Self {
        Self { from, to }
    }

    /// Whether a message timestamp falls inside the window (both ends inclusive).
    pub fn contains(&self, timestamp: i64) -> bool {
        let at = TimeBound::At(timestamp);
        self.from <= at && at <= self.to
    }
}

impl Default for TimeWindow {
    /// `[0, +inf]`: start of time to unbounded future.
    fn default() -> Self {
        Self {
            from: TimeBound::At(0),
            to: TimeBound::PosInfinity,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

/// A user who has exchanged at least one message with a given user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub username: String,
    /// Timestamp of the most recent message exchanged with this contact.
    pub last_activity: i64,
}
