use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a bid request. The set is flat: any status may be
/// replaced by any other listed status; the only rule is membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    New,
    Reviewing,
    Quoted,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status")]
pub struct InvalidStatus;

impl BidStatus {
    pub const ALL: [BidStatus; 5] = [
        BidStatus::New,
        BidStatus::Reviewing,
        BidStatus::Quoted,
        BidStatus::Accepted,
        BidStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::New => "new",
            BidStatus::Reviewing => "reviewing",
            BidStatus::Quoted => "quoted",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BidStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(BidStatus::New),
            "reviewing" => Ok(BidStatus::Reviewing),
            "quoted" => Ok(BidStatus::Quoted),
            "accepted" => Ok(BidStatus::Accepted),
            "rejected" => Ok(BidStatus::Rejected),
            _ => Err(InvalidStatus),
        }
    }
}
