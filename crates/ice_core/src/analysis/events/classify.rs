//! Closed event classification.
//!
//! | predicate            | types                                                        |
//! |----------------------|--------------------------------------------------------------|
//! | `is_goal`            | goal                                                         |
//! | `is_shot`            | goal, shot-on-goal                                           |
//! | `is_shot_attempt`    | goal, shot-on-goal, missed-shot, blocked-shot                |
//! | `is_penalty`         | penalty                                                      |
//! | `is_faceoff`         | faceoff                                                      |
//! | `is_stoppage`        | stoppage, period-start, period-end, game-end, delayed-penalty, tv-timeout |

use crate::models::EventType;

impl EventType {
    #[inline]
    pub fn is_goal(&self) -> bool {
        matches!(self, EventType::Goal)
    }

    /// Shots on goal. Goals count as shots.
    #[inline]
    pub fn is_shot(&self) -> bool {
        matches!(self, EventType::Goal | EventType::ShotOnGoal)
    }

    /// Any shot directed at the net, the events that have a defending goalie.
    #[inline]
    pub fn is_shot_attempt(&self) -> bool {
        matches!(
            self,
            EventType::Goal | EventType::ShotOnGoal | EventType::MissedShot | EventType::BlockedShot
        )
    }

    #[inline]
    pub fn is_penalty(&self) -> bool {
        matches!(self, EventType::Penalty)
    }

    #[inline]
    pub fn is_faceoff(&self) -> bool {
        matches!(self, EventType::Faceoff)
    }

    #[inline]
    pub fn is_stoppage(&self) -> bool {
        matches!(
            self,
            EventType::Stoppage
                | EventType::PeriodStart
                | EventType::PeriodEnd
                | EventType::GameEnd
                | EventType::DelayedPenalty
                | EventType::TvTimeout
        )
    }
}
