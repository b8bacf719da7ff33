use std::str::FromStr;

use crate::engine::{derive_score, derive_team_names};
use crate::models::{DomainEvent, MatchSnapshot};

use super::{Notification, Priority};

/// Notification language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "es" | "es-es" => Ok(Locale::Es),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

struct Strings {
    kickoff: &'static str,
    kickoff_body: &'static str,
    half_time: &'static str,
    second_half: &'static str,
    second_half_body: &'static str,
    full_time: &'static str,
    goal: &'static str,
    red_card: &'static str,
    red_card_body: &'static str,
}

const EN: Strings = Strings {
    kickoff: "Kick-off!",
    kickoff_body: "The match has started",
    half_time: "Half-time",
    second_half: "Second half",
    second_half_body: "The second half is under way",
    full_time: "Full time",
    goal: "GOAL",
    red_card: "Red card",
    red_card_body: "A player has been sent off",
};

const ES: Strings = Strings {
    kickoff: "¡Comienza el partido!",
    kickoff_body: "El partido ha comenzado",
    half_time: "Descanso",
    second_half: "Segunda parte",
    second_half_body: "Comienza la segunda parte",
    full_time: "Final del partido",
    goal: "GOL",
    red_card: "Tarjeta roja",
    red_card_body: "Un jugador ha sido expulsado",
};

impl Locale {
    fn strings(&self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    /// Title and body for a detected event
    pub fn render(&self, event: &DomainEvent, snapshot: &MatchSnapshot) -> Notification {
        let s = self.strings();
        let names = derive_team_names(snapshot);
        let score = derive_score(snapshot);
        let score_line = format!(
            "{} {} - {} {}",
            names.home, score.home, score.away, names.away
        );

        let (title, body) = match event {
            DomainEvent::MatchStart => (
                format!("{} {} vs {}", s.kickoff, names.home, names.away),
                s.kickoff_body.to_string(),
            ),
            DomainEvent::HalfTime => (s.half_time.to_string(), score_line),
            DomainEvent::SecondHalfStart => (
                s.second_half.to_string(),
                format!("{}. {}", s.second_half_body, score_line),
            ),
            DomainEvent::MatchEnd => (s.full_time.to_string(), score_line),
            DomainEvent::Goal {
                team,
                player,
                minute,
                ..
            } => {
                let mut body = score_line;
                if let Some(detail) = detail(player.as_deref(), *minute) {
                    body.push('\n');
                    body.push_str(&detail);
                }
                (format!("{}! {}", s.goal, team), body)
            }
            DomainEvent::RedCard {
                team,
                player,
                minute,
                ..
            } => {
                let body = detail(player.as_deref(), *minute)
                    .unwrap_or_else(|| s.red_card_body.to_string());
                (format!("{} - {}", s.red_card, team), body)
            }
        };

        let urgent = matches!(event, DomainEvent::Goal { .. } | DomainEvent::RedCard { .. });

        Notification {
            title,
            body,
            sound: true,
            priority: if urgent {
                Priority::High
            } else {
                Priority::Default
            },
        }
    }
}

/// "Silva 23'" style suffix
fn detail(player: Option<&str>, minute: Option<u32>) -> Option<String> {
    match (player, minute) {
        (Some(p), Some(m)) => Some(format!("{p} {m}'")),
        (Some(p), None) => Some(p.to_string()),
        (None, Some(m)) => Some(format!("{m}'")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{event, snapshot};
    use crate::models::{EventType, Location, MatchStateId};

    fn goal(player: Option<&str>, minute: Option<u32>) -> DomainEvent {
        DomainEvent::Goal {
            side: Location::Home,
            team: "Lions".to_string(),
            player: player.map(str::to_string),
            minute,
        }
    }

    #[test]
    fn test_goal_message_with_scorer() {
        let snap = snapshot(MatchStateId::FirstHalf, vec![event(23, 10, EventType::Goal)]);
        let n = Locale::En.render(&goal(Some("Silva"), Some(23)), &snap);

        assert_eq!(n.title, "GOAL! Lions");
        assert_eq!(n.body, "Lions 1 - 0 Rovers\nSilva 23'");
        assert_eq!(n.priority, Priority::High);
    }

    #[test]
    fn test_fallback_goal_has_only_score_line() {
        let snap = snapshot(MatchStateId::FirstHalf, vec![]);
        let n = Locale::Es.render(&goal(None, None), &snap);

        assert_eq!(n.title, "GOL! Lions");
        assert_eq!(n.body, "Lions 0 - 0 Rovers");
    }

    #[test]
    fn test_lifecycle_messages() {
        let snap = snapshot(MatchStateId::HalfTime, vec![]);

        let n = Locale::En.render(&DomainEvent::MatchStart, &snap);
        assert_eq!(n.title, "Kick-off! Lions vs Rovers");
        assert_eq!(n.priority, Priority::Default);

        let n = Locale::En.render(&DomainEvent::HalfTime, &snap);
        assert_eq!(n.body, "Lions 0 - 0 Rovers");

        let n = Locale::Es.render(&DomainEvent::MatchEnd, &snap);
        assert_eq!(n.title, "Final del partido");
    }

    #[test]
    fn test_red_card_without_player() {
        let snap = snapshot(MatchStateId::SecondHalf, vec![]);
        let card = DomainEvent::RedCard {
            side: Location::Away,
            team: "Rovers".to_string(),
            player: None,
            minute: None,
        };

        let n = Locale::En.render(&card, &snap);
        assert_eq!(n.title, "Red card - Rovers");
        assert_eq!(n.body, "A player has been sent off");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("es-ES".parse::<Locale>(), Ok(Locale::Es));
        assert!("xx".parse::<Locale>().is_err());
    }
}
